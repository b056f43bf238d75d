//! # 霍尔效应测量
//!
//! 由霍尔电压 / 电流 / 磁场三元组求面载流子密度与导电类型，
//! 可选地结合样品厚度与方块电阻求载流子浓度和迁移率。
//!
//! ## 数据格式
//! CSV 列: `B` (T), `VH` (V), `I` (A)
//!
//! ## 依赖关系
//! - 被 `commands/hall.rs` 调用
//! - 使用 `math/least_squares.rs` 直线拟合
//! - 使用 `electricity.rs`

use super::{format_optional, Experiment};
use crate::electricity::{carrier_concentration, Mobility, Resistance, ELEMENTARY_CHARGE};
use crate::error::{PhysicsLabError, Result};
use crate::io;
use crate::math::{linear_fit, LinearFit};

use serde::Deserialize;
use std::fmt;
use std::path::Path;

/// 结果表列名
pub const PROCESS_COLUMNS: &[&str] = &[
    "sheet_density",
    "conductivity_type",
    "residual",
    "concentration",
    "mobility",
];

/// 单点霍尔测量
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Record {
    /// 磁感应强度 (T)
    #[serde(rename = "B")]
    pub magnetic_field: f64,
    /// 霍尔电压 (V)
    #[serde(rename = "VH")]
    pub hall_voltage: f64,
    /// 电流 (A)
    #[serde(rename = "I")]
    pub current: f64,
}

/// 导电类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConductivityType {
    /// 空穴导电
    P,
    /// 电子导电
    N,
}

impl fmt::Display for ConductivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConductivityType::P => write!(f, "p"),
            ConductivityType::N => write!(f, "n"),
        }
    }
}

/// 霍尔分析结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HallResult {
    /// 面载流子密度 (m⁻²)
    pub sheet_density: f64,
    pub conductivity_type: ConductivityType,
    /// 拟合残差平方和
    pub residual: f64,
    /// 载流子浓度 (m⁻³)，需要厚度
    pub concentration: Option<f64>,
    /// 迁移率 (m²/(V·s))，需要方块电阻
    pub mobility: Option<f64>,
}

/// 霍尔测量
#[derive(Debug, Clone)]
pub struct Measurement {
    records: Vec<Record>,
}

impl Measurement {
    pub fn new(records: Vec<Record>) -> Result<Self> {
        if records.len() < 2 {
            return Err(PhysicsLabError::InsufficientData {
                context: "Hall measurement".to_string(),
                required: 2,
                found: records.len(),
            });
        }
        Ok(Measurement { records })
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        Self::new(io::read_records(path)?)
    }

    /// 各点霍尔电阻 R_H = VH / I
    pub fn hall_resistances(&self) -> Result<Vec<f64>> {
        self.records
            .iter()
            .map(|r| Resistance::from_ohms_law(r.hall_voltage, r.current))
            .collect()
    }

    /// 磁场对霍尔电阻的直线拟合
    fn fit(&self) -> Result<LinearFit> {
        let hall_resistance = self.hall_resistances()?;
        let field: Vec<f64> = self.records.iter().map(|r| r.magnetic_field).collect();
        linear_fit(&hall_resistance, &field)
    }

    /// 拟合线性度是否足够（R² ≥ `min_r_squared`）
    pub fn is_valid(&self, min_r_squared: f64) -> Result<bool> {
        Ok(self.fit()?.r_squared >= min_r_squared)
    }

    /// 求面载流子密度、导电类型与拟合残差
    ///
    /// 斜率 dB/dR_H = q·n_s，其符号与霍尔系数一致：正为空穴 (p)，负为电子 (n)。
    pub fn solve_for_sheet_density(&self) -> Result<(f64, ConductivityType, f64)> {
        let fit = self.fit()?;
        let slope = fit.line.slope;
        let conductivity_type = if slope > 0.0 {
            ConductivityType::P
        } else {
            ConductivityType::N
        };
        Ok(((slope / ELEMENTARY_CHARGE).abs(), conductivity_type, fit.residual))
    }
}

/// 完整处理
pub fn process(
    measurement: &Measurement,
    thickness: Option<f64>,
    sheet_resistance: Option<f64>,
) -> Result<HallResult> {
    let (sheet_density, conductivity_type, residual) = measurement.solve_for_sheet_density()?;

    let concentration = thickness
        .map(|t| carrier_concentration(sheet_density, t))
        .transpose()?;
    let mobility = sheet_resistance
        .map(|rs| Mobility::from_sheets(sheet_density, rs))
        .transpose()?;

    Ok(HallResult {
        sheet_density,
        conductivity_type,
        residual,
        concentration,
        mobility,
    })
}

/// 批量处理的单个输出：分析结果与线性度检查
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HallOutput {
    pub result: HallResult,
    /// 拟合 R² 不低于 `Hall::min_r_squared`
    pub is_valid: bool,
}

/// 批量处理适配，厚度、方块电阻与 R² 下限对整批共用
#[derive(Debug, Clone, Copy)]
pub struct Hall {
    pub thickness: Option<f64>,
    pub sheet_resistance: Option<f64>,
    pub min_r_squared: f64,
}

impl Experiment for Hall {
    type Output = HallOutput;
    const NAME: &'static str = "Hall";
    const PROCESS_COLUMNS: &'static [&'static str] = PROCESS_COLUMNS;

    fn process_file(&self, path: &Path) -> Result<HallOutput> {
        let measurement = Measurement::from_file(path)?;
        Ok(HallOutput {
            result: process(&measurement, self.thickness, self.sheet_resistance)?,
            is_valid: measurement.is_valid(self.min_r_squared)?,
        })
    }

    fn row(output: &HallOutput) -> Vec<String> {
        let output = &output.result;
        vec![
            format!("{:e}", output.sheet_density),
            output.conductivity_type.to_string(),
            format!("{:e}", output.residual),
            format_optional(output.concentration),
            format_optional(output.mobility),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 生成理想霍尔数据：R_H = B / (q·n_s)
    fn synthetic(sheet_density: f64, charge: f64) -> Measurement {
        let current = 1e-3;
        let records = (-5..=5)
            .map(|i| {
                let b = i as f64 * 0.2;
                let hall_resistance = b / (charge * sheet_density);
                Record {
                    magnetic_field: b,
                    hall_voltage: hall_resistance * current,
                    current,
                }
            })
            .collect();
        Measurement::new(records).unwrap()
    }

    #[test]
    fn test_electrons() {
        let measurement = synthetic(1e17, -ELEMENTARY_CHARGE);
        let (density, kind, residual) = measurement.solve_for_sheet_density().unwrap();
        assert!((density - 1e17).abs() / 1e17 < 1e-9);
        assert_eq!(kind, ConductivityType::N);
        assert!(residual < 1e-20);
        assert!(measurement.is_valid(0.999).unwrap());
    }

    #[test]
    fn test_holes_with_derived_quantities() {
        let measurement = synthetic(2e16, ELEMENTARY_CHARGE);
        let result = process(&measurement, Some(1e-6), Some(500.0)).unwrap();
        assert_eq!(result.conductivity_type, ConductivityType::P);
        assert!((result.sheet_density - 2e16).abs() / 2e16 < 1e-9);

        let concentration = result.concentration.unwrap();
        assert!((concentration - 2e22).abs() / 2e22 < 1e-9);

        let mobility = result.mobility.unwrap();
        let expected = 1.0 / (ELEMENTARY_CHARGE * 2e16 * 500.0);
        assert!((mobility - expected).abs() / expected < 1e-9);
    }

    #[test]
    fn test_optional_quantities_absent() {
        let measurement = synthetic(1e17, -ELEMENTARY_CHARGE);
        let result = process(&measurement, None, None).unwrap();
        assert!(result.concentration.is_none());
        assert!(result.mobility.is_none());
        let row = Hall::row(&HallOutput {
            result,
            is_valid: true,
        });
        assert_eq!(row.len(), PROCESS_COLUMNS.len());
        assert_eq!(row[1], "n");
        assert_eq!(row[3], "");
    }

    #[test]
    fn test_csv_and_zero_current() {
        let content = "B,VH,I\n-1,0.001,0.01\n1,-0.001,0.01\n";
        let records: Vec<Record> = io::measurement::parse_records(content).unwrap();
        let measurement = Measurement::new(records).unwrap();
        let (_, kind, _) = measurement.solve_for_sheet_density().unwrap();
        assert_eq!(kind, ConductivityType::N);

        let bad = Measurement::new(vec![
            Record {
                magnetic_field: 0.0,
                hall_voltage: 0.0,
                current: 0.0,
            },
            Record {
                magnetic_field: 1.0,
                hall_voltage: 1.0,
                current: 1.0,
            },
        ])
        .unwrap();
        assert!(bad.solve_for_sheet_density().is_err());
        assert!(Measurement::new(Vec::new()).is_err());
    }

    #[test]
    fn test_batch_output_flags_nonlinear_fit() {
        let dir = tempfile::tempdir().unwrap();
        let linear = dir.path().join("linear.csv");
        let scattered = dir.path().join("scattered.csv");
        std::fs::write(&linear, "B,VH,I\n-1,-0.002,0.01\n0,0,0.01\n1,0.002,0.01\n").unwrap();
        std::fs::write(
            &scattered,
            "B,VH,I\n-1,0.002,0.01\n0,-0.004,0.01\n1,0.002,0.01\n2,0.0021,0.01\n",
        )
        .unwrap();

        let experiment = Hall {
            thickness: None,
            sheet_resistance: None,
            min_r_squared: 0.99,
        };
        let good = experiment.process_file(&linear).unwrap();
        assert!(good.is_valid);
        assert_eq!(good.result.conductivity_type, ConductivityType::P);
        assert!(!experiment.process_file(&scattered).unwrap().is_valid);
    }
}
