//! # Van der Pauw 电阻率测量
//!
//! 四探针测量，绕开欧姆接触电阻。由水平 / 竖直两组电阻求解隐式方程
//! `exp(-π·Rv/Rs) + exp(-π·Rh/Rs) = 1` 得到方块电阻 Rs。
//!
//! ## 数据格式
//! CSV 列: `Geometry`, `Voltage`, `Current`, `Resistance`
//! （给出 `Resistance` 时电压、电流可省略，反之亦然）
//!
//! ## 依赖关系
//! - 被 `commands/van_der_pauw.rs`, `commands/geometry.rs` 调用
//! - 使用 `math/root.rs` 求根，`utils/array.rs` 分类几何构型
//! - 使用 `electricity.rs` 的欧姆定律

use super::{format_optional, Experiment};
use crate::electricity::{Resistance, Resistivity};
use crate::error::{PhysicsLabError, Result};
use crate::io;
use crate::math::{newton, NewtonOptions};
use crate::utils::array::permutation_sign;

use regex::Regex;
use serde::Deserialize;
use std::f64::consts::{LN_2, PI};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::LazyLock;

/// 结果表列名
pub const PROCESS_COLUMNS: &[&str] = &["sheet_resistance", "ratio", "resistivity"];

/// 构型记号：`1234`, `R12,34`, `R_{12,34}`, `12`
static GEOMETRY_PATTERN: LazyLock<std::result::Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^[Rr]?_?\{?([1-4])([1-4]),?\s*(?:([1-4])([1-4]))?\}?$"));

// ─────────────────────────────────────────────────────────────
// 几何构型
// ─────────────────────────────────────────────────────────────

/// 电阻测量构型
///
/// 记号 `R_ij,kl = V_kl / I_ij`。触点从左上角开始逆时针编号 1 到 4。
/// `RVertical` / `RHorizontal` 是两类构型本身。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "String")]
pub enum Geometry {
    R1234,
    R3412,
    R2143,
    R4321,

    R2341,
    R4123,
    R3214,
    R1432,

    RVertical,
    RHorizontal,
}

impl Geometry {
    /// 全部八种四触点构型
    pub const ALL: [Geometry; 8] = [
        Geometry::R1234,
        Geometry::R3412,
        Geometry::R2143,
        Geometry::R4321,
        Geometry::R2341,
        Geometry::R4123,
        Geometry::R3214,
        Geometry::R1432,
    ];

    /// 触点编号串，两类构型分别为 `12` 和 `21`
    pub fn label(&self) -> &'static str {
        match self {
            Geometry::R1234 => "1234",
            Geometry::R3412 => "3412",
            Geometry::R2143 => "2143",
            Geometry::R4321 => "4321",
            Geometry::R2341 => "2341",
            Geometry::R4123 => "4123",
            Geometry::R3214 => "3214",
            Geometry::R1432 => "1432",
            Geometry::RVertical => "12",
            Geometry::RHorizontal => "21",
        }
    }

    fn from_label(label: &str) -> Option<Geometry> {
        match label {
            "12" => Some(Geometry::RVertical),
            "21" => Some(Geometry::RHorizontal),
            _ => Self::ALL.iter().copied().find(|g| g.label() == label),
        }
    }

    fn permutation_sign(&self) -> i32 {
        let digits: Vec<char> = self.label().chars().collect();
        permutation_sign(&digits)
    }

    /// 是否为水平构型（置换为奇）
    pub fn is_horizontal(&self) -> bool {
        self.permutation_sign() == -1
    }

    /// 是否为竖直构型（置换为偶）
    pub fn is_vertical(&self) -> bool {
        self.permutation_sign() == 1
    }

    /// 归入竖直或水平两类之一
    pub fn classify(&self) -> Geometry {
        if self.is_vertical() {
            Geometry::RVertical
        } else {
            Geometry::RHorizontal
        }
    }

    /// 触点整体旋转一位（i → i mod 4 + 1），竖直与水平互换
    pub fn rotate(&self) -> Geometry {
        match self {
            Geometry::R1234 => Geometry::R2341,
            Geometry::R2341 => Geometry::R3412,
            Geometry::R3412 => Geometry::R4123,
            Geometry::R4123 => Geometry::R1234,
            Geometry::R2143 => Geometry::R3214,
            Geometry::R3214 => Geometry::R4321,
            Geometry::R4321 => Geometry::R1432,
            Geometry::R1432 => Geometry::R2143,
            Geometry::RVertical => Geometry::RHorizontal,
            Geometry::RHorizontal => Geometry::RVertical,
        }
    }

    /// 镜像（1 ↔ 4, 2 ↔ 3），类别不变
    pub fn reflect(&self) -> Geometry {
        match self {
            Geometry::R1234 => Geometry::R4321,
            Geometry::R4321 => Geometry::R1234,
            Geometry::R3412 => Geometry::R2143,
            Geometry::R2143 => Geometry::R3412,
            Geometry::R2341 => Geometry::R3214,
            Geometry::R3214 => Geometry::R2341,
            Geometry::R4123 => Geometry::R1432,
            Geometry::R1432 => Geometry::R4123,
            class => *class,
        }
    }

    /// 反转电流与电压极性（R_ij,kl → R_ji,lk）
    pub fn reverse_polarity(&self) -> Geometry {
        match self {
            Geometry::R1234 => Geometry::R2143,
            Geometry::R2143 => Geometry::R1234,
            Geometry::R3412 => Geometry::R4321,
            Geometry::R4321 => Geometry::R3412,
            Geometry::R2341 => Geometry::R3214,
            Geometry::R3214 => Geometry::R2341,
            Geometry::R4123 => Geometry::R1432,
            Geometry::R1432 => Geometry::R4123,
            class => *class,
        }
    }

    /// 互易：交换电流触点与电压触点（R_ij,kl → R_kl,ij）
    pub fn reciprocal(&self) -> Geometry {
        match self {
            Geometry::R1234 => Geometry::R3412,
            Geometry::R3412 => Geometry::R1234,
            Geometry::R2143 => Geometry::R4321,
            Geometry::R4321 => Geometry::R2143,
            Geometry::R2341 => Geometry::R4123,
            Geometry::R4123 => Geometry::R2341,
            Geometry::R3214 => Geometry::R1432,
            Geometry::R1432 => Geometry::R3214,
            class => *class,
        }
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Geometry::RVertical => write!(f, "RVertical"),
            Geometry::RHorizontal => write!(f, "RHorizontal"),
            other => write!(f, "R{}", other.label()),
        }
    }
}

impl FromStr for Geometry {
    type Err = PhysicsLabError;

    /// 接受 `1234`, `R1234`, `R12,34`, `R_{12,34}`, `vertical`, `horizontal`
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "vertical" | "rvertical" => return Ok(Geometry::RVertical),
            "horizontal" | "rhorizontal" => return Ok(Geometry::RHorizontal),
            _ => {}
        }

        let pattern = GEOMETRY_PATTERN
            .as_ref()
            .map_err(|e| PhysicsLabError::InvalidGeometry(e.to_string()))?;
        let caps = pattern
            .captures(trimmed)
            .ok_or_else(|| PhysicsLabError::InvalidGeometry(s.to_string()))?;

        let label: String = (1..=4)
            .filter_map(|i| caps.get(i).map(|m| m.as_str()))
            .collect();

        Geometry::from_label(&label).ok_or_else(|| PhysicsLabError::InvalidGeometry(s.to_string()))
    }
}

impl TryFrom<String> for Geometry {
    type Error = PhysicsLabError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

// ─────────────────────────────────────────────────────────────
// 求解
// ─────────────────────────────────────────────────────────────

/// 方块电阻求解
pub struct Solve;

impl Solve {
    /// Van der Pauw 隐函数，其零点即为方块电阻
    ///
    /// `f(Rs) = exp(-π·Rv/Rs) + exp(-π·Rh/Rs) - 1`
    pub fn implicit_formula(rs: f64, rh: f64, rv: f64) -> f64 {
        (-PI * rv / rs).exp() + (-PI * rh / rs).exp() - 1.0
    }

    /// 正方形样品（Rh = Rv）的精确解，其他情况作为初值
    pub fn square(rh: f64, rv: f64) -> f64 {
        let r = (rh + rv) / 2.0;
        r * PI / LN_2
    }

    /// 在 `rs0` 附近求隐函数的根
    pub fn general(rh: f64, rv: f64, rs0: f64) -> Result<f64> {
        newton(
            |rs| Self::implicit_formula(rs, rh, rv),
            rs0,
            NewtonOptions::default(),
        )
    }

    /// 以正方形近似为初值的通用解
    pub fn solve(rh: f64, rv: f64) -> Result<f64> {
        Self::general(rh, rv, Self::square(rh, rv))
    }
}

// ─────────────────────────────────────────────────────────────
// 测量
// ─────────────────────────────────────────────────────────────

/// 单条电阻测量
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Record {
    #[serde(rename = "Geometry")]
    pub geometry: Geometry,
    #[serde(rename = "Voltage", default)]
    pub voltage: Option<f64>,
    #[serde(rename = "Current", default)]
    pub current: Option<f64>,
    #[serde(rename = "Resistance", default)]
    pub resistance: Option<f64>,
}

/// Van der Pauw 结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VanDerPauwResult {
    /// 方块电阻 (ohms per square)
    pub sheet_resistance: f64,
    /// 水平与竖直电阻之比（≥ 1，保留一位小数）
    pub ratio: f64,
    /// 电阻率 (ohm-meter)，需要样品厚度
    pub resistivity: Option<f64>,
}

/// Van der Pauw 电阻测量集合
#[derive(Debug, Clone)]
pub struct Measurement {
    records: Vec<Record>,
}

impl Measurement {
    pub fn new(records: Vec<Record>) -> Result<Self> {
        if records.is_empty() {
            return Err(PhysicsLabError::InsufficientData {
                context: "Van der Pauw measurement".to_string(),
                required: 1,
                found: 0,
            });
        }
        Ok(Measurement { records })
    }

    /// 从 CSV 文件读取
    pub fn from_file(path: &Path) -> Result<Self> {
        Self::new(io::read_records(path)?)
    }

    /// 是否存在缺失的电阻值
    pub fn resistance_isnull(&self) -> bool {
        self.records.iter().any(|r| r.resistance.is_none())
    }

    /// 由欧姆定律填充缺失的电阻，已有的电阻保持不变
    pub fn find_resistances(&mut self) -> Result<()> {
        for (row, record) in self.records.iter_mut().enumerate() {
            if record.resistance.is_some() {
                continue;
            }
            let voltage = record.voltage.ok_or_else(|| PhysicsLabError::MissingValue {
                column: "Voltage".to_string(),
                row,
            })?;
            let current = record.current.ok_or_else(|| PhysicsLabError::MissingValue {
                column: "Current".to_string(),
                row,
            })?;
            record.resistance = Some(Resistance::from_ohms_law(voltage, current)?);
        }
        Ok(())
    }

    /// 按水平 / 竖直分组并取平均，返回 `(Rh, Rv)`
    pub fn split_and_average(&self) -> Result<(f64, f64)> {
        let mut horizontal = Vec::new();
        let mut vertical = Vec::new();

        for (row, record) in self.records.iter().enumerate() {
            let resistance = record.resistance.ok_or_else(|| PhysicsLabError::MissingValue {
                column: "Resistance".to_string(),
                row,
            })?;
            if record.geometry.is_horizontal() {
                horizontal.push(resistance);
            } else {
                vertical.push(resistance);
            }
        }

        Ok((
            average(&horizontal, "horizontal resistances")?,
            average(&vertical, "vertical resistances")?,
        ))
    }

    /// 求方块电阻及电阻比
    pub fn solve_for_sheet_resistance(&self, rh: f64, rv: f64) -> Result<(f64, f64)> {
        if !(rh > 0.0 && rv > 0.0) {
            return Err(PhysicsLabError::InvalidArgument(format!(
                "resistances must be positive (Rh = {}, Rv = {})",
                rh, rv
            )));
        }

        let sheet_resistance = Solve::solve(rh, rv)?;

        Ok((sheet_resistance, resistance_ratio(rh, rv)))
    }
}

/// `max(Rh/Rv, Rv/Rh)` 保留一位小数，恰好在中点时取偶数
fn resistance_ratio(rh: f64, rv: f64) -> f64 {
    let ratio = if rh >= rv { rh / rv } else { rv / rh };
    (ratio * 10.0).round_ties_even() / 10.0
}

fn average(values: &[f64], context: &str) -> Result<f64> {
    if values.is_empty() {
        return Err(PhysicsLabError::InsufficientData {
            context: context.to_string(),
            required: 1,
            found: 0,
        });
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// 完整处理：缺失电阻时先用欧姆定律计算
pub fn process(mut measurement: Measurement) -> Result<VanDerPauwResult> {
    if measurement.resistance_isnull() {
        measurement.find_resistances()?;
    }
    let (rh, rv) = measurement.split_and_average()?;
    let (sheet_resistance, ratio) = measurement.solve_for_sheet_resistance(rh, rv)?;
    Ok(VanDerPauwResult {
        sheet_resistance,
        ratio,
        resistivity: None,
    })
}

/// 批量处理适配，给出厚度 (m) 时额外求电阻率
#[derive(Debug, Clone, Copy, Default)]
pub struct VanDerPauw {
    pub thickness: Option<f64>,
}

impl Experiment for VanDerPauw {
    type Output = VanDerPauwResult;
    const NAME: &'static str = "Van der Pauw";
    const PROCESS_COLUMNS: &'static [&'static str] = PROCESS_COLUMNS;

    fn process_file(&self, path: &Path) -> Result<VanDerPauwResult> {
        let mut result = process(Measurement::from_file(path)?)?;
        result.resistivity = self
            .thickness
            .map(|t| Resistivity::from_sheet_resistance(result.sheet_resistance, t));
        Ok(result)
    }

    fn row(output: &VanDerPauwResult) -> Vec<String> {
        vec![
            format!("{:e}", output.sheet_resistance),
            format!("{:.1}", output.ratio),
            format_optional(output.resistivity),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_voltages(rows: &[(Geometry, f64, f64)]) -> Measurement {
        let records = rows
            .iter()
            .map(|&(geometry, voltage, current)| Record {
                geometry,
                voltage: Some(voltage),
                current: Some(current),
                resistance: None,
            })
            .collect();
        Measurement::new(records).unwrap()
    }

    #[test]
    fn test_geometry_classification() {
        let vertical = [
            Geometry::R1234,
            Geometry::R3412,
            Geometry::R2143,
            Geometry::R4321,
        ];
        let horizontal = [
            Geometry::R2341,
            Geometry::R4123,
            Geometry::R3214,
            Geometry::R1432,
        ];
        assert!(vertical.iter().all(|g| g.classify() == Geometry::RVertical));
        assert!(horizontal.iter().all(|g| g.classify() == Geometry::RHorizontal));
        assert!(Geometry::RVertical.is_vertical());
        assert!(Geometry::RHorizontal.is_horizontal());
    }

    #[test]
    fn test_symmetry_operations() {
        for g in Geometry::ALL {
            // 旋转四次回到原处，且每次交换类别
            assert_eq!(g.rotate().rotate().rotate().rotate(), g);
            assert_ne!(g.rotate().classify(), g.classify());
            // 对合
            assert_eq!(g.reflect().reflect(), g);
            assert_eq!(g.reverse_polarity().reverse_polarity(), g);
            assert_eq!(g.reciprocal().reciprocal(), g);
            // 镜像、反极性、互易不改变类别
            assert_eq!(g.reflect().classify(), g.classify());
            assert_eq!(g.reverse_polarity().classify(), g.classify());
            assert_eq!(g.reciprocal().classify(), g.classify());
        }
        assert_eq!(Geometry::RVertical.rotate(), Geometry::RHorizontal);
    }

    #[test]
    fn test_rotate_matches_contact_shift() {
        for g in Geometry::ALL {
            let shifted: String = g
                .label()
                .chars()
                .map(|c| match c {
                    '1' => '2',
                    '2' => '3',
                    '3' => '4',
                    _ => '1',
                })
                .collect();
            assert_eq!(g.rotate().label(), shifted);
        }
    }

    #[test]
    fn test_geometry_parse() {
        assert_eq!("1234".parse::<Geometry>().unwrap(), Geometry::R1234);
        assert_eq!("R2341".parse::<Geometry>().unwrap(), Geometry::R2341);
        assert_eq!("R12,34".parse::<Geometry>().unwrap(), Geometry::R1234);
        assert_eq!("R_{43,21}".parse::<Geometry>().unwrap(), Geometry::R4321);
        assert_eq!("12".parse::<Geometry>().unwrap(), Geometry::RVertical);
        assert_eq!("Horizontal".parse::<Geometry>().unwrap(), Geometry::RHorizontal);
        assert!("1324".parse::<Geometry>().is_err());
        assert!("R5678".parse::<Geometry>().is_err());
        assert_eq!(Geometry::R1432.to_string(), "R1432");
    }

    #[test]
    fn test_square_sample_is_exact() {
        let r = 10.0;
        let rs = Solve::solve(r, r).unwrap();
        assert!((rs - r * PI / LN_2).abs() < 1e-9);
        assert!(Solve::implicit_formula(rs, r, r).abs() < 1e-12);
    }

    #[test]
    fn test_general_solution_satisfies_equation() {
        let (rh, rv) = (1.0, 3.0);
        let rs = Solve::solve(rh, rv).unwrap();
        assert!(Solve::implicit_formula(rs, rh, rv).abs() < 1e-9);
        // 非对称时解小于平均值近似
        assert!(rs < Solve::square(rh, rv));
    }

    #[test]
    fn test_process_from_voltages() {
        let measurement = from_voltages(&[
            (Geometry::R1234, 2.0, 0.1),
            (Geometry::R2143, 2.2, 0.1),
            (Geometry::R2341, 1.0, 0.1),
            (Geometry::R4123, 1.0, 0.1),
        ]);

        let result = process(measurement).unwrap();
        // Rv = 21, Rh = 10
        assert_eq!(result.ratio, 2.1);
        assert!(Solve::implicit_formula(result.sheet_resistance, 10.0, 21.0).abs() < 1e-9);
    }

    #[test]
    fn test_process_csv() {
        let content = "Geometry,Voltage,Current,Resistance\n\
                       R1234,,,5.0\n\
                       R3412,,,5.0\n\
                       R2341,,,5.0\n\
                       R1432,,,5.0\n";
        let records: Vec<Record> = io::measurement::parse_records(content).unwrap();
        let result = process(Measurement::new(records).unwrap()).unwrap();
        assert_eq!(result.ratio, 1.0);
        assert!((result.sheet_resistance - 5.0 * PI / LN_2).abs() < 1e-9);
    }

    #[test]
    fn test_ratio_rounds_half_to_even() {
        assert_eq!(resistance_ratio(9.0, 4.0), 2.2);
        assert_eq!(resistance_ratio(4.0, 11.0), 2.8);
        assert_eq!(resistance_ratio(3.0, 3.0), 1.0);

        let measurement = from_voltages(&[(Geometry::R1234, 1.0, 1.0)]);
        let (_, ratio) = measurement.solve_for_sheet_resistance(4.0, 9.0).unwrap();
        assert_eq!(ratio, 2.2);
    }

    #[test]
    fn test_process_mixed_resistance_and_voltage_rows() {
        let content = "Geometry,Voltage,Current,Resistance\n\
                       R1234,,,5.0\n\
                       R3412,0.5,0.1,\n\
                       R2341,,,5.0\n\
                       R1432,0.5,0.1,\n";
        let records: Vec<Record> = io::measurement::parse_records(content).unwrap();
        let mut measurement = Measurement::new(records).unwrap();
        assert!(measurement.resistance_isnull());

        measurement.find_resistances().unwrap();
        assert!(!measurement.resistance_isnull());
        assert_eq!(measurement.split_and_average().unwrap(), (5.0, 5.0));

        let result = process(measurement).unwrap();
        assert_eq!(result.ratio, 1.0);
        assert!((result.sheet_resistance - 5.0 * PI / LN_2).abs() < 1e-9);
    }

    #[test]
    fn test_missing_group_and_values() {
        let measurement = from_voltages(&[(Geometry::R1234, 1.0, 1.0)]);
        assert!(matches!(
            process(measurement),
            Err(PhysicsLabError::InsufficientData { .. })
        ));

        let records = vec![Record {
            geometry: Geometry::R1234,
            voltage: Some(1.0),
            current: None,
            resistance: None,
        }];
        let mut measurement = Measurement::new(records).unwrap();
        assert!(measurement.resistance_isnull());
        assert!(matches!(
            measurement.find_resistances(),
            Err(PhysicsLabError::MissingValue { .. })
        ));

        assert!(Measurement::new(Vec::new()).is_err());
    }

    #[test]
    fn test_batch_resistivity_from_thickness() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("square.csv");
        std::fs::write(
            &path,
            "Geometry,Voltage,Current,Resistance\nR1234,,,5.0\nR2341,,,5.0\n",
        )
        .unwrap();

        let without = VanDerPauw::default().process_file(&path).unwrap();
        assert!(without.resistivity.is_none());
        assert_eq!(VanDerPauw::row(&without)[2], "");

        let with = VanDerPauw {
            thickness: Some(1e-7),
        }
        .process_file(&path)
        .unwrap();
        let expected = 5.0 * PI / LN_2 * 1e-7;
        assert!((with.resistivity.unwrap() - expected).abs() / expected < 1e-9);
        assert_eq!(VanDerPauw::row(&with).len(), PROCESS_COLUMNS.len());
    }
}
