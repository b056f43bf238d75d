//! # 磁性类型分离
//!
//! 将磁化强度-磁场扫描曲线分解为抗磁（线性）分量、铁磁（磁滞回线）
//! 分量与残余部分。每次分离后，拟合得到的模拟曲线从残余列中扣除，
//! 因此可以依次调用 `diamagnetism(true)` 与 `ferromagnetism(true)`。
//!
//! ## 数据格式
//! CSV 列: `B`（磁场），`M`（磁化强度），可选 `T`（温度）
//!
//! ## 依赖关系
//! - 被 `commands/magnetism.rs`, `ui/magnetization.rs` 使用
//! - 使用 `math/` 的直线拟合与 Levenberg-Marquardt 拟合
//! - 使用 `curves/` 的 `Line` 与磁滞回线模型

use super::Experiment;
use crate::curves::{magnetic_hysteresis_loop, Line};
use crate::error::{PhysicsLabError, Result};
use crate::io;
use crate::math::{curve_fit, linear_fit};

use serde::Deserialize;
use std::path::Path;

/// 结果表列名
pub const PROCESS_COLUMNS: &[&str] = &[
    "magnetic_susceptibility",
    "offset",
    "saturation",
    "remanence",
    "coercivity",
    "ratio_DM_FM",
];

/// 默认侧边拟合范围（占磁场跨度的百分比）
pub const DEFAULT_PERCENTAGE: f64 = 10.0;

/// 单点磁化测量
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Record {
    #[serde(rename = "B")]
    pub magnetic_field: f64,
    #[serde(rename = "M")]
    pub magnetization: f64,
    #[serde(rename = "T", default)]
    pub temperature: Option<f64>,
}

/// 铁磁分量参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ferromagnetism {
    pub saturation: f64,
    pub remanence: f64,
    pub coercivity: f64,
}

impl Ferromagnetism {
    pub fn simulate(&self, fields: &[f64]) -> Vec<f64> {
        magnetic_hysteresis_loop(fields, self.saturation, self.remanence, self.coercivity)
    }
}

/// 分离结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MagnetismTypeResult {
    pub magnetic_susceptibility: f64,
    pub offset: f64,
    pub saturation: f64,
    pub remanence: f64,
    pub coercivity: f64,
    /// 最后一个测量点处抗磁与铁磁分量之比的绝对值
    pub ratio_dm_fm: f64,
}

/// 磁化测量
#[derive(Debug, Clone)]
pub struct Measurement {
    field: Vec<f64>,
    magnetization: Vec<f64>,
    temperature: Vec<f64>,
    residual: Vec<f64>,
    /// 侧边拟合范围 (%)
    percentage: f64,
    diamagnetism: Option<Line>,
    ferromagnetism: Option<Ferromagnetism>,
}

impl Measurement {
    pub fn new(records: Vec<Record>) -> Result<Self> {
        if records.len() < 4 {
            return Err(PhysicsLabError::InsufficientData {
                context: "magnetization measurement".to_string(),
                required: 4,
                found: records.len(),
            });
        }

        let field: Vec<f64> = records.iter().map(|r| r.magnetic_field).collect();
        let magnetization: Vec<f64> = records.iter().map(|r| r.magnetization).collect();
        let temperature = records.iter().filter_map(|r| r.temperature).collect();

        Ok(Measurement {
            residual: magnetization.clone(),
            field,
            magnetization,
            temperature,
            percentage: DEFAULT_PERCENTAGE,
            diamagnetism: None,
            ferromagnetism: None,
        })
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        Self::new(io::read_records(path)?)
    }

    /// 设置侧边拟合范围 (0, 50]
    pub fn with_percentage(mut self, percentage: f64) -> Result<Self> {
        if !(percentage > 0.0 && percentage <= 50.0) {
            return Err(PhysicsLabError::InvalidArgument(format!(
                "lateral fit percentage must be in (0, 50], got {}",
                percentage
            )));
        }
        self.percentage = percentage;
        Ok(self)
    }

    pub fn field(&self) -> &[f64] {
        &self.field
    }

    pub fn magnetization(&self) -> &[f64] {
        &self.magnetization
    }

    pub fn residual(&self) -> &[f64] {
        &self.residual
    }

    /// 平均测量温度（数据含 `T` 列时）
    pub fn temperature(&self) -> Option<f64> {
        if self.temperature.is_empty() {
            None
        } else {
            Some(self.temperature.iter().sum::<f64>() / self.temperature.len() as f64)
        }
    }

    /// 将残余列重置为原始磁化强度
    pub fn reset_residue(&mut self) {
        self.residual = self.magnetization.clone();
    }

    fn source(&self, from_residual: bool) -> Vec<f64> {
        if from_residual {
            self.residual.clone()
        } else {
            self.magnetization.clone()
        }
    }

    /// 求抗磁分量，返回 `(磁化率, 偏移)`
    pub fn diamagnetism(&mut self, from_residual: bool) -> Result<(f64, f64)> {
        let source = self.source(from_residual);
        let line = lateral_linear_fit(&self.field, &source, self.percentage)?;

        let fit = line.evaluate_all(&self.field);
        self.residual = source.iter().zip(&fit).map(|(m, f)| m - f).collect();
        self.diamagnetism = Some(line);

        Ok((line.slope, line.constant))
    }

    /// 求铁磁分量，返回 `(饱和, 剩磁, 矫顽场)`
    ///
    /// `p0` 为 None 时自动估计初值。
    pub fn ferromagnetism(
        &mut self,
        from_residual: bool,
        p0: Option<[f64; 3]>,
    ) -> Result<(f64, f64, f64)> {
        let source = self.source(from_residual);
        let p0 = p0.unwrap_or_else(|| self.ferromagnetism_parameter_guess(&source));

        let fitted = curve_fit(
            |x, p| magnetic_hysteresis_loop(x, p[0], p[1], p[2]),
            &self.field,
            &source,
            &p0,
        )?;
        let params = Ferromagnetism {
            saturation: fitted.params[0],
            remanence: fitted.params[1],
            coercivity: fitted.params[2],
        };

        let fit = params.simulate(&self.field);
        self.residual = source.iter().zip(&fit).map(|(m, f)| m - f).collect();
        self.ferromagnetism = Some(params);

        Ok((params.saturation, params.remanence, params.coercivity))
    }

    /// 磁滞回线参数初值
    fn ferromagnetism_parameter_guess(&self, magnetization: &[f64]) -> [f64; 3] {
        let (m_min, m_max) = min_max(magnetization);
        let (b_min, b_max) = min_max(&self.field);

        let saturation = (m_max - m_min).abs() / 2.0;
        let remanence = saturation / 2.0;
        let coercivity = (b_max - b_min).abs() / 10.0;

        [saturation, remanence, coercivity]
    }

    /// 在任意磁场数组上模拟抗磁分量
    pub fn simulate_diamagnetism(&self, fields: &[f64]) -> Option<Vec<f64>> {
        self.diamagnetism.map(|line| line.evaluate_all(fields))
    }

    /// 在任意磁场数组上模拟铁磁分量
    pub fn simulate_ferromagnetism(&self, fields: &[f64]) -> Option<Vec<f64>> {
        self.ferromagnetism.map(|params| params.simulate(fields))
    }
}

fn min_max(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

/// 避开中心区域（可能存在磁滞回线）的直线拟合
///
/// 分别拟合磁场最高与最低 `percentage`% 跨度内的数据，再取系数平均。
pub fn lateral_linear_fit(x: &[f64], y: &[f64], percentage: f64) -> Result<Line> {
    if x.len() != y.len() {
        return Err(PhysicsLabError::InvalidArgument(format!(
            "x and y lengths differ ({} vs {})",
            x.len(),
            y.len()
        )));
    }
    let (x_min, x_max) = min_max(x);
    let lateral_interval = (x_max - x_min) * percentage / 100.0;

    let select = |keep: &dyn Fn(f64) -> bool| -> (Vec<f64>, Vec<f64>) {
        x.iter()
            .zip(y)
            .filter(|(xi, _)| keep(**xi))
            .map(|(&xi, &yi)| (xi, yi))
            .unzip()
    };

    let (top_x, top_y) = select(&|xi| xi >= x_max - lateral_interval);
    let (bottom_x, bottom_y) = select(&|xi| xi <= x_min + lateral_interval);

    let top = linear_fit(&top_x, &top_y)?;
    let bottom = linear_fit(&bottom_x, &bottom_y)?;

    Ok(Line::average(&bottom.line, &top.line))
}

/// 完整处理：重置残余，先抗磁，再从残余中求铁磁
pub fn process(measurement: &mut Measurement) -> Result<MagnetismTypeResult> {
    measurement.reset_residue();
    let (magnetic_susceptibility, offset) = measurement.diamagnetism(true)?;
    let (saturation, remanence, coercivity) = measurement.ferromagnetism(true, None)?;

    let last_field = measurement.field.last().copied().unwrap_or_default();
    let ratio_dm_fm = match (
        measurement.simulate_diamagnetism(&[last_field]),
        measurement.simulate_ferromagnetism(&[last_field]),
    ) {
        (Some(dm), Some(fm)) => (dm[0] / fm[0]).abs(),
        _ => f64::NAN,
    };

    Ok(MagnetismTypeResult {
        magnetic_susceptibility,
        offset,
        saturation,
        remanence,
        coercivity,
        ratio_dm_fm,
    })
}

/// 单个测量的分离输出（保留测量以便绘图）
#[derive(Debug, Clone)]
pub struct Separation {
    pub result: MagnetismTypeResult,
    pub measurement: Measurement,
}

/// 批量处理适配
#[derive(Debug, Clone, Copy)]
pub struct MagnetismType {
    pub percentage: f64,
}

impl Default for MagnetismType {
    fn default() -> Self {
        MagnetismType {
            percentage: DEFAULT_PERCENTAGE,
        }
    }
}

impl Experiment for MagnetismType {
    type Output = Separation;
    const NAME: &'static str = "Magnetism type";
    const PROCESS_COLUMNS: &'static [&'static str] = PROCESS_COLUMNS;

    fn process_file(&self, path: &Path) -> Result<Separation> {
        let mut measurement = Measurement::from_file(path)?.with_percentage(self.percentage)?;
        let result = process(&mut measurement)?;
        Ok(Separation {
            result,
            measurement,
        })
    }

    fn row(output: &Separation) -> Vec<String> {
        let r = &output.result;
        [
            r.magnetic_susceptibility,
            r.offset,
            r.saturation,
            r.remanence,
            r.coercivity,
            r.ratio_dm_fm,
        ]
        .iter()
        .map(|v| format!("{:e}", v))
        .collect()
    }
}
