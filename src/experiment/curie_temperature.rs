//! # 居里温度
//!
//! 在磁化强度-温度曲线上寻找下降最陡的一段，对其做直线拟合并外推到
//! 磁化强度为零处，所得温度即居里温度的估计。
//!
//! ## 数据格式
//! CSV 列: `T`（温度），`M`（磁化强度）
//!
//! ## 依赖关系
//! - 被 `commands/curie.rs` 调用
//! - 使用 `math/least_squares.rs` 与 `curves/line.rs`

use super::Experiment;
use crate::curves::Line;
use crate::error::{PhysicsLabError, Result};
use crate::io;
use crate::math::linear_fit;

use serde::Deserialize;
use std::path::Path;

/// 结果表列名
pub const PROCESS_COLUMNS: &[&str] = &["curie_temperature"];

/// 默认拟合窗口（占测量点数的百分比）
pub const DEFAULT_PERCENTAGE: f64 = 10.0;

/// 单点测量
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Record {
    #[serde(rename = "T")]
    pub temperature: f64,
    #[serde(rename = "M")]
    pub magnetization: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurieTemperatureResult {
    pub curie_temperature: f64,
}

/// 磁化强度-温度测量（按温度升序保存）
#[derive(Debug, Clone)]
pub struct Measurement {
    temperature: Vec<f64>,
    magnetization: Vec<f64>,
}

impl Measurement {
    pub fn new(mut records: Vec<Record>) -> Result<Self> {
        if records.len() < 3 {
            return Err(PhysicsLabError::InsufficientData {
                context: "Curie temperature measurement".to_string(),
                required: 3,
                found: records.len(),
            });
        }
        records.sort_by(|a, b| a.temperature.total_cmp(&b.temperature));

        Ok(Measurement {
            temperature: records.iter().map(|r| r.temperature).collect(),
            magnetization: records.iter().map(|r| r.magnetization).collect(),
        })
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        Self::new(io::read_records(path)?)
    }

    /// 下降最陡处的切线
    ///
    /// 窗口宽度为测量点数的 `percentage`%（至少 2 点），在整条曲线上滑动，
    /// 取拟合斜率最负的窗口。
    pub fn steepest_descent(&self, percentage: f64) -> Result<Line> {
        if !(percentage > 0.0 && percentage <= 100.0) {
            return Err(PhysicsLabError::InvalidArgument(format!(
                "window percentage must be in (0, 100], got {}",
                percentage
            )));
        }

        let n = self.temperature.len();
        let window = ((n as f64 * percentage / 100.0).ceil() as usize).clamp(2, n);

        let mut best: Option<Line> = None;
        for start in 0..=(n - window) {
            let range = start..start + window;
            let fit = match linear_fit(&self.temperature[range.clone()], &self.magnetization[range]) {
                Ok(fit) => fit,
                Err(PhysicsLabError::SingularFit(_)) => continue,
                Err(e) => return Err(e),
            };
            if best.map_or(true, |b| fit.line.slope < b.slope) {
                best = Some(fit.line);
            }
        }

        match best {
            Some(line) if line.slope < 0.0 => Ok(line),
            _ => Err(PhysicsLabError::InvalidArgument(
                "magnetization does not decrease with temperature".to_string(),
            )),
        }
    }

    /// 居里温度：最陡切线与 M = 0 的交点
    pub fn analyze(&self, percentage: f64) -> Result<f64> {
        let tangent = self.steepest_descent(percentage)?;
        tangent.root().ok_or_else(|| {
            PhysicsLabError::SingularFit("tangent line has no root".to_string())
        })
    }
}

pub fn process(measurement: &Measurement, percentage: f64) -> Result<CurieTemperatureResult> {
    Ok(CurieTemperatureResult {
        curie_temperature: measurement.analyze(percentage)?,
    })
}

/// 批量处理适配
#[derive(Debug, Clone, Copy)]
pub struct CurieTemperature {
    pub percentage: f64,
}

impl Default for CurieTemperature {
    fn default() -> Self {
        CurieTemperature {
            percentage: DEFAULT_PERCENTAGE,
        }
    }
}

impl Experiment for CurieTemperature {
    type Output = CurieTemperatureResult;
    const NAME: &'static str = "Curie temperature";
    const PROCESS_COLUMNS: &'static [&'static str] = PROCESS_COLUMNS;

    fn process_file(&self, path: &Path) -> Result<CurieTemperatureResult> {
        process(&Measurement::from_file(path)?, self.percentage)
    }

    fn row(output: &CurieTemperatureResult) -> Vec<String> {
        vec![format!("{:.3}", output.curie_temperature)]
    }
}
