//! # 线性最小二乘
//!
//! 行数多于列数的设计矩阵用 SVD 求解，失败时逐步放宽容差。
//! 直线拟合 `y = a + b·x` 在此基础上构造两列设计矩阵。
//!
//! ## 依赖关系
//! - 被 `experiment/hall.rs`, `experiment/magnetism_type.rs`,
//!   `experiment/curie_temperature.rs` 使用
//! - 使用 `nalgebra`

use crate::curves::Line;
use crate::error::{PhysicsLabError, Result};

use nalgebra::{DMatrix, DVector};

/// 奇异值截断阈值，由严到宽依次尝试
const SINGULAR_VALUE_CUTOFFS: [f64; 3] = [1e-10, 1e-8, 1e-6];

/// SVD 求解 `design · β ≈ rhs`，维度不符或病态时返回 None
pub fn solve(design: &DMatrix<f64>, rhs: &DVector<f64>) -> Option<DVector<f64>> {
    if design.nrows() != rhs.len() {
        return None;
    }
    let decomposition = design.clone().svd(true, true);

    SINGULAR_VALUE_CUTOFFS.iter().find_map(|&eps| {
        decomposition
            .solve(rhs, eps)
            .ok()
            .filter(|beta| beta.iter().all(|b| b.is_finite()))
    })
}

/// 直线拟合结果
#[derive(Debug, Clone, Copy)]
pub struct LinearFit {
    pub line: Line,
    /// 残差平方和
    pub residual: f64,
    /// 决定系数 R²
    pub r_squared: f64,
}

/// 一次多项式拟合
pub fn linear_fit(x: &[f64], y: &[f64]) -> Result<LinearFit> {
    if x.len() != y.len() {
        return Err(PhysicsLabError::InvalidArgument(format!(
            "x and y lengths differ ({} vs {})",
            x.len(),
            y.len()
        )));
    }
    if x.len() < 2 {
        return Err(PhysicsLabError::InsufficientData {
            context: "linear fit".to_string(),
            required: 2,
            found: x.len(),
        });
    }
    if x.iter().all(|&v| v == x[0]) {
        return Err(PhysicsLabError::SingularFit(
            "all x values are identical".to_string(),
        ));
    }

    let n = x.len();
    let design = DMatrix::from_fn(n, 2, |i, j| if j == 0 { 1.0 } else { x[i] });
    let rhs = DVector::from_column_slice(y);

    let beta = solve(&design, &rhs)
        .ok_or_else(|| PhysicsLabError::SingularFit("linear least squares".to_string()))?;
    let line = Line::new(beta[0], beta[1]);

    let residual: f64 = x
        .iter()
        .zip(y)
        .map(|(&xi, &yi)| (yi - line.evaluate(xi)).powi(2))
        .sum();
    let mean = y.iter().sum::<f64>() / n as f64;
    let total: f64 = y.iter().map(|&yi| (yi - mean).powi(2)).sum();
    let r_squared = if total > 0.0 { 1.0 - residual / total } else { 1.0 };

    Ok(LinearFit {
        line,
        residual,
        r_squared,
    })
}
