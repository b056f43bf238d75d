//! # 直线
//!
//! 仿射函数 `y = constant + slope·x` 的便捷对象。
//!
//! ## 依赖关系
//! - 被 `math/least_squares.rs` 返回
//! - 被 `experiment/magnetism_type.rs`, `experiment/curie_temperature.rs` 使用

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// 直线 `y = constant + slope·x`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Line {
    /// 截距
    pub constant: f64,
    /// 斜率
    pub slope: f64,
}

impl Line {
    pub fn new(constant: f64, slope: f64) -> Self {
        Line { constant, slope }
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        self.constant + self.slope * x
    }

    pub fn evaluate_all(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.evaluate(x)).collect()
    }

    /// 零点；水平线没有零点
    pub fn root(&self) -> Option<f64> {
        self.invert(0.0)
    }

    /// 求 y 对应的 x
    pub fn invert(&self, y: f64) -> Option<f64> {
        if self.slope == 0.0 {
            return None;
        }
        Some((y - self.constant) / self.slope)
    }

    /// 系数逐项平均
    pub fn average(a: &Line, b: &Line) -> Line {
        (*a + *b) * 0.5
    }
}

impl Add for Line {
    type Output = Line;

    fn add(self, rhs: Line) -> Line {
        Line::new(self.constant + rhs.constant, self.slope + rhs.slope)
    }
}

impl Sub for Line {
    type Output = Line;

    fn sub(self, rhs: Line) -> Line {
        self + (-rhs)
    }
}

impl Neg for Line {
    type Output = Line;

    fn neg(self) -> Line {
        Line::new(-self.constant, -self.slope)
    }
}

impl Mul<f64> for Line {
    type Output = Line;

    fn mul(self, rhs: f64) -> Line {
        Line::new(self.constant * rhs, self.slope * rhs)
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "y = {} + {}·x", self.constant, self.slope)
    }
}
