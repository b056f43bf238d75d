//! # 数值计算模块
//!
//! 实验分析所需的数值方法。
//!
//! ## 子模块
//! - `least_squares`: 线性最小二乘（SVD）与直线拟合
//! - `root`: 割线法求根
//! - `curve_fit`: Levenberg-Marquardt 非线性拟合
//!
//! ## 依赖关系
//! - 被 `experiment/` 使用
//! - 使用 `nalgebra` 进行矩阵运算

pub mod curve_fit;
pub mod least_squares;
pub mod root;

pub use curve_fit::curve_fit;
pub use least_squares::{linear_fit, LinearFit};
pub use root::{newton, NewtonOptions};
