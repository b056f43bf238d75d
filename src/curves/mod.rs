//! # 曲线模块
//!
//! 拟合与模拟中常用的函数形式。
//!
//! ## 子模块
//! - `line`: 仿射函数 `y = a + b·x`
//! - `hysteresis`: 铁磁磁滞回线
//!
//! ## 依赖关系
//! - 被 `math/`, `experiment/` 使用

pub mod hysteresis;
pub mod line;

pub use hysteresis::magnetic_hysteresis_loop;
pub use line::Line;
