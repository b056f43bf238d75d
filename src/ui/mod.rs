//! # 绘图模块
//!
//! 使用 `plotters` 将批量处理的结果绘制成网格图。
//!
//! ## 子模块
//! - `grid`: 按二维网格排列子图，支持行列标签与公共坐标轴标签
//! - `magnetization`: 磁化曲线分离结果的子图
//!
//! ## 依赖关系
//! - 被 `commands/magnetism.rs` 调用
//! - 使用 `experiment/magnetism_type.rs`
//! - 使用 `plotters` 渲染 PNG / SVG

pub mod grid;
pub mod magnetization;

pub use grid::{plot_grid, GridOptions};
pub use magnetization::SeparationPlot;

use crate::error::PhysicsLabError;

/// plotters 错误统一转换
pub(crate) fn plot_error<E: std::fmt::Debug>(e: E) -> PhysicsLabError {
    PhysicsLabError::PlotError(format!("{:?}", e))
}
