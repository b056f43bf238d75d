//! # geometry 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/geometry.rs`

use clap::Args;

/// geometry 子命令参数
#[derive(Args, Debug)]
pub struct GeometryArgs {
    /// Geometry label, e.g. R1234, 12,34 or R_{21,34}; omit to list all
    pub label: Option<String>,
}
