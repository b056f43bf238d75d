//! # magnetism 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/magnetism.rs`

use super::batch::BatchArgs;
use crate::experiment::magnetism_type::DEFAULT_PERCENTAGE;
use clap::Args;
use std::path::PathBuf;

/// magnetism 子命令参数
#[derive(Args, Debug)]
pub struct MagnetismArgs {
    #[command(flatten)]
    pub batch: BatchArgs,

    /// Share of points at each end of the sweep used by the lateral fit (%)
    #[arg(long, default_value_t = DEFAULT_PERCENTAGE)]
    pub percentage: f64,

    /// Save a grid of separation plots (.png or .svg)
    #[arg(long)]
    pub plot: Option<PathBuf>,

    /// Width of a single subplot in pixels
    #[arg(long, default_value_t = 480)]
    pub width: u32,

    /// Height of a single subplot in pixels
    #[arg(long, default_value_t = 360)]
    pub height: u32,
}
