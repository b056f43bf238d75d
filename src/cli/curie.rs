//! # curie 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/curie.rs`

use super::batch::BatchArgs;
use crate::experiment::curie_temperature::DEFAULT_PERCENTAGE;
use clap::Args;

/// curie 子命令参数
#[derive(Args, Debug)]
pub struct CurieArgs {
    #[command(flatten)]
    pub batch: BatchArgs,

    /// Width of the sliding tangent window as a share of all points (%)
    #[arg(long, default_value_t = DEFAULT_PERCENTAGE)]
    pub percentage: f64,
}
