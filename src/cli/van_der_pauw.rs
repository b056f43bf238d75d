//! # van-der-pauw 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/van_der_pauw.rs`

use super::batch::BatchArgs;
use clap::Args;

/// van-der-pauw 子命令参数
#[derive(Args, Debug)]
pub struct VanDerPauwArgs {
    #[command(flatten)]
    pub batch: BatchArgs,

    /// Sample thickness in metres, enables resistivity
    #[arg(long)]
    pub thickness: Option<f64>,
}
