//! # hall 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/hall.rs`

use super::batch::BatchArgs;
use clap::Args;

/// hall 子命令参数
#[derive(Args, Debug)]
pub struct HallArgs {
    #[command(flatten)]
    pub batch: BatchArgs,

    /// Sample thickness in metres, enables carrier concentration
    #[arg(long)]
    pub thickness: Option<f64>,

    /// Sheet resistance in ohms per square, enables mobility
    #[arg(long)]
    pub sheet_resistance: Option<f64>,

    /// Warn about measurements whose linear fit R² is below this value
    #[arg(long, default_value_t = 0.99)]
    pub min_r_squared: f64,
}
