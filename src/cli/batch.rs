//! # 批量处理共用参数
//!
//! 所有测量类子命令共用的输入 / 输出 / 并行选项。
//!
//! ## 依赖关系
//! - 被各测量子命令的参数结构 `#[command(flatten)]` 引用
//! - 参数传递给 `commands/mod.rs` 的 `run_batch`

use clap::Args;
use std::path::PathBuf;

/// 批量处理参数
#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    /// Measurement file or directory searched recursively
    pub input: PathBuf,

    /// Export the results table to this CSV file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Extension of measurement files
    #[arg(short, long, env = "PHYSICSLAB_EXTENSION", default_value = "csv")]
    pub extension: String,

    /// Only process files whose name matches this glob pattern
    #[arg(short, long)]
    pub pattern: Option<String>,

    /// Keep the file extension in measurement names
    #[arg(long)]
    pub keep_extension: bool,

    /// Number of parallel jobs (0 = number of CPUs)
    #[arg(short, long, env = "PHYSICSLAB_JOBS", default_value_t = 0)]
    pub jobs: usize,
}
