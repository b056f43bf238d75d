//! # physicslab - 物理实验室测量数据处理工具
//!
//! 将常见的实验室测量分析统一成单一可执行文件，支持单个文件或整个目录的批量处理。
//!
//! ## 子命令
//! - `van-der-pauw` - Van der Pauw 方块电阻
//! - `hall` - 霍尔效应（面载流子密度、导电类型、迁移率）
//! - `magnetism` - 磁化曲线的抗磁 / 铁磁分离
//! - `curie` - 居里温度
//! - `geometry` - 接触构型分类与对称变换
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── experiment/ (分析算法)
//!   │     ├── io/         (文件收集、读取、导出)
//!   │     └── ui/         (网格绘图)
//!   ├── batch/      (并行批处理)
//!   ├── math/       (拟合与求根)
//!   ├── curves/     (直线、磁滞回线)
//!   ├── electricity.rs (电学量)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod curves;
mod electricity;
mod error;
mod experiment;
mod io;
mod math;
mod ui;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
