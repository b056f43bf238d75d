//! # curie 命令实现
//!
//! ## 依赖关系
//! - 使用 `cli/curie.rs` 定义的参数
//! - 使用 `experiment/curie_temperature.rs`

use super::run_batch;
use crate::cli::curie::CurieArgs;
use crate::error::Result;
use crate::experiment::curie_temperature::CurieTemperature;
use crate::utils::output;

/// 执行 curie 命令
pub fn execute(args: CurieArgs) -> Result<()> {
    let experiment = CurieTemperature {
        percentage: args.percentage,
    };
    let outputs = run_batch(&experiment, &args.batch)?;

    if let [(name, result)] = outputs.as_slice() {
        output::print_separator();
        output::print_info(name);
        output::print_quantity("Curie temperature", result.curie_temperature, "K");
    }

    Ok(())
}
