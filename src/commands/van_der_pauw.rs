//! # van-der-pauw 命令实现
//!
//! 批量求方块电阻（给出厚度时还有电阻率）；只有一个测量时额外打印物理量。
//!
//! ## 依赖关系
//! - 使用 `cli/van_der_pauw.rs` 定义的参数
//! - 使用 `experiment/van_der_pauw.rs`

use super::run_batch;
use crate::cli::van_der_pauw::VanDerPauwArgs;
use crate::electricity::{Resistivity, SheetResistance};
use crate::error::Result;
use crate::experiment::van_der_pauw::VanDerPauw;
use crate::utils::output;

/// 执行 van-der-pauw 命令
pub fn execute(args: VanDerPauwArgs) -> Result<()> {
    let experiment = VanDerPauw {
        thickness: args.thickness,
    };
    let outputs = run_batch(&experiment, &args.batch)?;

    if let [(name, result)] = outputs.as_slice() {
        output::print_separator();
        output::print_info(name);
        output::print_quantity("Sheet resistance", result.sheet_resistance, SheetResistance::UNIT);
        output::print_quantity("Ratio R_v / R_h", result.ratio, "");
        if let Some(resistivity) = result.resistivity {
            output::print_quantity("Resistivity", resistivity, Resistivity::UNIT);
        }
    }

    Ok(())
}
