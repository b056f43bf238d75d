//! # hall 命令实现
//!
//! 批量求面载流子密度与导电类型，可选载流子浓度和迁移率。
//!
//! ## 依赖关系
//! - 使用 `cli/hall.rs` 定义的参数
//! - 使用 `experiment/hall.rs`

use super::run_batch;
use crate::cli::hall::HallArgs;
use crate::electricity::Mobility;
use crate::error::Result;
use crate::experiment::hall::{Hall, HallOutput};
use crate::utils::output;

/// 执行 hall 命令
pub fn execute(args: HallArgs) -> Result<()> {
    let experiment = Hall {
        thickness: args.thickness,
        sheet_resistance: args.sheet_resistance,
        min_r_squared: args.min_r_squared,
    };
    let outputs = run_batch(&experiment, &args.batch)?;

    for (name, _) in outputs.iter().filter(|(_, output)| !output.is_valid) {
        output::print_warning(&format!(
            "{}: Hall resistance is not linear in B (R² < {})",
            name, args.min_r_squared
        ));
    }

    if let [(name, HallOutput { result, .. })] = outputs.as_slice() {
        output::print_separator();
        output::print_info(&format!("{} ({}-type)", name, result.conductivity_type));
        output::print_quantity("Sheet density", result.sheet_density, "m^-2");
        if let Some(concentration) = result.concentration {
            output::print_quantity("Concentration", concentration, "m^-3");
        }
        if let Some(mobility) = result.mobility {
            output::print_quantity("Mobility", mobility, Mobility::UNIT);
        }
    }

    Ok(())
}
