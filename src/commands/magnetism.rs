//! # magnetism 命令实现
//!
//! 批量分离磁化曲线，可选输出分离结果的网格图。
//!
//! ## 依赖关系
//! - 使用 `cli/magnetism.rs` 定义的参数
//! - 使用 `experiment/magnetism_type.rs`
//! - 使用 `ui/` 绘图，`utils/array.rs` 排列网格

use super::run_batch;
use crate::cli::magnetism::MagnetismArgs;
use crate::error::Result;
use crate::experiment::magnetism_type::MagnetismType;
use crate::ui::{self, GridOptions, SeparationPlot};
use crate::utils::array::squarificate;
use crate::utils::{output, progress};

/// 执行 magnetism 命令
pub fn execute(args: MagnetismArgs) -> Result<()> {
    let experiment = MagnetismType {
        percentage: args.percentage,
    };
    let outputs = run_batch(&experiment, &args.batch)?;

    if let [(name, separation)] = outputs.as_slice() {
        let r = &separation.result;
        output::print_separator();
        output::print_info(name);
        output::print_quantity("Susceptibility", r.magnetic_susceptibility, "");
        output::print_quantity("Offset", r.offset, "");
        output::print_quantity("Saturation", r.saturation, "");
        output::print_quantity("Remanence", r.remanence, "");
        output::print_quantity("Coercivity", r.coercivity, "");
        output::print_quantity("Ratio DM / FM", r.ratio_dm_fm, "");
        if let Some(t) = separation.measurement.temperature() {
            output::print_quantity("Temperature", t, "K");
        }
    }

    let Some(plot_path) = args.plot else {
        return Ok(());
    };
    if outputs.is_empty() {
        output::print_warning("Nothing to plot.");
        return Ok(());
    }

    let spinner = progress::create_spinner("Rendering separation plots...");
    let grid = squarificate(outputs.into_iter().map(Some).collect(), None);
    let options = GridOptions {
        title: Some("Magnetization".to_string()),
        width: args.width,
        height: args.height,
        ..GridOptions::default()
    };
    let rendered = ui::plot_grid(&grid, &plot_path, &options, &SeparationPlot);
    spinner.finish_and_clear();
    rendered?;

    output::print_done(&format!("Plot saved to '{}'", plot_path.display()));
    Ok(())
}
