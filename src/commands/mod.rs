//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `experiment/`, `io/`, `ui/`, `utils/`
//! - 子模块: van_der_pauw, hall, magnetism, curie, geometry

pub mod curie;
pub mod geometry;
pub mod hall;
pub mod magnetism;
pub mod van_der_pauw;

use crate::cli::batch::BatchArgs;
use crate::cli::Commands;
use crate::error::{PhysicsLabError, Result};
use crate::experiment::{self, Experiment};
use crate::io;
use crate::utils::output;

/// 失败列表最多显示的条数
const MAX_LISTED_FAILURES: usize = 10;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::VanDerPauw(args) => van_der_pauw::execute(args),
        Commands::Hall(args) => hall::execute(args),
        Commands::Magnetism(args) => magnetism::execute(args),
        Commands::Curie(args) => curie::execute(args),
        Commands::Geometry(args) => geometry::execute(args),
    }
}

/// 测量类命令的公共流程：收集文件 → 并行处理 → 打印表格 → 导出 CSV
///
/// 返回成功处理的 (测量名称, 结果)，顺序与文件名排序一致。
pub(crate) fn run_batch<E: Experiment>(
    experiment: &E,
    args: &BatchArgs,
) -> Result<Vec<(String, E::Output)>> {
    output::print_header(E::NAME);

    let mut measurements = io::gather_files::<fn(&str) -> String>(
        &args.extension,
        &args.input,
        None,
        !args.keep_extension,
    )?;
    if let Some(pattern) = &args.pattern {
        measurements = io::filter_by_pattern(measurements, pattern)?;
    }

    if measurements.is_empty() {
        return Err(PhysicsLabError::NoFilesFound {
            extension: args.extension.clone(),
            folder: args.input.display().to_string(),
        });
    }
    output::print_info(&format!(
        "Found {} measurement(s) in '{}'",
        measurements.len(),
        args.input.display()
    ));

    let (table, outputs) = experiment::process(experiment, &measurements, args.jobs)?;

    if table.is_empty() {
        output::print_warning("No measurement could be processed.");
    } else {
        output::print_table(&table.header(), &table.indexed_rows());
    }
    output::print_failures(&table.failures, MAX_LISTED_FAILURES);

    if let Some(path) = &args.output {
        io::export::write_results(&table, path)?;
        output::print_done(&format!("Results written to '{}'", path.display()));
    }

    output::print_success(&format!(
        "Processed {}/{} measurements",
        table.rows.len(),
        measurements.len()
    ));

    Ok(outputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::experiment::van_der_pauw::VanDerPauw;
    use std::fs;
    use std::path::Path;

    fn batch_args(input: &Path, output: &Path) -> BatchArgs {
        BatchArgs {
            input: input.to_path_buf(),
            output: Some(output.to_path_buf()),
            extension: "csv".to_string(),
            pattern: None,
            keep_extension: false,
            jobs: 2,
        }
    }

    #[test]
    fn test_run_batch_exports_results() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data");
        fs::create_dir_all(data.join("day2")).unwrap();
        fs::write(
            data.join("square.csv"),
            "Geometry,Voltage,Current,Resistance\nR1234,,,5.0\nR2341,,,5.0\n",
        )
        .unwrap();
        fs::write(
            data.join("day2").join("film.csv"),
            "Geometry,Voltage,Current,Resistance\nR1234,2.0,0.1,\nR2143,2.2,0.1,\nR2341,1.0,0.1,\nR4123,1.0,0.1,\n",
        )
        .unwrap();
        fs::write(data.join("broken.csv"), "Geometry,Voltage,Current,Resistance\nR1234,,,5.0\n").unwrap();
        fs::write(data.join("notes.txt"), "not a measurement").unwrap();

        let output = dir.path().join("results.csv");
        let experiment = VanDerPauw {
            thickness: Some(1e-7),
        };
        let outputs = run_batch(&experiment, &batch_args(&data, &output)).unwrap();

        let names: Vec<&str> = outputs.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["film", "square"]);

        let content = fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "name,sheet_resistance,ratio,resistivity");
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("film,"));
        assert!(lines[1].contains(",2.1,"));
        assert!(lines[2].starts_with("square,"));
        assert!(lines[2].contains(",1.0,"));
        assert!(!content.contains("broken"));
    }

    #[test]
    fn test_run_batch_pattern_and_empty_input() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("vdp_a.csv"),
            "Geometry,Resistance\nR1234,3.0\nR2341,3.0\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("other.csv"),
            "Geometry,Resistance\nR1234,4.0\nR2341,4.0\n",
        )
        .unwrap();
        let output = dir.path().join("out").join("results.csv");
        fs::create_dir(dir.path().join("out")).unwrap();

        let mut args = batch_args(dir.path(), &output);
        args.pattern = Some("vdp_*".to_string());
        args.keep_extension = true;
        let outputs = run_batch(&VanDerPauw::default(), &args).unwrap();
        assert_eq!(outputs.len(), 1);
        assert_eq!(outputs[0].0, "vdp_a.csv");

        let content = fs::read_to_string(&output).unwrap();
        assert!(content.starts_with("name,sheet_resistance,ratio,resistivity\nvdp_a.csv,"));

        args.pattern = Some("none_*".to_string());
        assert!(matches!(
            run_batch(&VanDerPauw::default(), &args),
            Err(PhysicsLabError::NoFilesFound { .. })
        ));
    }
}
