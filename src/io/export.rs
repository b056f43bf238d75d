//! # 结果导出
//!
//! 将批量处理的结果表写为 CSV，首列为测量名称。
//!
//! ## 依赖关系
//! - 被 `commands/` 调用
//! - 使用 `experiment/mod.rs` 的 ResultTable
//! - 使用 `csv` 库写入 CSV 文件

use crate::error::{PhysicsLabError, Result};
use crate::experiment::ResultTable;

use std::path::Path;

/// 导出结果表为 CSV
pub fn write_results(table: &ResultTable, output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    wtr.write_record(table.header())?;
    for row in table.indexed_rows() {
        wtr.write_record(row)?;
    }

    wtr.flush().map_err(|e| PhysicsLabError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_write_results() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");

        let mut table = ResultTable::new(&["sheet_resistance", "ratio"]);
        table
            .rows
            .push(("sample_a".to_string(), vec!["1.5e2".to_string(), "1.0".to_string()]));
        table
            .failures
            .push(("sample_b".to_string(), "bad file".to_string()));

        write_results(&table, &path).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "name,sheet_resistance,ratio\nsample_a,1.5e2,1.0\n");
    }
}
