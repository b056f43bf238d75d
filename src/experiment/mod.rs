//! # 实验模块
//!
//! 各类实验的分析算法及统一的批量处理入口。
//!
//! ## 子模块
//! - `van_der_pauw`: Van der Pauw 方块电阻
//! - `hall`: 霍尔效应
//! - `magnetism_type`: 磁性类型分离（抗磁 / 铁磁 / 残余）
//! - `curie_temperature`: 居里温度
//!
//! ## 依赖关系
//! - 被 `commands/` 调用
//! - 使用 `batch/` 并行处理，`io/` 读取数据，`math/`, `curves/` 计算

pub mod curie_temperature;
pub mod hall;
pub mod magnetism_type;
pub mod van_der_pauw;

use crate::batch::BatchRunner;
use crate::error::Result;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// 可批量处理的实验
pub trait Experiment: Sync {
    /// 每个测量的分析结果
    type Output: Send;

    /// 实验名称（用于输出）
    const NAME: &'static str;

    /// 结果表的列名
    const PROCESS_COLUMNS: &'static [&'static str];

    /// 读取并分析单个测量文件
    fn process_file(&self, path: &Path) -> Result<Self::Output>;

    /// 将结果转换为与 `PROCESS_COLUMNS` 对应的一行
    fn row(output: &Self::Output) -> Vec<String>;
}

/// 批量处理结果表，行按测量名称索引
#[derive(Debug, Clone)]
pub struct ResultTable {
    pub columns: Vec<String>,
    pub rows: Vec<(String, Vec<String>)>,
    /// 处理失败的测量：(名称, 错误信息)
    pub failures: Vec<(String, String)>,
}

impl ResultTable {
    pub fn new(columns: &[&str]) -> Self {
        ResultTable {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// 带 `name` 索引列的表头
    pub fn header(&self) -> Vec<String> {
        std::iter::once("name".to_string())
            .chain(self.columns.iter().cloned())
            .collect()
    }

    /// 带索引的所有行
    pub fn indexed_rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|(name, row)| std::iter::once(name.clone()).chain(row.iter().cloned()).collect())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// 通用批量处理：对每个测量调用实验的 `process_file`
///
/// 结果按 `measurements` 的键顺序排列；单个测量失败不会中断整批处理。
pub fn process<E: Experiment>(
    experiment: &E,
    measurements: &BTreeMap<String, PathBuf>,
    jobs: usize,
) -> Result<(ResultTable, Vec<(String, E::Output)>)> {
    let items: Vec<(String, PathBuf)> = measurements
        .iter()
        .map(|(name, path)| (name.clone(), path.clone()))
        .collect();

    let runner = BatchRunner::new(jobs);
    let results = runner.run(items, |(name, path)| {
        (name.clone(), experiment.process_file(path))
    })?;

    let mut table = ResultTable::new(E::PROCESS_COLUMNS);
    let mut outputs = Vec::new();
    for (name, result) in results {
        match result {
            Ok(output) => {
                table.rows.push((name.clone(), E::row(&output)));
                outputs.push((name, output));
            }
            Err(e) => table.failures.push((name, e.to_string())),
        }
    }

    Ok((table, outputs))
}

/// 可选数值格式化（None 输出为空）
pub(crate) fn format_optional(value: Option<f64>) -> String {
    value.map(|v| format!("{:e}", v)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PhysicsLabError;
    use std::fs;

    struct LineCount;

    impl Experiment for LineCount {
        type Output = usize;
        const NAME: &'static str = "Line count";
        const PROCESS_COLUMNS: &'static [&'static str] = &["lines"];

        fn process_file(&self, path: &Path) -> Result<usize> {
            let content =
                fs::read_to_string(path).map_err(|e| PhysicsLabError::Other(e.to_string()))?;
            if content.is_empty() {
                return Err(PhysicsLabError::Other("empty".to_string()));
            }
            Ok(content.lines().count())
        }

        fn row(output: &usize) -> Vec<String> {
            vec![output.to_string()]
        }
    }

    #[test]
    fn test_process_keeps_order_and_failures() {
        let dir = tempfile::tempdir().unwrap();
        let mut measurements = BTreeMap::new();
        for (name, content) in [("a", "1\n2\n"), ("b", ""), ("c", "1\n")] {
            let path = dir.path().join(format!("{}.csv", name));
            fs::write(&path, content).unwrap();
            measurements.insert(name.to_string(), path);
        }

        let (table, outputs) = process(&LineCount, &measurements, 2).unwrap();
        assert_eq!(table.header(), vec!["name", "lines"]);
        assert_eq!(
            table.indexed_rows(),
            vec![vec!["a".to_string(), "2".to_string()], vec!["c".to_string(), "1".to_string()]]
        );
        assert_eq!(table.failures.len(), 1);
        assert_eq!(table.failures[0].0, "b");
        assert_eq!(outputs.len(), 2);
    }
}
