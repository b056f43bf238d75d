//! # 测量数据读取
//!
//! 从带表头的 CSV 文件读取测量记录，列名由各实验记录类型的
//! `serde` 属性决定（如 `Geometry`, `Voltage`, `B`, `M`）。
//!
//! ## 依赖关系
//! - 被 `experiment/` 各模块的 `process_file` 调用
//! - 使用 `csv` + `serde`

use crate::error::{PhysicsLabError, Result};

use serde::de::DeserializeOwned;
use std::path::Path;

/// 读取 CSV 文件为记录列表
pub fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Err(PhysicsLabError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let reader = reader_builder().from_path(path)?;
    deserialize(reader, &path.display().to_string())
}

/// 从字符串读取记录
#[cfg(test)]
pub(crate) fn parse_records<T: DeserializeOwned>(content: &str) -> Result<Vec<T>> {
    deserialize(reader_builder().from_reader(content.as_bytes()), "<memory>")
}

/// 去除空白，`#` 开头的行为注释
fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.trim(csv::Trim::All).comment(Some(b'#'));
    builder
}

fn deserialize<R: std::io::Read, T: DeserializeOwned>(
    mut reader: csv::Reader<R>,
    source: &str,
) -> Result<Vec<T>> {
    reader
        .deserialize()
        .enumerate()
        .map(|(i, record)| {
            record.map_err(|e| PhysicsLabError::ParseError {
                format: "CSV".to_string(),
                path: source.to_string(),
                reason: format!("row {}: {}", i + 1, e),
            })
        })
        .collect()
}
