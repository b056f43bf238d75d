//! # 输入输出模块
//!
//! 测量文件的收集、读取以及结果导出。
//!
//! ## 子模块
//! - `gather`: 按扩展名递归收集测量文件
//! - `measurement`: CSV 测量数据读取
//! - `export`: 结果表导出为 CSV
//!
//! ## 依赖关系
//! - 被 `commands/`, `experiment/` 使用
//! - 使用 `walkdir`, `glob`, `csv`, `serde`

pub mod export;
pub mod gather;
pub mod measurement;

pub use gather::{filter_by_pattern, gather_files};
pub use measurement::read_records;
