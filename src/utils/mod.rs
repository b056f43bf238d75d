//! # 工具函数模块
//!
//! 提供美化输出、进度条、数组重排等工具。
//!
//! ## 依赖关系
//! - 被 `commands/`, `batch/`, `experiment/`, `ui/` 模块使用
//! - 子模块: array, output, progress

pub mod array;
pub mod output;
pub mod progress;
