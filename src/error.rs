//! # 统一错误处理模块
//!
//! 定义 physicslab 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// physicslab 统一错误类型
#[derive(Error, Debug)]
pub enum PhysicsLabError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 解析错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to parse {format} file: {path}\nReason: {reason}")]
    ParseError {
        format: String,
        path: String,
        reason: String,
    },

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Missing value in column '{column}' at row {row}")]
    MissingValue { column: String, row: usize },

    // ─────────────────────────────────────────────────────────────
    // 数值计算错误
    // ─────────────────────────────────────────────────────────────
    #[error("{method} did not converge after {iterations} iterations")]
    NotConverged { method: String, iterations: usize },

    #[error("Not enough data for {context}: need {required}, found {found}")]
    InsufficientData {
        context: String,
        required: usize,
        found: usize,
    },

    #[error("Fit failed: {0}")]
    SingularFit(String),

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ─────────────────────────────────────────────────────────────
    // CSV 错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("Plotting failed: {0}")]
    PlotError(String),

    #[error("No files with extension '{extension}' found in: {folder}")]
    NoFilesFound { extension: String, folder: String },

    #[error("{0}")]
    Other(String),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, PhysicsLabError>;
