//! # 文件收集
//!
//! 收集目录（含子目录）中指定扩展名的所有测量文件，
//! 以文件名（默认去掉扩展名）为键，结果按键排序。
//!
//! ## 功能
//! - 单文件输入直接返回
//! - 可选 glob 文件名过滤
//! - 可选键名变换（例如去掉日期前缀）
//!
//! ## 依赖关系
//! - 被 `commands/` 调用
//! - 使用 `walkdir` 遍历目录，`glob` 匹配文件名

use crate::error::{PhysicsLabError, Result};

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 收集 `input` 中所有 `extension` 文件，返回 `{键: 路径}`
///
/// 单文件输入直接以其文件名为键；目录递归遍历。扩展名前导的点会被忽略。
/// `trim_extension` 为 false 时键保留完整文件名，`key_edit` 最后作用于键。
pub fn gather_files<F>(
    extension: &str,
    input: &Path,
    key_edit: Option<F>,
    trim_extension: bool,
) -> Result<BTreeMap<String, PathBuf>>
where
    F: Fn(&str) -> String,
{
    let suffix = format!(".{}", extension.trim_start_matches('.'));
    let key_for = |path: &Path| -> String {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let stem = match filename.strip_suffix(&suffix) {
            Some(stem) if trim_extension => stem.to_string(),
            _ => filename,
        };
        match &key_edit {
            Some(edit) => edit(&stem),
            None => stem,
        }
    };

    if input.is_file() {
        let mut found = BTreeMap::new();
        found.insert(key_for(input), input.to_path_buf());
        return Ok(found);
    }

    if !input.is_dir() {
        return Err(PhysicsLabError::DirectoryNotFound {
            path: input.display().to_string(),
        });
    }

    let found = WalkDir::new(input)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.file_name().to_string_lossy().ends_with(&suffix))
        .map(|e| (key_for(e.path()), e.path().to_path_buf()))
        .collect();

    Ok(found)
}

/// 只保留文件名匹配 glob `pattern` 的条目
pub fn filter_by_pattern(
    files: BTreeMap<String, PathBuf>,
    pattern: &str,
) -> Result<BTreeMap<String, PathBuf>> {
    let pattern = glob::Pattern::new(pattern).map_err(|e| {
        PhysicsLabError::InvalidArgument(format!("Invalid pattern '{}': {}", pattern, e))
    })?;

    Ok(files
        .into_iter()
        .filter(|(_, path)| {
            path.file_name()
                .map_or(false, |name| pattern.matches(&name.to_string_lossy()))
        })
        .collect())
}
