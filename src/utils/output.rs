//! # 美化输出工具
//!
//! 终端状态行、物理量输出与结果表格。
//!
//! ## 依赖关系
//! - 被所有 `commands/` 模块使用
//! - 使用 `colored`, `tabled` crate

use colored::Colorize;
use tabled::builder::Builder;

/// 打印成功消息
pub fn print_success(msg: &str) {
    println!("{} {}", "[OK]".green().bold(), msg);
}

/// 打印错误消息
pub fn print_error(msg: &str) {
    eprintln!("{} {}", "[ERR]".red().bold(), msg);
}

/// 打印警告消息
pub fn print_warning(msg: &str) {
    println!("{} {}", "[WARN]".yellow().bold(), msg);
}

/// 打印信息消息
pub fn print_info(msg: &str) {
    println!("{} {}", "[*]".blue().bold(), msg);
}

/// 打印完成消息
pub fn print_done(msg: &str) {
    println!("{} {}", "[DONE]".green().bold(), msg);
}

/// 打印带单位的物理量，如 `Sheet resistance = 1.234e2 ohms per square`
pub fn print_quantity(name: &str, value: f64, unit: &str) {
    println!(
        "    {} {} {}",
        format!("{:<24}", name).dimmed(),
        format_value(value).bold(),
        unit
    );
}

/// 打印标题栏
pub fn print_header(title: &str) {
    let line = "─".repeat(60);
    println!("\n{}", line.dimmed());
    println!("  {}", title.bold());
    println!("{}\n", line.dimmed());
}

/// 打印分隔线
pub fn print_separator() {
    println!("{}", "─".repeat(60).dimmed());
}

/// 打印失败列表（最多 `limit` 条）
pub fn print_failures(failures: &[(String, String)], limit: usize) {
    if failures.is_empty() {
        return;
    }
    print_warning("Failed measurements:");
    for (name, err) in failures.iter().take(limit) {
        print_error(&format!("  {}: {}", name, err));
    }
    if failures.len() > limit {
        print_warning(&format!("  ... and {} more", failures.len() - limit));
    }
}

/// 打印表格：首行为列名
pub fn print_table(columns: &[String], rows: &[Vec<String>]) {
    let mut builder = Builder::default();
    builder.push_record(columns.iter().cloned());
    for row in rows {
        builder.push_record(row.iter().cloned());
    }
    println!("{}", builder.build());
}

/// 统一的数值格式（科学计数法，保留 4 位有效数字）
pub fn format_value(value: f64) -> String {
    if value.is_nan() {
        "-".to_string()
    } else if value == 0.0 || (1e-3..1e4).contains(&value.abs()) {
        format!("{:.4}", value)
    } else {
        format!("{:.4e}", value)
    }
}
