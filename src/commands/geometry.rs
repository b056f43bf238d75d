//! # geometry 命令实现
//!
//! 打印接触构型的类别及其在各对称操作下的像。
//!
//! ## 依赖关系
//! - 使用 `cli/geometry.rs` 定义的参数
//! - 使用 `experiment/van_der_pauw.rs` 的 Geometry

use crate::cli::geometry::GeometryArgs;
use crate::error::Result;
use crate::experiment::van_der_pauw::Geometry;
use crate::utils::output;

/// 执行 geometry 命令
pub fn execute(args: GeometryArgs) -> Result<()> {
    output::print_header("Van der Pauw Geometry");

    match args.label {
        Some(label) => {
            let geometry: Geometry = label.parse()?;
            output::print_info(&format!("{} belongs to {}", geometry, geometry.classify()));
            let columns = vec!["operation".to_string(), "image".to_string(), "class".to_string()];
            output::print_table(&columns, &symmetry_rows(geometry));
        }
        None => {
            let columns: Vec<String> = [
                "geometry",
                "class",
                "rotate",
                "reflect",
                "reverse_polarity",
                "reciprocal",
            ]
            .iter()
            .map(|c| c.to_string())
            .collect();
            let rows: Vec<Vec<String>> = Geometry::ALL
                .iter()
                .map(|g| {
                    let images = [
                        g.classify(),
                        g.rotate(),
                        g.reflect(),
                        g.reverse_polarity(),
                        g.reciprocal(),
                    ];
                    std::iter::once(g.to_string())
                        .chain(images.iter().map(|image| image.to_string()))
                        .collect()
                })
                .collect();
            output::print_table(&columns, &rows);
        }
    }

    Ok(())
}

/// 各对称操作的 (操作名, 像, 像的类别)
fn symmetry_rows(geometry: Geometry) -> Vec<Vec<String>> {
    [
        ("rotate", geometry.rotate()),
        ("reflect", geometry.reflect()),
        ("reverse polarity", geometry.reverse_polarity()),
        ("reciprocal", geometry.reciprocal()),
    ]
    .iter()
    .map(|(operation, image)| {
        vec![
            operation.to_string(),
            image.to_string(),
            image.classify().to_string(),
        ]
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symmetry_rows() {
        let rows = symmetry_rows(Geometry::R1234);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0], vec!["rotate", "R2341", "RHorizontal"]);
        assert_eq!(rows[3], vec!["reciprocal", "R3412", "RVertical"]);
    }
}
