//! # 网格图
//!
//! 子图布局与二维数据网格一一对应，空单元格留白。
//!
//! ## 布局
//! ```text
//! ┌──────────────── title ────────────────┐
//! │        col 0      col 1      col 2    │
//! │ y row0 [cell]     [cell]     [cell]   │
//! │ y row1 [cell]     [cell]              │
//! │               xlabel                  │
//! └───────────────────────────────────────┘
//! ```
//!
//! ## 依赖关系
//! - 被 `commands/magnetism.rs` 调用
//! - 使用 `plotters` 渲染 PNG / SVG

use super::plot_error;
use crate::error::{PhysicsLabError, Result};

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontTransform;
use std::path::Path;

/// 标题与标签条的宽度 (px)
const LABEL_SIZE: u32 = 40;

/// 网格图选项
#[derive(Debug, Clone)]
pub struct GridOptions {
    pub title: Option<String>,
    /// 行标签（画在第一列左侧）
    pub row_labels: Vec<String>,
    /// 列标题（画在第一行上方）
    pub col_labels: Vec<String>,
    /// 公共 x 轴标签
    pub xlabel: Option<String>,
    /// 公共 y 轴标签
    pub ylabel: Option<String>,
    /// 单个子图宽度 (px)
    pub width: u32,
    /// 单个子图高度 (px)
    pub height: u32,
}

impl Default for GridOptions {
    fn default() -> Self {
        GridOptions {
            title: None,
            row_labels: Vec::new(),
            col_labels: Vec::new(),
            xlabel: None,
            ylabel: None,
            width: 480,
            height: 360,
        }
    }
}

impl GridOptions {
    /// 子图区域外的留白：(左, 上, 下)
    fn margins(&self) -> (u32, u32, u32) {
        let strip = |present: bool| if present { LABEL_SIZE } else { 0 };
        let left = strip(self.ylabel.is_some()) + strip(!self.row_labels.is_empty());
        let top = strip(self.title.is_some()) + strip(!self.col_labels.is_empty());
        let bottom = strip(self.xlabel.is_some());
        (left, top, bottom)
    }

    fn figure_size(&self, rows: usize, cols: usize) -> (u32, u32) {
        let (left, top, bottom) = self.margins();
        (
            left + cols as u32 * self.width,
            top + rows as u32 * self.height + bottom,
        )
    }
}

/// 单元格绘制
pub trait PlotValue<T> {
    fn plot<DB: DrawingBackend>(&self, area: &DrawingArea<DB, Shift>, value: &T) -> Result<()>
    where
        DB::ErrorType: 'static;
}

/// 网格行列数，列数取最长的一行
pub fn grid_shape<T>(grid: &[Vec<Option<T>>]) -> (usize, usize) {
    let cols = grid.iter().map(|row| row.len()).max().unwrap_or(0);
    (grid.len(), cols)
}

/// 绘制网格图，扩展名为 `.svg` 时输出 SVG，否则输出 PNG
pub fn plot_grid<T, P: PlotValue<T>>(
    grid: &[Vec<Option<T>>],
    output_path: &Path,
    options: &GridOptions,
    plot_value: &P,
) -> Result<()> {
    let (rows, cols) = grid_shape(grid);
    if rows == 0 || cols == 0 {
        return Err(PhysicsLabError::InsufficientData {
            context: "plot grid".to_string(),
            required: 1,
            found: 0,
        });
    }
    let size = options.figure_size(rows, cols);

    if is_svg(output_path) {
        let root = SVGBackend::new(output_path, size).into_drawing_area();
        draw_grid(&root, grid, options, plot_value)?;
        root.present().map_err(plot_error)?;
    } else {
        let root = BitMapBackend::new(output_path, size).into_drawing_area();
        draw_grid(&root, grid, options, plot_value)?;
        root.present().map_err(plot_error)?;
    }
    Ok(())
}

fn is_svg(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map_or(false, |e| e.eq_ignore_ascii_case("svg"))
}

fn draw_grid<DB, T, P>(
    root: &DrawingArea<DB, Shift>,
    grid: &[Vec<Option<T>>],
    options: &GridOptions,
    plot_value: &P,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
    P: PlotValue<T>,
{
    root.fill(&WHITE).map_err(plot_error)?;

    let (rows, cols) = grid_shape(grid);
    let (left, top, bottom) = options.margins();
    let (_, height) = root.dim_in_pixel();

    let (header, rest) = root.split_vertically(top);
    let (body, footer) = rest.split_vertically(height - top - bottom);
    let (side, cells) = body.split_horizontally(left);

    if let Some(title) = &options.title {
        let (title_area, _) = header.split_vertically(LABEL_SIZE);
        draw_centered(&title_area, title, 28, false)?;
    }
    if !options.col_labels.is_empty() {
        let (_, labels) = header.split_vertically(top - LABEL_SIZE);
        let (_, labels) = labels.split_horizontally(left);
        for (area, label) in labels.split_evenly((1, cols)).iter().zip(&options.col_labels) {
            draw_centered(area, label, 20, false)?;
        }
    }

    if let Some(ylabel) = &options.ylabel {
        let (strip, _) = side.split_horizontally(LABEL_SIZE);
        draw_centered(&strip, ylabel, 20, true)?;
    }
    if !options.row_labels.is_empty() {
        let (_, labels) = side.split_horizontally(left - LABEL_SIZE);
        for (area, label) in labels.split_evenly((rows, 1)).iter().zip(&options.row_labels) {
            draw_centered(area, label, 20, true)?;
        }
    }

    if let Some(xlabel) = &options.xlabel {
        let (_, strip) = footer.split_horizontally(left);
        draw_centered(&strip, xlabel, 20, false)?;
    }

    let areas = cells.split_evenly((rows, cols));
    for (r, row) in grid.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            if let Some(value) = value {
                plot_value.plot(&areas[r * cols + c], value)?;
            }
        }
    }

    Ok(())
}

/// 在区域中心绘制文字，`vertical` 时逆时针旋转 90°
fn draw_centered<DB>(area: &DrawingArea<DB, Shift>, text: &str, size: u32, vertical: bool) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let (w, h) = area.dim_in_pixel();
    let mut style = TextStyle::from(("sans-serif", size).into_font())
        .pos(Pos::new(HPos::Center, VPos::Center));
    if vertical {
        style = style.transform(FontTransform::Rotate270);
    }
    area.draw_text(text, &style, (w as i32 / 2, h as i32 / 2))
        .map_err(plot_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_shape_uses_longest_row() {
        let grid = vec![vec![Some(1), Some(2), None], vec![Some(3)]];
        assert_eq!(grid_shape(&grid), (2, 3));
        assert_eq!(grid_shape::<i32>(&[]), (0, 0));
    }

    #[test]
    fn test_figure_size_includes_label_strips() {
        let plain = GridOptions::default();
        assert_eq!(plain.figure_size(2, 3), (3 * 480, 2 * 360));

        let labelled = GridOptions {
            title: Some("Magnetization".to_string()),
            col_labels: vec!["a".to_string()],
            ylabel: Some("M".to_string()),
            xlabel: Some("B".to_string()),
            ..GridOptions::default()
        };
        assert_eq!(labelled.margins(), (LABEL_SIZE, 2 * LABEL_SIZE, LABEL_SIZE));
        assert_eq!(
            labelled.figure_size(1, 1),
            (LABEL_SIZE + 480, 3 * LABEL_SIZE + 360)
        );
    }

    #[test]
    fn test_backend_selection_and_empty_grid() {
        assert!(is_svg(Path::new("out/plot.SVG")));
        assert!(!is_svg(Path::new("plot.png")));
        assert!(!is_svg(Path::new("plot")));

        struct Nothing;
        impl PlotValue<i32> for Nothing {
            fn plot<DB: DrawingBackend>(&self, _: &DrawingArea<DB, Shift>, _: &i32) -> Result<()>
            where
                DB::ErrorType: 'static,
            {
                Ok(())
            }
        }
        let empty: Vec<Vec<Option<i32>>> = Vec::new();
        assert!(plot_grid(&empty, Path::new("unused.svg"), &GridOptions::default(), &Nothing).is_err());
    }

    /// 每个单元格画一条斜率为 `value` 的直线
    struct Slope;

    impl PlotValue<f64> for Slope {
        fn plot<DB: DrawingBackend>(&self, area: &DrawingArea<DB, Shift>, value: &f64) -> Result<()>
        where
            DB::ErrorType: 'static,
        {
            let mut chart = ChartBuilder::on(area)
                .caption(format!("slope {}", value), ("sans-serif", 14))
                .build_cartesian_2d(0.0..1.0, -2.0..2.0)
                .map_err(plot_error)?;
            chart
                .draw_series(LineSeries::new(vec![(0.0, 0.0), (1.0, *value)], &BLUE))
                .map_err(plot_error)?;
            Ok(())
        }
    }

    #[test]
    fn test_plot_grid_renders_labelled_svg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.svg");
        let grid = vec![vec![Some(1.0), Some(-1.0)], vec![Some(0.5), None]];
        let options = GridOptions {
            title: Some("Magnetization".to_string()),
            row_labels: vec!["300K".to_string(), "10K".to_string()],
            col_labels: vec!["film".to_string(), "bulk".to_string()],
            xlabel: Some("B".to_string()),
            ylabel: Some("M".to_string()),
            width: 200,
            height: 150,
        };

        plot_grid(&grid, &path, &options, &Slope).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        let (width, height) = options.figure_size(2, 2);
        assert!(svg.contains(&format!("width=\"{}\"", width)));
        assert!(svg.contains(&format!("height=\"{}\"", height)));
        for text in ["Magnetization", "300K", "10K", "film", "bulk", "slope 0.5"] {
            assert!(svg.contains(text), "missing '{}'", text);
        }
    }
}
