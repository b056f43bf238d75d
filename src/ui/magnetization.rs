//! # 磁化曲线子图
//!
//! 绘制测量磁化强度、抗磁 / 铁磁模拟曲线与残余部分。
//!
//! ## 依赖关系
//! - 被 `ui/grid.rs` 的网格绘制调用
//! - 使用 `experiment/magnetism_type.rs` 的 Measurement

use super::grid::PlotValue;
use super::plot_error;
use crate::error::Result;
use crate::experiment::magnetism_type::{Measurement, Separation};

use plotters::coord::Shift;
use plotters::prelude::*;

/// 模拟曲线每个扫描分支的采样点数
const SWEEP_POINTS: usize = 200;

/// 绘制单个测量的分离结果
///
/// 测量值与残余画在测量磁场上；抗磁与铁磁分量在覆盖同一磁场范围的
/// 稠密扫描上模拟。
pub fn plot_separation<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    name: &str,
    measurement: &Measurement,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let field = measurement.field();
    let pair = |x: &[f64], y: &[f64]| -> Vec<(f64, f64)> {
        x.iter()
            .zip(y)
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .map(|(x, y)| (*x, *y))
            .collect()
    };

    let mut series: Vec<(&str, Vec<(f64, f64)>, RGBColor)> = vec![
        ("measured", pair(field, measurement.magnetization()), BLACK),
        ("residual", pair(field, measurement.residual()), RGBColor(0, 153, 76)),
    ];

    let (b_min, b_max) = finite_range(field.iter());
    let sweep = dense_sweep(b_min, b_max);
    if let Some(curve) = measurement.simulate_diamagnetism(&sweep) {
        series.push(("diamagnetic", pair(&sweep, &curve), RGBColor(0, 102, 204)));
    }
    if let Some(curve) = measurement.simulate_ferromagnetism(&sweep) {
        series.push(("ferromagnetic", pair(&sweep, &curve), RGBColor(204, 0, 0)));
    }

    let (x_min, x_max) = padded_range(field.iter());
    let (y_min, y_max) =
        padded_range(series.iter().flat_map(|(_, points, _)| points.iter().map(|(_, y)| y)));

    let mut chart = ChartBuilder::on(area)
        .caption(name, ("sans-serif", 18).into_font())
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(55)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(plot_error)?;

    chart
        .configure_mesh()
        .x_desc("B")
        .y_desc("M")
        .x_labels(5)
        .y_labels(5)
        .label_style(("sans-serif", 12))
        .draw()
        .map_err(plot_error)?;

    for (label, points, color) in series {
        chart
            .draw_series(LineSeries::new(points, color.stroke_width(2)))
            .map_err(plot_error)?
            .label(label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 15, y)], &color));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .label_font(("sans-serif", 11))
        .draw()
        .map_err(plot_error)?;

    Ok(())
}

/// 磁场扫描 max → min → max
fn dense_sweep(min: f64, max: f64) -> Vec<f64> {
    let step = (max - min) / SWEEP_POINTS as f64;
    let down = (0..=SWEEP_POINTS).map(|i| max - i as f64 * step);
    let up = (1..=SWEEP_POINTS).map(|i| min + i as f64 * step);
    down.chain(up).collect()
}

/// 有限值的最小值与最大值，无有限值时为 (0, 0)
fn finite_range<'a>(values: impl Iterator<Item = &'a f64>) -> (f64, f64) {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if min.is_finite() {
        (min, max)
    } else {
        (0.0, 0.0)
    }
}

/// 有限值的范围，两端各留 5% 余量
fn padded_range<'a>(values: impl Iterator<Item = &'a f64>) -> (f64, f64) {
    let mut values = values.filter(|v| v.is_finite()).peekable();
    if values.peek().is_none() {
        return (-1.0, 1.0);
    }
    let (min, max) = finite_range(values);
    let pad = if max > min { 0.05 * (max - min) } else { 1.0 };
    (min - pad, max + pad)
}

/// 网格单元格：(测量名称, 分离结果)
#[derive(Debug, Clone, Copy, Default)]
pub struct SeparationPlot;

impl PlotValue<(String, Separation)> for SeparationPlot {
    fn plot<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        value: &(String, Separation),
    ) -> Result<()>
    where
        DB::ErrorType: 'static,
    {
        let (name, separation) = value;
        plot_separation(area, name, &separation.measurement)
    }
}
