use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::debug;

use super::macros::polar;
use super::{BmiChart, Chart, MacroChart};
use crate::error::{DietError, Result};
use crate::health::hex_rgb;

/// Pixel size of every rendered chart.
pub const CHART_SIZE: (u32, u32) = (800, 700);

const BACKGROUND: RGBColor = RGBColor(240, 240, 240);
const TITLE_COLOR: RGBColor = RGBColor(0x2c, 0x3e, 0x50);
const TEXT_COLOR: RGBColor = RGBColor(0x7f, 0x7f, 0x7f);

/// Inner radius of the donut, relative to the outer one.
const DONUT_HOLE: f64 = 0.4;

fn chart_err<E: std::fmt::Display>(e: E) -> DietError {
    DietError::Chart(e.to_string())
}

fn color(hex: &str) -> RGBColor {
    let (r, g, b) = hex_rgb(hex);
    RGBColor(r, g, b)
}

/// Draw a chart to a PNG file.
pub fn render_png(chart: &Chart, path: &Path) -> Result<()> {
    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&BACKGROUND).map_err(chart_err)?;

    match chart {
        Chart::Bmi(bmi) => draw_bmi(&root, bmi)?,
        Chart::Macro(macros) => draw_macros(&root, macros)?,
    }

    root.present().map_err(chart_err)?;
    debug!(path = %path.display(), title = chart.title(), "Rendered chart");
    Ok(())
}

fn draw_bmi<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, chart: &BmiChart) -> Result<()> {
    let (axis_min, axis_max) = chart.axis;

    let mut plot = ChartBuilder::on(root)
        .caption(
            &chart.title,
            ("sans-serif", 28).into_font().color(&TITLE_COLOR),
        )
        .margin(20)
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .build_cartesian_2d(0f64..1f64, axis_min..axis_max)
        .map_err(chart_err)?;

    plot.configure_mesh()
        .disable_x_mesh()
        .disable_x_axis()
        .y_desc("BMI Value")
        .label_style(("sans-serif", 16).into_font().color(&TEXT_COLOR))
        .draw()
        .map_err(chart_err)?;

    plot.draw_series(chart.segments.iter().map(|s| {
        let (lo, hi) = s.visible_span();
        Rectangle::new([(0.3, lo), (0.7, hi)], color(s.color).filled())
    }))
    .map_err(chart_err)?;

    plot.draw_series(chart.segments.iter().map(|s| {
        Text::new(
            s.band.name().to_string(),
            (0.45, s.label_position()),
            ("sans-serif", 16).into_font().color(&WHITE),
        )
    }))
    .map_err(chart_err)?;

    let marker = &chart.marker;
    plot.draw_series(std::iter::once(Circle::new(
        (0.5, marker.position),
        12,
        color(marker.color).filled(),
    )))
    .map_err(chart_err)?;
    plot.draw_series(std::iter::once(Circle::new(
        (0.5, marker.position),
        12,
        BLACK.stroke_width(2),
    )))
    .map_err(chart_err)?;

    // Keep the label inside the plot when the marker sits at the top.
    let label_y = (marker.position + 1.0).min(axis_max - 1.0);
    plot.draw_series(std::iter::once(Text::new(
        marker.label.clone(),
        (0.72, label_y),
        ("sans-serif", 18).into_font().color(&BLACK),
    )))
    .map_err(chart_err)?;

    Ok(())
}

fn draw_macros<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    chart: &MacroChart,
) -> Result<()> {
    let root = root
        .titled(
            &chart.title,
            ("sans-serif", 28).into_font().color(&TITLE_COLOR),
        )
        .map_err(chart_err)?;
    let panels = root.split_evenly((1, 2));
    let (Some(pie_area), Some(bar_area)) = (panels.first(), panels.get(1)) else {
        return Err(DietError::Chart("cannot split drawing area".to_string()));
    };

    draw_donut(pie_area, chart)?;
    draw_gram_bars(bar_area, chart)?;
    Ok(())
}

fn draw_donut<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    chart: &MacroChart,
) -> Result<()> {
    let mut plot = ChartBuilder::on(area)
        .margin(20)
        .build_cartesian_2d(-1.2f64..1.2f64, -1.2f64..1.2f64)
        .map_err(chart_err)?;

    let wedges = chart.wedges(DONUT_HOLE);
    plot.draw_series(
        wedges
            .into_iter()
            .zip(&chart.slices)
            .filter(|(points, _)| !points.is_empty())
            .map(|(points, slice)| Polygon::new(points, color(slice.color).filled())),
    )
    .map_err(chart_err)?;

    let label_radius = (1.0 + DONUT_HOLE) / 2.0;
    plot.draw_series(
        chart
            .slice_angles()
            .into_iter()
            .zip(&chart.slices)
            .filter(|(_, slice)| slice.percent > 0.0)
            .map(|((start, end), slice)| {
                let (x, y) = polar(start + (end - start) / 2.0, label_radius);
                Text::new(
                    slice.percent_label(),
                    (x - 0.25, y),
                    ("sans-serif", 16).into_font().color(&WHITE),
                )
            }),
    )
    .map_err(chart_err)?;

    Ok(())
}

fn draw_gram_bars<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    chart: &MacroChart,
) -> Result<()> {
    let count = chart.slices.len() as f64;
    let top = (chart.max_grams() * 1.2).max(1.0);

    let mut plot = ChartBuilder::on(area)
        .margin(20)
        .set_label_area_size(LabelAreaPosition::Left, 50)
        .build_cartesian_2d(0f64..count, 0f64..top)
        .map_err(chart_err)?;

    plot.configure_mesh()
        .disable_x_mesh()
        .disable_x_axis()
        .y_desc("Grams")
        .label_style(("sans-serif", 14).into_font().color(&TEXT_COLOR))
        .draw()
        .map_err(chart_err)?;

    plot.draw_series(chart.slices.iter().enumerate().map(|(i, s)| {
        let x = i as f64;
        Rectangle::new([(x + 0.15, 0.0), (x + 0.85, s.grams)], color(s.color).filled())
    }))
    .map_err(chart_err)?;

    plot.draw_series(chart.slices.iter().enumerate().map(|(i, s)| {
        Text::new(
            format!("{} {}", s.label, s.grams_label()),
            (i as f64 + 0.15, s.grams + top * 0.03),
            ("sans-serif", 14).into_font().color(&BLACK),
        )
    }))
    .map_err(chart_err)?;

    Ok(())
}
