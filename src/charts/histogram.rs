//! Histograma con curva de densidad: notas de IMDb

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontStyle;

use crate::analysis::histogram::{histogram, kde_counts, Histogram};
use crate::charts::{chart_error, ensure_parent_dir, ChartFormat, ChartSpec, GRID_BACKGROUND, PRIMARY_COLOR};
use crate::utils::errors::ReportError;

pub const DEFAULT_BINS: usize = 20;
const KDE_POINTS: usize = 200;
const EDGE_WIDTH: u32 = 2;

/// Datos ya preparados para dibujar
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramPlot {
    pub histogram: Histogram,
    pub density: Vec<(f64, f64)>,
}

impl HistogramPlot {
    pub fn from_values(values: &[f64], bins: usize) -> Self {
        let histogram = histogram(values, bins);
        let density = kde_counts(values, &histogram, KDE_POINTS);
        Self { histogram, density }
    }

    pub fn x_bounds(&self) -> (f64, f64) {
        match self.histogram.range() {
            Some((lo, hi)) => {
                let pad = (hi - lo) * 0.02;
                (lo - pad, hi + pad)
            }
            None => (0.0, 1.0),
        }
    }

    pub fn y_max(&self) -> f64 {
        let peak = self
            .density
            .iter()
            .map(|(_, y)| *y)
            .fold(self.histogram.max_count() as f64, f64::max);
        if peak <= 0.0 {
            1.0
        } else {
            peak * 1.1
        }
    }
}

/// Dibujar el histograma en `path`
pub fn render_histogram(
    path: &Path,
    format: ChartFormat,
    spec: &ChartSpec,
    plot: &HistogramPlot,
) -> Result<(), ReportError> {
    ensure_parent_dir(path)?;
    match format {
        ChartFormat::Png => draw_histogram(BitMapBackend::new(path, spec.size).into_drawing_area(), spec, plot),
        ChartFormat::Svg => draw_histogram(SVGBackend::new(path, spec.size).into_drawing_area(), spec, plot),
    }
}

pub fn draw_histogram<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    spec: &ChartSpec,
    plot: &HistogramPlot,
) -> Result<(), ReportError> {
    root.fill(&WHITE).map_err(chart_error)?;

    let (x_min, x_max) = plot.x_bounds();
    let mut chart = ChartBuilder::on(&root)
        .caption(spec.title, ("sans-serif", 32).into_font().style(FontStyle::Bold))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(90)
        .build_cartesian_2d(x_min..x_max, 0f64..plot.y_max())
        .map_err(chart_error)?;

    chart.plotting_area().fill(&GRID_BACKGROUND).map_err(chart_error)?;

    let x_formatter = |x: &f64| format!("{:.1}", x);
    let y_formatter = |y: &f64| format!("{:.0}", y);
    chart
        .configure_mesh()
        .bold_line_style(WHITE.stroke_width(2))
        .light_line_style(WHITE.mix(0.5).stroke_width(1))
        .x_label_formatter(&x_formatter)
        .y_label_formatter(&y_formatter)
        .x_desc(spec.x_label)
        .y_desc(spec.y_label)
        .axis_desc_style(("sans-serif", 20))
        .label_style(("sans-serif", 15))
        .draw()
        .map_err(chart_error)?;

    let bins = &plot.histogram.bins;
    chart
        .draw_series(bins.iter().map(|b| {
            Rectangle::new([(b.start, 0.0), (b.end, b.count as f64)], PRIMARY_COLOR.mix(0.6).filled())
        }))
        .map_err(chart_error)?;
    chart
        .draw_series(bins.iter().map(|b| {
            Rectangle::new([(b.start, 0.0), (b.end, b.count as f64)], BLACK.stroke_width(EDGE_WIDTH))
        }))
        .map_err(chart_error)?;

    if !plot.density.is_empty() {
        chart
            .draw_series(LineSeries::new(
                plot.density.iter().copied(),
                PRIMARY_COLOR.stroke_width(3),
            ))
            .map_err(chart_error)?;
    }

    root.present().map_err(chart_error)?;
    Ok(())
}
