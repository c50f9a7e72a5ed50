//! Gráfico de barras: total de ventas por tienda

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::{FontStyle, FontTransform};

use crate::charts::{chart_error, ensure_parent_dir, ChartFormat, ChartSpec, GRID_BACKGROUND, PRIMARY_COLOR};
use crate::models::table::DataFrame;
use crate::utils::errors::ReportError;

/// Fracción del espacio de cada categoría ocupada por la barra
pub const BAR_WIDTH: f64 = 0.5;
const EDGE_WIDTH: u32 = 3;
/// A partir de cuántas categorías las etiquetas del eje X se giran
pub const ROTATE_LABELS_AFTER: usize = 20;

/// Categorías y valores de un gráfico de barras
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl BarSeries {
    /// Tomar etiquetas y valores de dos columnas; las filas con valor nulo se omiten
    pub fn from_frame(frame: &DataFrame, label_column: &str, value_column: &str) -> Result<Self, ReportError> {
        let labels = frame.column(label_column)?;
        let values = frame.column(value_column)?;

        let mut series = Self {
            labels: Vec::with_capacity(labels.len()),
            values: Vec::with_capacity(values.len()),
        };
        for (row, (label, value)) in labels.into_iter().zip(values).enumerate() {
            if value.is_null() {
                continue;
            }
            let value = value.as_f64().ok_or_else(|| ReportError::NonNumeric {
                column: value_column.to_string(),
                row,
            })?;
            series.labels.push(label.to_string());
            series.values.push(value);
        }
        Ok(series)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Rango del eje Y: siempre incluye el cero, con 5% de margen
    pub fn y_bounds(&self) -> (f64, f64) {
        let max = self.values.iter().copied().fold(0.0, f64::max);
        let min = self.values.iter().copied().fold(0.0, f64::min);
        if max == 0.0 && min == 0.0 {
            return (0.0, 1.0);
        }
        (min * 1.05, max * 1.05)
    }

    /// Con muchas tiendas las etiquetas horizontales se solapan
    pub fn rotate_labels(&self) -> bool {
        self.len() > ROTATE_LABELS_AFTER
    }

    /// Etiqueta para una posición del eje X (solo en posiciones enteras)
    pub fn label_at(&self, x: f64) -> String {
        let rounded = x.round();
        if (x - rounded).abs() > 1e-6 || rounded < 0.0 {
            return String::new();
        }
        self.labels
            .get(rounded as usize)
            .cloned()
            .unwrap_or_default()
    }
}

/// Dibujar el gráfico de barras en `path`
pub fn render_bar_chart(
    path: &Path,
    format: ChartFormat,
    spec: &ChartSpec,
    series: &BarSeries,
) -> Result<(), ReportError> {
    ensure_parent_dir(path)?;
    match format {
        ChartFormat::Png => draw_bar_chart(BitMapBackend::new(path, spec.size).into_drawing_area(), spec, series),
        ChartFormat::Svg => draw_bar_chart(SVGBackend::new(path, spec.size).into_drawing_area(), spec, series),
    }
}

pub fn draw_bar_chart<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    spec: &ChartSpec,
    series: &BarSeries,
) -> Result<(), ReportError> {
    root.fill(&WHITE).map_err(chart_error)?;

    let (y_min, y_max) = series.y_bounds();
    let x_max = series.len().max(1) as f64 - 0.5;

    let x_label_style = if series.rotate_labels() {
        ("sans-serif", 15).into_font().transform(FontTransform::Rotate270)
    } else {
        ("sans-serif", 15).into_font()
    };
    let x_label_area = if series.rotate_labels() { 100 } else { 70 };

    let mut chart = ChartBuilder::on(&root)
        .caption(spec.title, ("sans-serif", 32).into_font().style(FontStyle::Bold))
        .margin(20)
        .x_label_area_size(x_label_area)
        .y_label_area_size(120)
        .build_cartesian_2d(-0.5f64..x_max, y_min..y_max)
        .map_err(chart_error)?;

    chart.plotting_area().fill(&GRID_BACKGROUND).map_err(chart_error)?;

    let x_formatter = |x: &f64| series.label_at(*x);
    let y_formatter = |y: &f64| format!("{:.0}", y);
    chart
        .configure_mesh()
        .disable_x_mesh()
        .bold_line_style(WHITE.stroke_width(2))
        .light_line_style(WHITE.mix(0.5).stroke_width(1))
        .x_labels(series.len().max(1))
        .x_label_formatter(&x_formatter)
        .y_label_formatter(&y_formatter)
        .x_desc(spec.x_label)
        .y_desc(spec.y_label)
        .axis_desc_style(("sans-serif", 22).into_font().style(FontStyle::Bold))
        .label_style(("sans-serif", 15))
        .x_label_style(x_label_style)
        .draw()
        .map_err(chart_error)?;

    let bar = |i: usize, v: f64| {
        let x = i as f64;
        [(x - BAR_WIDTH / 2.0, 0.0), (x + BAR_WIDTH / 2.0, v)]
    };

    chart
        .draw_series(
            series
                .values
                .iter()
                .enumerate()
                .map(|(i, v)| Rectangle::new(bar(i, *v), PRIMARY_COLOR.filled())),
        )
        .map_err(chart_error)?;
    chart
        .draw_series(
            series
                .values
                .iter()
                .enumerate()
                .map(|(i, v)| Rectangle::new(bar(i, *v), BLACK.stroke_width(EDGE_WIDTH))),
        )
        .map_err(chart_error)?;

    root.present().map_err(chart_error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::value::Value;
    use rust_decimal::Decimal;

    fn totals_frame() -> DataFrame {
        DataFrame::from_rows(
            vec!["STORE_CODE".into(), "TOTAL_VENDAS".into()],
            vec![
                vec![Value::Int(1), Value::Decimal(Decimal::new(150050, 2))],
                vec![Value::Int(2), Value::Null],
                vec![Value::Int(3), Value::Float(320.0)],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_series_from_frame_skips_nulls() {
        let series = BarSeries::from_frame(&totals_frame(), "STORE_CODE", "TOTAL_VENDAS").unwrap();
        assert_eq!(series.labels, vec!["1", "3"]);
        assert_eq!(series.values, vec![1500.5, 320.0]);
    }

    #[test]
    fn test_series_missing_column() {
        let err = BarSeries::from_frame(&totals_frame(), "STORE_CODE", "VALOR").unwrap_err();
        assert!(matches!(err, ReportError::MissingColumn(ref c) if c == "VALOR"));
    }

    #[test]
    fn test_y_bounds() {
        let series = BarSeries {
            labels: vec!["1".into(), "2".into()],
            values: vec![100.0, 200.0],
        };
        let (lo, hi) = series.y_bounds();
        assert_eq!(lo, 0.0);
        assert!((hi - 210.0).abs() < 1e-9);

        let empty = BarSeries {
            labels: vec![],
            values: vec![],
        };
        assert_eq!(empty.y_bounds(), (0.0, 1.0));
    }

    #[test]
    fn test_label_at_integer_positions_only() {
        let series = BarSeries {
            labels: vec!["1".into(), "10".into()],
            values: vec![1.0, 2.0],
        };
        assert_eq!(series.label_at(1.0), "10");
        assert_eq!(series.label_at(0.5), "");
        assert_eq!(series.label_at(-1.0), "");
        assert_eq!(series.label_at(5.0), "");
    }

    #[test]
    fn test_labels_rotate_for_many_stores() {
        let series = |n: usize| BarSeries {
            labels: (1..=n).map(|i| i.to_string()).collect(),
            values: vec![1.0; n],
        };
        assert!(!series(3).rotate_labels());
        assert!(!series(ROTATE_LABELS_AFTER).rotate_labels());
        assert!(series(50).rotate_labels());
    }

    #[test]
    fn test_render_many_stores_svg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lojas.svg");
        let series = BarSeries {
            labels: (1..=50).map(|i| i.to_string()).collect(),
            values: (1..=50).map(|i| i as f64 * 10.0).collect(),
        };

        render_bar_chart(&path, ChartFormat::Svg, &crate::charts::SALES_CHART, &series).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.lines().any(|line| line.trim() == "50"));
        assert!(svg.contains("rotate("));
    }
}
