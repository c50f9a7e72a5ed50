//! Consultar y graficar
//!
//! Cada función ejecuta su consulta, calcula el resumen descriptivo y
//! escribe el gráfico si los ajustes lo permiten.

use std::path::PathBuf;

use log::{error, info};

use crate::analysis::describe::{describe, ColumnSummary, Summary};
use crate::charts::bar::{render_bar_chart, BarSeries};
use crate::charts::histogram::{render_histogram, HistogramPlot, DEFAULT_BINS};
use crate::charts::{IMDB_CHART, SALES_CHART};
use crate::config::environment::ReportSettings;
use crate::database::query::QuerySource;
use crate::reports::SalesReport;
use crate::utils::errors::ReportError;

pub const SALES_CHART_FILE: &str = "vendas_por_loja";
pub const IMDB_CHART_FILE: &str = "avaliacoes_imdb";

const STORE_COLUMN: &str = "STORE_CODE";
const TOTAL_COLUMN: &str = "TOTAL_VENDAS";
const RATING_COLUMN: &str = "rating";

/// Resultado de un gráfico: resumen de los datos y archivo escrito
#[derive(Debug, Clone, PartialEq)]
pub struct PlotOutcome {
    pub summary: Summary,
    pub path: Option<PathBuf>,
}

/// Gráfico de barras del total de ventas por tienda.
///
/// `Ok(None)` cuando la consulta no devolvió resultado.
pub async fn plot_sales<S: QuerySource>(
    report: &SalesReport<S>,
    settings: &ReportSettings,
) -> Result<Option<PlotOutcome>, ReportError> {
    let Some(frame) = report.store_sales_totals().await else {
        error!("❌ Sin datos de ventas por tienda, se omite el gráfico");
        return Ok(None);
    };

    let summary = describe(&frame)?;
    let series = BarSeries::from_frame(&frame, STORE_COLUMN, TOTAL_COLUMN)?;

    let path = if settings.render_charts {
        let path = settings.chart_path(SALES_CHART_FILE);
        render_bar_chart(&path, settings.chart_format, &SALES_CHART, &series)?;
        info!("📈 Gráfico de ventas guardado en {}", path.display());
        Some(path)
    } else {
        None
    };

    Ok(Some(PlotOutcome { summary, path }))
}

/// Histograma de las notas de IMDb con curva de densidad
pub async fn plot_imdb<S: QuerySource>(
    report: &SalesReport<S>,
    settings: &ReportSettings,
) -> Result<Option<PlotOutcome>, ReportError> {
    let Some(frame) = report.imdb_ratings().await else {
        error!("❌ Sin notas de IMDb, se omite el histograma");
        return Ok(None);
    };

    let ratings = frame.numeric_column(RATING_COLUMN)?;
    let summary = Summary {
        columns: vec![ColumnSummary::from_values(RATING_COLUMN, &ratings)],
    };
    let plot = HistogramPlot::from_values(&ratings, DEFAULT_BINS);

    let path = if settings.render_charts {
        let path = settings.chart_path(IMDB_CHART_FILE);
        render_histogram(&path, settings.chart_format, &IMDB_CHART, &plot)?;
        info!("📈 Histograma guardado en {}", path.display());
        Some(path)
    } else {
        None
    };

    Ok(Some(PlotOutcome { summary, path }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::table::DataFrame;
    use crate::models::value::Value;
    use crate::charts::ChartFormat;
    use crate::reports::sales_report::tests::RecordingSource;

    fn svg_into(dir: &std::path::Path) -> ReportSettings {
        ReportSettings {
            output_dir: dir.to_path_buf(),
            chart_format: ChartFormat::Svg,
            render_charts: true,
        }
    }

    fn svg_text_lines(svg: &str) -> Vec<&str> {
        svg.lines().map(str::trim).collect()
    }

    fn no_render() -> ReportSettings {
        ReportSettings {
            render_charts: false,
            ..ReportSettings::default()
        }
    }

    #[tokio::test]
    async fn test_plot_sales_summarizes_totals() {
        let frame = DataFrame::from_rows(
            vec![STORE_COLUMN.into(), TOTAL_COLUMN.into()],
            vec![
                vec![Value::Int(1), Value::Float(100.0)],
                vec![Value::Int(2), Value::Float(300.0)],
            ],
        )
        .unwrap();
        let report = SalesReport::new(RecordingSource::returning(Some(frame)));

        let outcome = plot_sales(&report, &no_render()).await.unwrap().unwrap();
        assert!(outcome.path.is_none());
        assert_eq!(outcome.summary.columns.len(), 2);
        assert_eq!(outcome.summary.columns[1].column, TOTAL_COLUMN);
        assert_eq!(outcome.summary.columns[1].mean, 200.0);
    }

    #[tokio::test]
    async fn test_plot_sales_without_data_is_skipped() {
        let report = SalesReport::new(RecordingSource::returning(None));
        assert!(plot_sales(&report, &no_render()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_plot_imdb_requires_rating_column() {
        let frame = DataFrame::from_rows(vec!["score".into()], vec![vec![Value::Float(7.0)]]).unwrap();
        let report = SalesReport::new(RecordingSource::returning(Some(frame)));

        let err = plot_imdb(&report, &no_render()).await.unwrap_err();
        assert!(matches!(err, ReportError::MissingColumn(ref c) if c == RATING_COLUMN));
    }

    #[tokio::test]
    async fn test_plot_imdb_summary() {
        let frame = DataFrame::from_rows(
            vec![RATING_COLUMN.into()],
            vec![
                vec![Value::Float(6.0)],
                vec![Value::Null],
                vec![Value::Float(8.0)],
            ],
        )
        .unwrap();
        let report = SalesReport::new(RecordingSource::returning(Some(frame)));

        let outcome = plot_imdb(&report, &no_render()).await.unwrap().unwrap();
        assert_eq!(outcome.summary.columns[0].count, 2);
        assert_eq!(outcome.summary.columns[0].q50, 7.0);
    }

    #[tokio::test]
    async fn test_plot_sales_writes_svg() {
        let dir = tempfile::tempdir().unwrap();
        let frame = DataFrame::from_rows(
            vec![STORE_COLUMN.into(), TOTAL_COLUMN.into()],
            vec![
                vec![Value::Int(1), Value::Float(1200.0)],
                vec![Value::Int(2), Value::Float(800.0)],
                vec![Value::Int(3), Value::Float(450.5)],
            ],
        )
        .unwrap();
        let report = SalesReport::new(RecordingSource::returning(Some(frame)));

        let outcome = plot_sales(&report, &svg_into(dir.path())).await.unwrap().unwrap();
        let path = outcome.path.unwrap();
        assert_eq!(path, dir.path().join("vendas_por_loja.svg"));
        assert!(path.exists());

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("Total de Vendas por Loja"));
        let lines = svg_text_lines(&svg);
        for store in ["1", "2", "3"] {
            assert!(lines.contains(&store), "missing tick label {store}");
        }
    }

    #[tokio::test]
    async fn test_plot_imdb_writes_svg() {
        let dir = tempfile::tempdir().unwrap();
        let ratings = [5.5, 6.1, 6.8, 7.0, 7.2, 7.9, 8.4, 8.8];
        let frame = DataFrame::from_rows(
            vec![RATING_COLUMN.into()],
            ratings.iter().map(|r| vec![Value::Float(*r)]).collect(),
        )
        .unwrap();
        let report = SalesReport::new(RecordingSource::returning(Some(frame)));

        let outcome = plot_imdb(&report, &svg_into(dir.path())).await.unwrap().unwrap();
        let path = outcome.path.unwrap();
        assert_eq!(path, dir.path().join("avaliacoes_imdb.svg"));

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("(IMDb)"));
        assert!(svg.contains("Notas (2-9)"));
    }
}
