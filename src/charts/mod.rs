//! Gráficos
//!
//! Los gráficos se escriben en archivos (PNG o SVG) con plotters; el
//! programa no abre ventanas.

pub mod bar;
pub mod histogram;
pub mod plots;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use plotters::style::RGBColor;

use crate::utils::errors::ReportError;

pub use plots::{plot_imdb, plot_sales, PlotOutcome};

/// Color de relleno de barras y curva
pub const PRIMARY_COLOR: RGBColor = RGBColor(0x7D, 0x3C, 0x98);
/// Fondo estilo "darkgrid"
pub const GRID_BACKGROUND: RGBColor = RGBColor(0xEA, 0xEA, 0xF2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ChartFormat {
    Png,
    Svg,
}

impl ChartFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ChartFormat::Png => "png",
            ChartFormat::Svg => "svg",
        }
    }
}

impl fmt::Display for ChartFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ChartFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(ChartFormat::Png),
            "svg" => Ok(ChartFormat::Svg),
            other => Err(ReportError::Config(format!(
                "CHART_FORMAT must be 'png' or 'svg', got '{}'",
                other
            ))),
        }
    }
}

/// Textos y tamaño de un gráfico
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub size: (u32, u32),
}

pub const SALES_CHART: ChartSpec = ChartSpec {
    title: "Total de Vendas por Loja",
    x_label: "Código da Loja",
    y_label: "Total de Vendas (R$)",
    size: (1400, 700),
};

pub const IMDB_CHART: ChartSpec = ChartSpec {
    title: "Histograma das Avaliações de Filmes (IMDb)",
    x_label: "Notas (2-9)",
    y_label: "Número de Filmes por Faixa de Nota",
    size: (1200, 600),
};

pub(crate) fn chart_error<E: fmt::Display>(e: E) -> ReportError {
    ReportError::Chart(e.to_string())
}

/// Crear el directorio de salida si hace falta
pub(crate) fn ensure_parent_dir(path: &Path) -> Result<(), ReportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}
