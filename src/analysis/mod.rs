//! Análisis de resultados
//!
//! Estadísticas descriptivas y preparación de datos para los gráficos.

pub mod describe;
pub mod histogram;

pub use describe::{describe, ColumnSummary, Summary};
pub use histogram::{gaussian_kde, histogram, kde_counts, Histogram, HistogramBin};
