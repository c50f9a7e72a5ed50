//! Estadísticas descriptivas
//!
//! Resumen por columna numérica: conteo, media, desviación estándar
//! muestral, mínimo, cuartiles (interpolación lineal) y máximo.

use std::fmt;

use serde::Serialize;

use crate::models::table::DataFrame;
use crate::utils::errors::ReportError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub q50: f64,
    pub q75: f64,
    pub max: f64,
}

impl ColumnSummary {
    pub fn from_values(column: &str, values: &[f64]) -> Self {
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        Self {
            column: column.to_string(),
            count: sorted.len(),
            mean: mean(&sorted),
            std: sample_std(&sorted),
            min: sorted.first().copied().unwrap_or(f64::NAN),
            q25: quantile_sorted(&sorted, 0.25),
            q50: quantile_sorted(&sorted, 0.50),
            q75: quantile_sorted(&sorted, 0.75),
            max: sorted.last().copied().unwrap_or(f64::NAN),
        }
    }

    fn stat(&self, label: &str) -> f64 {
        match label {
            "count" => self.count as f64,
            "mean" => self.mean,
            "std" => self.std,
            "min" => self.min,
            "25%" => self.q25,
            "50%" => self.q50,
            "75%" => self.q75,
            _ => self.max,
        }
    }
}

/// Resumen de todas las columnas numéricas de un frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub columns: Vec<ColumnSummary>,
}

const ROW_LABELS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

/// Equivalente de `describe()`: solo columnas numéricas, nulos excluidos
pub fn describe(frame: &DataFrame) -> Result<Summary, ReportError> {
    let columns = frame
        .numeric_columns()
        .into_iter()
        .map(|name| {
            let values = frame.numeric_column(name)?;
            Ok(ColumnSummary::from_values(name, &values))
        })
        .collect::<Result<Vec<_>, ReportError>>()?;

    Ok(Summary { columns })
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Desviación estándar con n-1 grados de libertad
pub fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    (ss / (values.len() - 1) as f64).sqrt()
}

/// Cuantil con interpolación lineal sobre valores ya ordenados
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.columns.is_empty() {
            return write!(f, "(no numeric columns)");
        }

        let cells: Vec<Vec<String>> = self
            .columns
            .iter()
            .map(|c| ROW_LABELS.iter().map(|l| format!("{:.6}", c.stat(l))).collect())
            .collect();
        let widths: Vec<usize> = self
            .columns
            .iter()
            .zip(&cells)
            .map(|(c, col)| {
                col.iter()
                    .map(String::len)
                    .chain(std::iter::once(c.column.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        write!(f, "{:5}", "")?;
        for (c, width) in self.columns.iter().zip(&widths) {
            write!(f, "  {:>width$}", c.column, width = *width)?;
        }
        for (row, label) in ROW_LABELS.iter().enumerate() {
            write!(f, "\n{:5}", label)?;
            for (col, width) in cells.iter().zip(&widths) {
                write!(f, "  {:>width$}", col[row], width = *width)?;
            }
        }
        Ok(())
    }
}
