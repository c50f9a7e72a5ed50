//! Resultado tabular de una consulta
//!
//! `DataFrame` guarda los nombres de columna (tomados de los metadatos de la
//! sentencia, así que un resultado vacío conserva sus columnas) y las filas
//! ya decodificadas.

use std::fmt;

use crate::models::value::Value;
use crate::utils::errors::ReportError;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataFrame {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl DataFrame {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Construir un frame validando que cada fila tenga una celda por columna
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self, ReportError> {
        let mut frame = Self::new(columns);
        for row in rows {
            frame.push_row(row)?;
        }
        Ok(frame)
    }

    pub fn push_row(&mut self, row: Vec<Value>) -> Result<(), ReportError> {
        if row.len() != self.columns.len() {
            return Err(ReportError::ShapeMismatch {
                expected: self.columns.len(),
                actual: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Todas las celdas de una columna, en orden de fila
    pub fn column(&self, name: &str) -> Result<Vec<&Value>, ReportError> {
        let idx = self
            .column_index(name)
            .ok_or_else(|| ReportError::MissingColumn(name.to_string()))?;
        Ok(self.rows.iter().map(|row| &row[idx]).collect())
    }

    /// Valores numéricos de una columna; los nulos se omiten
    pub fn numeric_column(&self, name: &str) -> Result<Vec<f64>, ReportError> {
        let cells = self.column(name)?;
        let mut values = Vec::with_capacity(cells.len());
        for (row, cell) in cells.into_iter().enumerate() {
            if cell.is_null() {
                continue;
            }
            let value = cell.as_f64().ok_or_else(|| ReportError::NonNumeric {
                column: name.to_string(),
                row,
            })?;
            values.push(value);
        }
        Ok(values)
    }

    /// Columnas cuyas celdas no nulas son todas numéricas (y hay al menos una)
    pub fn numeric_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(idx, _)| {
                let mut cells = self.rows.iter().map(|row| &row[*idx]).filter(|v| !v.is_null());
                let mut any = false;
                let all_numeric = cells.all(|v| {
                    any = true;
                    v.is_numeric()
                });
                any && all_numeric
            })
            .map(|(_, name)| name.as_str())
            .collect()
    }
}

impl fmt::Display for DataFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rows.is_empty() {
            writeln!(f, "Empty DataFrame")?;
            writeln!(f, "Columns: [{}]", self.columns.join(", "))?;
            return write!(f, "Index: []");
        }

        let cells: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| row.iter().map(ToString::to_string).collect())
            .collect();

        let index_width = (self.rows.len() - 1).to_string().len();
        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                cells
                    .iter()
                    .map(|row| row[idx].chars().count())
                    .chain(std::iter::once(name.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        write!(f, "{:>width$}", "", width = index_width)?;
        for (name, width) in self.columns.iter().zip(&widths) {
            write!(f, "  {}", pad_left(name, *width))?;
        }

        for (i, row) in cells.iter().enumerate() {
            writeln!(f)?;
            write!(f, "{:>width$}", i, width = index_width)?;
            for (cell, width) in row.iter().zip(&widths) {
                write!(f, "  {}", pad_left(cell, *width))?;
            }
        }
        Ok(())
    }
}

// `{:>}` mide en bytes; aquí se alinea por caracteres
fn pad_left(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", " ".repeat(width.saturating_sub(len)), text)
}
