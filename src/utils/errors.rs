//! Sistema de manejo de errores
//!
//! Este módulo define los tipos de error del generador de reportes.
//! Los errores de base de datos se registran y se convierten en "sin resultado"
//! en la capa de reportes; el resto se propaga hasta `main`.

use thiserror::Error;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid date '{value}': expected YYYY-MM-DD")]
    DateParse {
        value: String,
        #[source]
        source: Option<chrono::ParseError>,
    },

    #[error("Column not found: {0}")]
    MissingColumn(String),

    #[error("Column '{column}' has a non-numeric value at row {row}")]
    NonNumeric { column: String, row: usize },

    #[error("Row has {actual} cells but the frame has {expected} columns")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("Chart error: {0}")]
    Chart(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_parse_message_includes_value() {
        let source = chrono::NaiveDate::parse_from_str("2019-13-01", "%Y-%m-%d").unwrap_err();
        let err = ReportError::DateParse {
            value: "2019-13-01".to_string(),
            source: Some(source),
        };
        let message = err.to_string();
        assert!(message.contains("2019-13-01"));
        assert!(message.contains("YYYY-MM-DD"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_database_error_is_flagged() {
        let err = ReportError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, ReportError::Database(_)));
        assert!(err.to_string().starts_with("Database error"));
    }
}
