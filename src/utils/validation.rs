//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y conversión de tipos.

use chrono::NaiveDate;
use validator::ValidationError;

use crate::utils::errors::ReportError;

/// Formato de fecha aceptado por los reportes
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validar y convertir string a fecha (YYYY-MM-DD)
///
/// El formato es estricto: espacios al inicio o al final invalidan la fecha.
/// chrono tolera espacios antes de un campo numérico, así que se rechazan aquí.
pub fn parse_date(value: &str) -> Result<NaiveDate, ReportError> {
    if value.trim() != value {
        return Err(ReportError::DateParse {
            value: value.to_string(),
            source: None,
        });
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|source| ReportError::DateParse {
        value: value.to_string(),
        source: Some(source),
    })
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_valid() {
        let date = parse_date("2019-01-31").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2019, 1, 31).unwrap());
    }

    #[test]
    fn test_parse_date_rejects_surrounding_whitespace() {
        for value in [" 2019-03-01", "2019-03-01 ", " 2019-03-01 ", "\t2019-03-01"] {
            let err = parse_date(value).unwrap_err();
            assert!(matches!(err, ReportError::DateParse { .. }), "{value:?}");
        }
    }

    #[test]
    fn test_parse_date_rejects_other_formats() {
        for value in ["31/01/2019", "2019-02-30", "", "2019-1"] {
            let err = parse_date(value).unwrap_err();
            assert!(matches!(err, ReportError::DateParse { .. }), "{value}");
        }
    }

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("localhost").is_ok());
        assert!(validate_not_empty("   ").is_err());
    }
}
