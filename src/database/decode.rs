//! Decodificación de filas MySQL a `Value`
//!
//! El tipo SQL reportado por cada columna decide la conversión; si la
//! conversión tipada falla se intenta texto y luego bytes crudos.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use sqlx::mysql::MySqlRow;
use sqlx::{Column, Row, TypeInfo, ValueRef};

use crate::models::value::Value;

/// Familia de tipos SQL relevante para la conversión
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Null,
    Bool,
    Signed,
    Unsigned,
    Float,
    Double,
    Decimal,
    Year,
    Date,
    DateTime,
    Timestamp,
    Time,
    Text,
    Binary,
}

impl ColumnKind {
    /// Clasificar por el nombre de tipo que reporta el driver (`INT UNSIGNED`, `VARCHAR`, ...)
    pub fn from_type_name(name: &str) -> Self {
        let name = name.trim().to_ascii_uppercase();
        let base = name.split_whitespace().next().unwrap_or("");
        let unsigned = name.ends_with("UNSIGNED");

        match base {
            "NULL" => ColumnKind::Null,
            "BOOLEAN" | "BOOL" => ColumnKind::Bool,
            "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "INTEGER" | "BIGINT" if unsigned => {
                ColumnKind::Unsigned
            }
            "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "INTEGER" | "BIGINT" => ColumnKind::Signed,
            "FLOAT" => ColumnKind::Float,
            "DOUBLE" | "REAL" => ColumnKind::Double,
            "DECIMAL" | "NUMERIC" => ColumnKind::Decimal,
            "YEAR" => ColumnKind::Year,
            "DATE" => ColumnKind::Date,
            "DATETIME" => ColumnKind::DateTime,
            "TIMESTAMP" => ColumnKind::Timestamp,
            "TIME" => ColumnKind::Time,
            "BINARY" | "VARBINARY" | "TINYBLOB" | "BLOB" | "MEDIUMBLOB" | "LONGBLOB" | "BIT"
            | "GEOMETRY" => ColumnKind::Binary,
            _ => ColumnKind::Text,
        }
    }
}

/// Decodificar todas las celdas de una fila
pub fn decode_row(row: &MySqlRow) -> Result<Vec<Value>, sqlx::Error> {
    (0..row.len()).map(|idx| decode_cell(row, idx)).collect()
}

/// Decodificar una celda según el tipo de su columna
pub fn decode_cell(row: &MySqlRow, idx: usize) -> Result<Value, sqlx::Error> {
    if row.try_get_raw(idx)?.is_null() {
        return Ok(Value::Null);
    }

    let kind = ColumnKind::from_type_name(row.column(idx).type_info().name());
    match decode_typed(row, idx, kind) {
        Ok(value) => Ok(value),
        Err(err) => {
            log::debug!(
                "Decodificación {:?} falló en la columna {}: {}; probando texto",
                kind,
                row.column(idx).name(),
                err
            );
            decode_fallback(row, idx).map_err(|_| err)
        }
    }
}

fn decode_typed(row: &MySqlRow, idx: usize, kind: ColumnKind) -> Result<Value, sqlx::Error> {
    let value = match kind {
        ColumnKind::Null => Value::Null,
        ColumnKind::Bool => Value::Bool(row.try_get::<bool, _>(idx)?),
        ColumnKind::Signed => Value::Int(row.try_get::<i64, _>(idx)?),
        ColumnKind::Unsigned => Value::UInt(row.try_get::<u64, _>(idx)?),
        ColumnKind::Float => Value::Float(f64::from(row.try_get::<f32, _>(idx)?)),
        ColumnKind::Double => Value::Float(row.try_get::<f64, _>(idx)?),
        ColumnKind::Decimal => Value::Decimal(row.try_get::<Decimal, _>(idx)?),
        // YEAR no tiene tipo Rust asociado en el driver
        ColumnKind::Year => Value::Int(i64::from(row.try_get_unchecked::<u16, _>(idx)?)),
        ColumnKind::Date => Value::Date(row.try_get::<NaiveDate, _>(idx)?),
        ColumnKind::DateTime => Value::DateTime(row.try_get::<NaiveDateTime, _>(idx)?),
        ColumnKind::Timestamp => Value::Timestamp(row.try_get::<DateTime<Utc>, _>(idx)?),
        ColumnKind::Time => Value::Time(row.try_get::<NaiveTime, _>(idx)?),
        ColumnKind::Text => Value::Text(row.try_get::<String, _>(idx)?),
        ColumnKind::Binary => Value::Bytes(row.try_get::<Vec<u8>, _>(idx)?),
    };
    Ok(value)
}

fn decode_fallback(row: &MySqlRow, idx: usize) -> Result<Value, sqlx::Error> {
    if let Ok(text) = row.try_get::<String, _>(idx) {
        return Ok(Value::Text(text));
    }
    let bytes = row.try_get_unchecked::<Vec<u8>, _>(idx)?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => Value::Text(text),
        Err(e) => Value::Bytes(e.into_bytes()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_kinds() {
        assert_eq!(ColumnKind::from_type_name("INT"), ColumnKind::Signed);
        assert_eq!(ColumnKind::from_type_name("BIGINT"), ColumnKind::Signed);
        assert_eq!(ColumnKind::from_type_name("INT UNSIGNED"), ColumnKind::Unsigned);
        assert_eq!(ColumnKind::from_type_name("tinyint unsigned"), ColumnKind::Unsigned);
        assert_eq!(ColumnKind::from_type_name("BOOLEAN"), ColumnKind::Bool);
    }

    #[test]
    fn test_numeric_kinds() {
        assert_eq!(ColumnKind::from_type_name("DECIMAL"), ColumnKind::Decimal);
        assert_eq!(ColumnKind::from_type_name("FLOAT"), ColumnKind::Float);
        assert_eq!(ColumnKind::from_type_name("DOUBLE"), ColumnKind::Double);
    }

    #[test]
    fn test_temporal_kinds() {
        assert_eq!(ColumnKind::from_type_name("DATE"), ColumnKind::Date);
        assert_eq!(ColumnKind::from_type_name("DATETIME"), ColumnKind::DateTime);
        assert_eq!(ColumnKind::from_type_name("TIMESTAMP"), ColumnKind::Timestamp);
        assert_eq!(ColumnKind::from_type_name("TIME"), ColumnKind::Time);
        assert_eq!(ColumnKind::from_type_name("YEAR"), ColumnKind::Year);
    }

    #[test]
    fn test_text_and_binary_kinds() {
        assert_eq!(ColumnKind::from_type_name("VARCHAR"), ColumnKind::Text);
        assert_eq!(ColumnKind::from_type_name("ENUM"), ColumnKind::Text);
        assert_eq!(ColumnKind::from_type_name("JSON"), ColumnKind::Text);
        assert_eq!(ColumnKind::from_type_name("VARBINARY"), ColumnKind::Binary);
        assert_eq!(ColumnKind::from_type_name("NULL"), ColumnKind::Null);
    }
}
