//! Parámetros de consulta
//!
//! Valores que se enlazan posicionalmente a los `?` de una sentencia.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::utils::errors::ReportError;
use crate::utils::validation::parse_date;

#[derive(Debug, Clone, PartialEq)]
pub enum QueryParam {
    Int(i64),
    Float(f64),
    Decimal(Decimal),
    Text(String),
    Date(NaiveDate),
}

impl From<i64> for QueryParam {
    fn from(v: i64) -> Self {
        QueryParam::Int(v)
    }
}

impl From<i32> for QueryParam {
    fn from(v: i32) -> Self {
        QueryParam::Int(v.into())
    }
}

impl From<f64> for QueryParam {
    fn from(v: f64) -> Self {
        QueryParam::Float(v)
    }
}

impl From<Decimal> for QueryParam {
    fn from(v: Decimal) -> Self {
        QueryParam::Decimal(v)
    }
}

impl From<&str> for QueryParam {
    fn from(v: &str) -> Self {
        QueryParam::Text(v.to_string())
    }
}

impl From<String> for QueryParam {
    fn from(v: String) -> Self {
        QueryParam::Text(v)
    }
}

impl From<NaiveDate> for QueryParam {
    fn from(v: NaiveDate) -> Self {
        QueryParam::Date(v)
    }
}

/// Intervalo de fechas inclusivo, como `BETWEEN start AND end`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Parsear un par de fechas `YYYY-MM-DD`
    pub fn parse(start: &str, end: &str) -> Result<Self, ReportError> {
        Ok(Self::new(parse_date(start)?, parse_date(end)?))
    }

    /// Trimestre `quarter` (1-4) del año `year`
    pub fn quarter(year: i32, quarter: u32) -> Option<Self> {
        if !(1..=4).contains(&quarter) {
            return None;
        }
        let first_month = (quarter - 1) * 3 + 1;
        let start = NaiveDate::from_ymd_opt(year, first_month, 1)?;
        let next = if quarter == 4 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)?
        } else {
            NaiveDate::from_ymd_opt(year, first_month + 3, 1)?
        };
        Some(Self::new(start, next.pred_opt()?))
    }

    /// Un intervalo invertido es válido en SQL pero nunca devuelve filas
    pub fn is_reversed(&self) -> bool {
        self.start > self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn year(&self) -> i32 {
        self.start.year()
    }

    pub fn to_params(&self) -> [QueryParam; 2] {
        [QueryParam::Date(self.start), QueryParam::Date(self.end)]
    }
}
