//! Reportes
//!
//! Consultas fijas sobre el esquema de ventas y la tabla de películas.

pub mod queries;
pub mod sales_report;

pub use sales_report::{SalesReport, DEFAULT_DEPARTMENTS};
