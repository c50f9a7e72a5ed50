//! Reporte de ventas del varejo y de notas de IMDb
//!
//! Ejecuta un conjunto fijo de consultas sobre MySQL, imprime los resultados
//! como tablas y genera dos gráficos descriptivos.

pub mod analysis;
pub mod charts;
pub mod config;
pub mod database;
pub mod models;
pub mod reports;
pub mod utils;

pub use config::{DatabaseConfig, ReportSettings, SettingsOverrides};
pub use database::{execute_query, MySqlExecutor, QuerySource};
pub use models::{DataFrame, DateRange, QueryParam, Value};
pub use reports::SalesReport;
pub use utils::ReportError;
