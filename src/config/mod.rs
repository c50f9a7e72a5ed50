//! Configuración del proyecto
//!
//! Este módulo contiene la configuración de base de datos y los ajustes
//! de salida del reporte, ambos leídos de variables de entorno.

pub mod database;
pub mod environment;

pub use database::DatabaseConfig;
pub use environment::{ReportSettings, SettingsOverrides};
