//! Módulo de base de datos
//!
//! Maneja la conexión a MySQL y la ejecución de consultas

pub mod connection;
pub mod decode;
pub mod query;

pub use connection::DatabaseConnection;
pub use query::{execute_query, try_execute_query, MySqlExecutor, QuerySource};
