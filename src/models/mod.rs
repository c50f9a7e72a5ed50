//! Modelos del sistema
//!
//! Tipos transitorios de los reportes: celdas, resultados tabulares y
//! parámetros de consulta.

pub mod params;
pub mod table;
pub mod value;

pub use params::{DateRange, QueryParam};
pub use table::DataFrame;
pub use value::Value;
