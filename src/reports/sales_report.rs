//! Reportes de ventas y de películas
//!
//! Cada método ejecuta una consulta fija y devuelve el resultado tabular,
//! o `None` si la consulta falló (el fallo ya quedó registrado).

use log::{error, info, warn};

use crate::database::query::QuerySource;
use crate::models::params::{DateRange, QueryParam};
use crate::models::table::DataFrame;
use crate::reports::queries;

/// Departamentos consultados por defecto
pub const DEFAULT_DEPARTMENTS: [&str; 2] = ["BEBIDAS", "PADARIA"];

pub struct SalesReport<S> {
    source: S,
}

impl<S: QuerySource> SalesReport<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Productos más caros
    pub async fn top10(&self) -> Option<DataFrame> {
        info!("📊 Consultando los 10 productos más caros");
        self.source.query(queries::TOP_PRODUCTS, &[]).await
    }

    /// Secciones de los departamentos indicados
    pub async fn department_sections(&self, departments: &[&str]) -> Option<DataFrame> {
        if departments.is_empty() {
            return Some(DataFrame::new(vec![queries::SECTION_COLUMN.to_string()]));
        }

        info!("📊 Consultando secciones de {}", departments.join(", "));
        let sql = queries::department_sections(departments.len());
        let params: Vec<QueryParam> = departments.iter().map(|d| QueryParam::from(*d)).collect();
        self.source.query(&sql, &params).await
    }

    /// Ventas totales por área de negocio en el intervalo
    pub async fn sales_by_area(&self, range: DateRange) -> Option<DataFrame> {
        info!("📊 Consultando ventas por área entre {} y {}", range.start, range.end);
        self.source
            .query(queries::SALES_BY_AREA, &range.to_params())
            .await
    }

    /// Ventas de un producto en una tienda; las fechas deben venir en `YYYY-MM-DD`
    pub async fn retrieve_data(
        &self,
        product_code: i64,
        store_code: i64,
        date_range: (&str, &str),
    ) -> Option<DataFrame> {
        let range = match DateRange::parse(date_range.0, date_range.1) {
            Ok(range) => range,
            Err(e) => {
                error!("❌ Error al procesar las fechas: {}", e);
                return None;
            }
        };
        if range.is_reversed() {
            warn!(
                "⚠️ Intervalo invertido ({} > {}), la consulta no devolverá filas",
                range.start, range.end
            );
        }

        info!(
            "📊 Consultando ventas del producto {} en la tienda {}",
            product_code, store_code
        );
        let [start, end] = range.to_params();
        let params = [
            QueryParam::Int(product_code),
            QueryParam::Int(store_code),
            start,
            end,
        ];
        self.source.query(queries::PRODUCT_SALES, &params).await
    }

    /// Total de ventas por tienda
    pub async fn store_sales_totals(&self) -> Option<DataFrame> {
        self.source.query(queries::STORE_SALES_TOTALS, &[]).await
    }

    /// Notas de las películas de IMDb
    pub async fn imdb_ratings(&self) -> Option<DataFrame> {
        self.source.query(queries::IMDB_RATINGS, &[]).await
    }
}
