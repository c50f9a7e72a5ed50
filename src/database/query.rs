//! Ejecución de consultas
//!
//! `execute_query` abre una conexión, ejecuta la sentencia con sus
//! parámetros, convierte el resultado en `DataFrame` y libera la conexión
//! siempre. Los errores del driver se registran y se devuelven como `None`.

use async_trait::async_trait;
use log::{debug, error, warn};
use sqlx::mysql::{MySql, MySqlArguments, MySqlConnection};
use sqlx::query::Query;
use sqlx::{Column, Executor, Statement};

use crate::config::database::DatabaseConfig;
use crate::database::connection::{connect, DatabaseConnection};
use crate::database::decode::decode_row;
use crate::models::params::QueryParam;
use crate::models::table::DataFrame;
use crate::utils::errors::ReportError;

type MySqlQuery<'q> = Query<'q, MySql, MySqlArguments>;

/// Origen de resultados tabulares para los reportes
#[async_trait]
pub trait QuerySource: Send + Sync {
    /// Ejecutar `sql` con `params`; `None` si la consulta no produjo resultado
    async fn query(&self, sql: &str, params: &[QueryParam]) -> Option<DataFrame>;
}

/// Ejecutor contra MySQL, una conexión por consulta
#[derive(Debug, Clone)]
pub struct MySqlExecutor {
    config: DatabaseConfig,
}

impl MySqlExecutor {
    pub fn new(config: DatabaseConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }
}

#[async_trait]
impl QuerySource for MySqlExecutor {
    async fn query(&self, sql: &str, params: &[QueryParam]) -> Option<DataFrame> {
        execute_query(&self.config, sql, params).await
    }
}

/// Ejecutar una consulta; los fallos se registran y se devuelven como `None`
pub async fn execute_query(
    config: &DatabaseConfig,
    sql: &str,
    params: &[QueryParam],
) -> Option<DataFrame> {
    let mut conn = connect(config).await?;
    let result = run_query(conn.as_mut(), sql, params).await;
    conn.release().await;

    match result {
        Ok(frame) => {
            debug!("✅ Consulta ejecutada: {} filas", frame.len());
            Some(frame)
        }
        Err(e) => {
            error!("❌ Error al ejecutar la consulta: {}", e);
            None
        }
    }
}

/// Igual que `execute_query` pero propagando la causa del fallo
pub async fn try_execute_query(
    config: &DatabaseConfig,
    sql: &str,
    params: &[QueryParam],
) -> Result<DataFrame, ReportError> {
    let mut conn = DatabaseConnection::open(config).await?;
    let result = run_query(conn.as_mut(), sql, params).await;
    conn.release().await;
    result
}

/// Ejecutar sobre una conexión ya abierta; no la cierra
pub async fn run_query(
    conn: &mut MySqlConnection,
    sql: &str,
    params: &[QueryParam],
) -> Result<DataFrame, ReportError> {
    // Los metadatos de la sentencia dan las columnas aunque no haya filas
    let statement = (&mut *conn).prepare(sql).await?;
    let columns: Vec<String> = statement
        .columns()
        .iter()
        .map(|c| c.name().to_string())
        .collect();

    let expected = statement.parameters().and_then(|p| p.right());
    if let Some(expected) = expected {
        if expected != params.len() {
            warn!(
                "⚠️ La sentencia espera {} parámetros y se recibieron {}",
                expected,
                params.len()
            );
        }
    }

    let query = params
        .iter()
        .fold(sqlx::query(sql), |query, param| bind_param(query, param));
    let rows = query.fetch_all(&mut *conn).await?;

    let mut frame = DataFrame::new(columns);
    for row in &rows {
        frame.push_row(decode_row(row)?)?;
    }
    Ok(frame)
}

fn bind_param<'q>(query: MySqlQuery<'q>, param: &'q QueryParam) -> MySqlQuery<'q> {
    match param {
        QueryParam::Int(v) => query.bind(*v),
        QueryParam::Float(v) => query.bind(*v),
        QueryParam::Decimal(v) => query.bind(*v),
        QueryParam::Text(v) => query.bind(v.as_str()),
        QueryParam::Date(v) => query.bind(*v),
    }
}
