//! Configuración de conexión a MySQL
//!
//! Cada consulta abre su propia conexión y la libera al terminar,
//! tanto si la consulta tuvo éxito como si falló.

use log::{debug, error, warn};
use sqlx::mysql::MySqlConnection;
use sqlx::Connection;

use crate::config::database::DatabaseConfig;

/// Conexión única con alcance de una consulta
pub struct DatabaseConnection {
    inner: MySqlConnection,
}

impl DatabaseConnection {
    /// Abrir una conexión propagando el error del driver
    pub async fn open(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        debug!("🔌 Conectando a {}", config.masked_url());
        let inner = MySqlConnection::connect_with(&config.connect_options()).await?;
        Ok(Self { inner })
    }

    pub fn as_mut(&mut self) -> &mut MySqlConnection {
        &mut self.inner
    }

    /// Cerrar la conexión; un fallo al cerrar solo se registra
    pub async fn release(self) {
        match self.inner.close().await {
            Ok(()) => debug!("🔌 Conexión cerrada"),
            Err(e) => warn!("⚠️ Error cerrando la conexión: {}", e),
        }
    }
}

/// Abrir una conexión; un fallo se registra y se traduce en `None`
pub async fn connect(config: &DatabaseConfig) -> Option<DatabaseConnection> {
    match DatabaseConnection::open(config).await {
        Ok(conn) => Some(conn),
        Err(e) => {
            error!("❌ Error al conectar a la base de datos: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unreachable_config() -> DatabaseConfig {
        DatabaseConfig {
            host: "127.0.0.1".to_string(),
            // puerto reservado, nadie escucha ahí
            port: 1,
            user: "analyst".to_string(),
            password: "secret".to_string(),
            database: "varejo".to_string(),
        }
    }

    #[tokio::test]
    async fn test_open_reports_driver_error() {
        let result = DatabaseConnection::open(&unreachable_config()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_connect_failure_is_none() {
        assert!(connect(&unreachable_config()).await.is_none());
    }
}
