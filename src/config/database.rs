//! Configuración de base de datos
//!
//! Este módulo lee las credenciales de MySQL desde el entorno
//! (`DB_HOST`, `DB_USER`, `DB_PASSWORD`, `DB_NAME`, `DB_PORT`).

use std::fmt;

use sqlx::mysql::MySqlConnectOptions;
use validator::Validate;

use crate::utils::errors::ReportError;
use crate::utils::validation::validate_not_empty;

pub const DEFAULT_MYSQL_PORT: u16 = 3306;

/// Configuración de la base de datos
#[derive(Clone, Validate)]
pub struct DatabaseConfig {
    #[validate(custom = "validate_not_empty")]
    pub host: String,
    #[validate(range(min = 1))]
    pub port: u16,
    #[validate(custom = "validate_not_empty")]
    pub user: String,
    pub password: String,
    #[validate(custom = "validate_not_empty")]
    pub database: String,
}

impl DatabaseConfig {
    /// Cargar la configuración desde las variables de entorno del proceso
    pub fn from_env() -> Result<Self, ReportError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Cargar la configuración usando una función de búsqueda arbitraria
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ReportError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key).ok_or_else(|| ReportError::Config(format!("{} must be set", key)))
        };

        let port = match lookup("DB_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ReportError::Config(format!("DB_PORT must be a valid port, got '{}'", raw)))?,
            None => DEFAULT_MYSQL_PORT,
        };

        let config = Self {
            host: required("DB_HOST")?,
            port,
            user: required("DB_USER")?,
            password: lookup("DB_PASSWORD").unwrap_or_default(),
            database: required("DB_NAME")?,
        };
        config.validate()?;

        Ok(config)
    }

    /// Opciones de conexión para SQLx
    pub fn connect_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
    }

    /// URL de conexión con las credenciales enmascaradas, apta para logs
    pub fn masked_url(&self) -> String {
        mask_database_url(&format!(
            "mysql://{}:{}@{}:{}/{}",
            self.user, self.password, self.host, self.port, self.database
        ))
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"***")
            .field("database", &self.database)
            .finish()
    }
}

/// Función helper para enmascarar la URL de la base de datos en logs
fn mask_database_url(url: &str) -> String {
    let Some(at_pos) = url.rfind('@') else {
        return url.to_string();
    };
    let Some(scheme_end) = url.find("://") else {
        return url.to_string();
    };
    if scheme_end + 3 > at_pos {
        return url.to_string();
    }
    format!("{}***:***@{}", &url[..scheme_end + 3], &url[at_pos + 1..])
}
