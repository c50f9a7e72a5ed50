//! Configuración de variables de entorno
//!
//! Ajustes del reporte que no pertenecen a la base de datos:
//! dónde y en qué formato se escriben los gráficos.

use std::path::PathBuf;

use log::warn;

use crate::charts::ChartFormat;
use crate::utils::errors::ReportError;

pub const DEFAULT_OUTPUT_DIR: &str = "charts";

/// Configuración del reporte
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSettings {
    pub output_dir: PathBuf,
    pub chart_format: ChartFormat,
    pub render_charts: bool,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            chart_format: ChartFormat::Png,
            render_charts: true,
        }
    }
}

/// Valores de la línea de comandos que tienen prioridad sobre el entorno
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsOverrides {
    pub output_dir: Option<PathBuf>,
    pub chart_format: Option<ChartFormat>,
    pub no_charts: bool,
}

impl ReportSettings {
    /// Cargar ajustes desde `CHART_OUTPUT_DIR` y `CHART_FORMAT`
    pub fn from_env() -> Result<Self, ReportError> {
        Self::from_env_with(&SettingsOverrides::default())
    }

    pub fn from_env_with(overrides: &SettingsOverrides) -> Result<Self, ReportError> {
        Self::from_lookup_with(|key| std::env::var(key).ok(), overrides)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ReportError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::from_lookup_with(lookup, &SettingsOverrides::default())
    }

    /// Las variables de entorno solo se leen para lo que la línea de comandos
    /// no fijó. Un `CHART_FORMAT` inválido no impide arrancar con `--no-charts`.
    pub fn from_lookup_with<F>(lookup: F, overrides: &SettingsOverrides) -> Result<Self, ReportError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self {
            render_charts: !overrides.no_charts,
            ..Self::default()
        };

        match &overrides.output_dir {
            Some(dir) => settings.output_dir = dir.clone(),
            None => {
                if let Some(dir) = lookup("CHART_OUTPUT_DIR").filter(|d| !d.trim().is_empty()) {
                    settings.output_dir = PathBuf::from(dir);
                }
            }
        }

        match overrides.chart_format {
            Some(format) => settings.chart_format = format,
            None => {
                if let Some(raw) = lookup("CHART_FORMAT") {
                    match raw.parse() {
                        Ok(format) => settings.chart_format = format,
                        Err(e) if !settings.render_charts => {
                            warn!("⚠️ CHART_FORMAT ignorado (gráficos desactivados): {}", e);
                        }
                        Err(e) => return Err(e),
                    }
                }
            }
        }

        Ok(settings)
    }

    /// Ruta completa del archivo de un gráfico
    pub fn chart_path(&self, stem: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", stem, self.chart_format.extension()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_env() {
        let settings = ReportSettings::from_lookup(|_| None).unwrap();
        assert_eq!(settings, ReportSettings::default());
        assert_eq!(
            settings.chart_path("vendas_por_loja"),
            PathBuf::from("charts/vendas_por_loja.png")
        );
    }

    #[test]
    fn test_overrides_from_env() {
        let settings = ReportSettings::from_lookup(|key| match key {
            "CHART_OUTPUT_DIR" => Some("/tmp/out".to_string()),
            "CHART_FORMAT" => Some("SVG".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(settings.chart_format, ChartFormat::Svg);
        assert_eq!(
            settings.chart_path("avaliacoes_imdb"),
            PathBuf::from("/tmp/out/avaliacoes_imdb.svg")
        );
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let result = ReportSettings::from_lookup(|key| {
            (key == "CHART_FORMAT").then(|| "gif".to_string())
        });
        assert!(matches!(result, Err(ReportError::Config(_))));
    }

    fn bad_format_env(key: &str) -> Option<String> {
        match key {
            "CHART_FORMAT" => Some("gif".to_string()),
            "CHART_OUTPUT_DIR" => Some("/tmp/from-env".to_string()),
            _ => None,
        }
    }

    #[test]
    fn test_cli_format_wins_over_invalid_env() {
        let overrides = SettingsOverrides {
            chart_format: Some(ChartFormat::Svg),
            ..Default::default()
        };
        let settings = ReportSettings::from_lookup_with(bad_format_env, &overrides).unwrap();

        assert_eq!(settings.chart_format, ChartFormat::Svg);
        assert!(settings.render_charts);
        assert_eq!(settings.output_dir, PathBuf::from("/tmp/from-env"));
    }

    #[test]
    fn test_no_charts_tolerates_invalid_env_format() {
        let overrides = SettingsOverrides {
            no_charts: true,
            ..Default::default()
        };
        let settings = ReportSettings::from_lookup_with(bad_format_env, &overrides).unwrap();

        assert!(!settings.render_charts);
        assert_eq!(settings.chart_format, ChartFormat::Png);
    }

    #[test]
    fn test_cli_output_dir_wins_over_env() {
        let overrides = SettingsOverrides {
            output_dir: Some(PathBuf::from("out")),
            chart_format: Some(ChartFormat::Png),
            no_charts: false,
        };
        let settings = ReportSettings::from_lookup_with(bad_format_env, &overrides).unwrap();

        assert_eq!(settings.chart_path("vendas_por_loja"), PathBuf::from("out/vendas_por_loja.png"));
    }
}
