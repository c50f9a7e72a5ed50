use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;
use dotenvy::dotenv;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use sales_report::analysis::Summary;
use sales_report::charts::plots::{IMDB_CHART_FILE, SALES_CHART_FILE};
use sales_report::charts::{plot_imdb, plot_sales, ChartFormat, PlotOutcome};
use sales_report::reports::DEFAULT_DEPARTMENTS;
use sales_report::{
    DataFrame, DatabaseConfig, DateRange, MySqlExecutor, ReportSettings, SalesReport, SettingsOverrides,
};

/// Reporte de ventas y notas de películas
#[derive(Debug, Parser)]
#[command(name = "sales_report", version)]
struct Cli {
    /// Directorio donde se guardan los gráficos (por defecto CHART_OUTPUT_DIR o ./charts)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Formato de los gráficos
    #[arg(long, value_enum)]
    format: Option<ChartFormat>,

    /// No generar gráficos, solo las tablas
    #[arg(long)]
    no_charts: bool,

    /// Guardar los resúmenes descriptivos en un archivo JSON
    #[arg(long)]
    summary_json: Option<PathBuf>,

    /// Año y trimestre del reporte de ventas por área
    #[arg(long, default_value_t = 2019)]
    year: i32,
    #[arg(long, default_value_t = 1)]
    quarter: u32,

    /// Producto, tienda e intervalo del detalle de ventas
    #[arg(long, default_value_t = 18)]
    product: i64,
    #[arg(long, default_value_t = 1)]
    store: i64,
    #[arg(long, default_value = "2019-01-01")]
    start: String,
    #[arg(long, default_value = "2019-01-31")]
    end: String,
}

impl Cli {
    fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            output_dir: self.output_dir.clone(),
            chart_format: self.format,
            no_charts: self.no_charts,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    info!("📊 Reporte de ventas e IMDb");
    info!("===========================");

    let db_config = match DatabaseConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("❌ Configuración de base de datos inválida: {}", e);
            return Err(anyhow!("Error de configuración: {}", e));
        }
    };
    info!("🔌 Base de datos: {}", db_config.masked_url());

    let settings = ReportSettings::from_env_with(&cli.overrides())?;

    let quarter = DateRange::quarter(cli.year, cli.quarter)
        .ok_or_else(|| anyhow!("Trimestre inválido: {} (use 1-4)", cli.quarter))?;

    let report = SalesReport::new(MySqlExecutor::new(db_config));

    print_frame(report.top10().await);
    print_frame(report.department_sections(&DEFAULT_DEPARTMENTS).await);
    print_frame(report.sales_by_area(quarter).await);
    print_frame(
        report
            .retrieve_data(cli.product, cli.store, (cli.start.as_str(), cli.end.as_str()))
            .await,
    );

    let mut summaries: BTreeMap<&str, Summary> = BTreeMap::new();

    match plot_sales(&report, &settings).await {
        Ok(Some(outcome)) => {
            println!("{}", outcome.summary);
            record(&mut summaries, SALES_CHART_FILE, outcome);
        }
        Ok(None) => {}
        Err(e) => error!("❌ Error generando el gráfico de ventas: {}", e),
    }

    match plot_imdb(&report, &settings).await {
        Ok(Some(outcome)) => record(&mut summaries, IMDB_CHART_FILE, outcome),
        Ok(None) => {}
        Err(e) => error!("❌ Error generando el histograma de IMDb: {}", e),
    }

    if let Some(path) = &cli.summary_json {
        if summaries.is_empty() {
            warn!("⚠️ No hay resúmenes para guardar en {}", path.display());
        }
        std::fs::write(path, serde_json::to_string_pretty(&summaries)?)?;
        info!("💾 Resúmenes guardados en {}", path.display());
    }

    info!("👋 Reporte terminado");
    Ok(())
}

fn print_frame(frame: Option<DataFrame>) {
    match frame {
        Some(frame) => println!("{}\n", frame),
        None => println!("None\n"),
    }
}

fn record(summaries: &mut BTreeMap<&'static str, Summary>, name: &'static str, outcome: PlotOutcome) {
    if outcome.path.is_none() {
        info!("Gráfico {} no generado", name);
    }
    summaries.insert(name, outcome.summary);
}
