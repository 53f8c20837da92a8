//! Smart Maintenance - Workshop KPI dashboard
//!
//! Serves the maintenance KPI dashboard and the 7-day failure-risk readout.
//!
//! # Usage
//!
//! ```bash
//! # Serve the dashboard with the bundled sample data
//! cargo run --release
//!
//! # Print the risk readout for one machine
//! ./smart-maintenance predict --machine Laser-01
//!
//! # Print the KPI table for one machine
//! ./smart-maintenance kpis --machine Press-02
//! ```
//!
//! # Environment Variables
//!
//! - `MAINTENANCE_CONFIG`: Path to a TOML config file (default: ./maintenance.toml)
//! - `MAINTENANCE_CORS_ORIGINS`: Comma-separated origins allowed to call the API
//! - `RUST_LOG`: Logging level (default: info)

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use smart_maintenance::api::{create_app, DashboardState};
use smart_maintenance::config::MaintenanceConfig;
use smart_maintenance::dashboard;
use smart_maintenance::data::Dataset;
use smart_maintenance::risk::RiskPredictor;
use smart_maintenance::types::{KpiTotals, MachineFilter};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "smart-maintenance")]
#[command(about = "Workshop maintenance KPI dashboard with 7-day failure risk")]
#[command(version)]
struct CliArgs {
    /// Path to the TOML config file (overrides the standard search order)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// KPI summary CSV (overrides data.kpi_path)
    #[arg(long, value_name = "PATH")]
    kpis: Option<PathBuf>,

    /// Failure event CSV (overrides data.events_path)
    #[arg(long, value_name = "PATH")]
    events: Option<PathBuf>,

    /// Model artifact JSON (overrides data.model_path)
    #[arg(long, value_name = "PATH")]
    model: Option<PathBuf>,

    /// Override the server address (default: "0.0.0.0:8080")
    #[arg(short, long, value_name = "HOST:PORT")]
    addr: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,

    #[command(subcommand)]
    command: Option<SubCommand>,
}

#[derive(clap::Subcommand, Debug)]
enum SubCommand {
    /// Serve the dashboard over HTTP (default)
    Serve,

    /// Print the failure-risk readout for one machine
    Predict {
        /// Machine identifier
        #[arg(long)]
        machine: String,
    },

    /// Print the KPI table and totals
    Kpis {
        /// Machine identifier, or "All"
        #[arg(long)]
        machine: Option<String>,
    },
}

// ============================================================================
// Configuration
// ============================================================================

/// Resolve the effective config: file (or search order), then CLI overrides.
fn resolve_config(args: &CliArgs) -> Result<MaintenanceConfig> {
    let mut config = match &args.config {
        Some(path) => MaintenanceConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => MaintenanceConfig::load(),
    };

    if let Some(p) = &args.kpis {
        config.data.kpi_path = p.clone();
    }
    if let Some(p) = &args.events {
        config.data.events_path = p.clone();
    }
    if let Some(p) = &args.model {
        config.data.model_path = p.clone();
    }
    if let Some(addr) = &args.addr {
        config.server.addr = addr.clone();
    }
    Ok(config)
}

/// Load tables and model. Any failure here is fatal.
fn load_inputs(config: &MaintenanceConfig) -> Result<(Dataset, RiskPredictor)> {
    let dataset = Dataset::load(&config.data.kpi_path, &config.data.events_path)
        .context("Failed to load workshop data")?;
    info!(
        "✓ Data loaded: {} machines, {} failure events",
        dataset.machines().len(),
        dataset.events().len()
    );

    let predictor = RiskPredictor::load(&config.data.model_path, config.risk.thresholds())
        .context("Failed to load risk model")?;
    info!("✓ Risk model ready ({:?})", predictor.layout());

    Ok((dataset, predictor))
}

// ============================================================================
// Commands
// ============================================================================

async fn run_server(config: MaintenanceConfig, cancel_token: CancellationToken) -> Result<()> {
    let (dataset, predictor) = load_inputs(&config)?;
    let server_addr = config.server.addr.clone();
    let app = create_app(DashboardState::new(dataset, predictor, config));

    let listener = tokio::net::TcpListener::bind(&server_addr)
        .await
        .with_context(|| format!("Failed to bind to {server_addr}"))?;

    info!("✓ HTTP server listening on {}", server_addr);
    info!("🎯 Dashboard available at: http://{}", server_addr);

    let result = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            cancel_token.cancelled().await;
            info!("[HttpServer] Received shutdown signal");
        })
        .await;

    match result {
        Ok(()) => {
            info!("[HttpServer] Graceful shutdown complete");
            Ok(())
        }
        Err(e) => {
            error!("[HttpServer] Server error: {}", e);
            Err(anyhow::anyhow!("HTTP server error: {}", e))
        }
    }
}

fn run_predict(config: &MaintenanceConfig, machine: &str) -> Result<()> {
    let (dataset, predictor) = load_inputs(config)?;
    if !dataset.has_machine(machine) {
        anyhow::bail!("Unknown machine '{machine}'");
    }

    let readout = dashboard::risk_readout(
        dataset.events(),
        machine,
        &predictor,
        config.risk.window_days,
        config.risk.horizon_days,
    )?;

    let f = &readout.features;
    println!("=== Failure risk: {} ===", readout.machine);
    println!("  avg_downtime_7d:  {:.2} h", f.avg_downtime_7d);
    println!("  avg_cost_7d:      {:.2} EUR", f.avg_cost_7d);
    println!("  avg_scrap_7d:     {:.2}", f.avg_scrap_7d);
    println!("  days_since_last:  {}", f.days_since_last);
    println!(
        "  Risk ({} days):   {}% [{}]",
        readout.horizon_days, readout.percent, readout.tier
    );
    Ok(())
}

fn run_kpis(config: &MaintenanceConfig, machine: Option<&str>) -> Result<()> {
    let dataset = Dataset::load(&config.data.kpi_path, &config.data.events_path)
        .context("Failed to load workshop data")?;
    let filter = MachineFilter::from_query(machine);
    let rows = dataset.kpis_for(&filter);

    println!("=== KPIs: {filter} ===");
    println!(
        "  {:<16} {:>14} {:>16} {:>12}",
        "machine", "Cost_total_eur", "Downtime_total_h", "Scrap_total"
    );
    for row in &rows {
        println!(
            "  {:<16} {:>14.2} {:>16.2} {:>12.0}",
            row.machine, row.cost_total_eur, row.downtime_total_h, row.scrap_total
        );
    }
    let totals = KpiTotals::from_rows(rows.iter().copied());
    println!(
        "  {:<16} {:>14.2} {:>16.2} {:>12.0}",
        format!("TOTAL ({})", totals.machines),
        totals.cost_total_eur,
        totals.downtime_total_h,
        totals.scrap_total
    );
    Ok(())
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();

    // Initialize logging
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    if args.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .init();
    }

    let config = resolve_config(&args)?;

    match args.command.unwrap_or(SubCommand::Serve) {
        SubCommand::Predict { machine } => run_predict(&config, &machine),
        SubCommand::Kpis { machine } => run_kpis(&config, machine.as_deref()),
        SubCommand::Serve => {
            info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
            info!("  Smart Maintenance - Workshop KPIs");
            info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

            // Graceful shutdown via Ctrl+C
            let cancel_token = CancellationToken::new();
            let shutdown_token = cancel_token.clone();
            tokio::spawn(async move {
                tokio::signal::ctrl_c().await.ok();
                info!("🛑 Received Ctrl+C, initiating shutdown...");
                shutdown_token.cancel();
            });

            run_server(config, cancel_token).await?;
            info!("✓ Smart Maintenance shutdown complete");
            Ok(())
        }
    }
}
