//! JSON processing service entry point.

use std::net::SocketAddr;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use json_processor::api::{create_router, AppState};
use json_processor::config::Config;
use json_processor::error::ServiceError;
use json_processor::metrics;
use json_processor::system;
use json_processor::utils::shutdown_signal;

/// Batch JSON record processing service.
#[derive(Parser, Debug)]
#[command(name = "json-processor")]
#[command(about = "HTTP service that sanitizes and validates batches of JSON records")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// HTTP server port (overrides PORT).
    #[arg(short, long, global = true)]
    port: Option<u16>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP service (default).
    Serve,

    /// Check configuration validity.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration before logging so RUST_LOG from .env applies
    let config = Config::load();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("json_processor=debug,tower_http=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let level = config.as_ref().map(|c| c.rust_log.as_str()).unwrap_or("info");
            EnvFilter::new(level)
        })
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let mut config = config.map_err(ServiceError::from)?;
    if let Some(port) = args.port {
        config.port = port;
    }

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(&config),
        Some(Command::Serve) | None => cmd_serve(config).await,
    }
}

/// Check configuration validity.
fn cmd_check_config(config: &Config) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("JSON PROCESSOR - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Port: {}", config.port);
    println!("  Max Body: {} bytes", config.max_body_bytes);
    println!("  Batch Policy: {}", config.batch_policy);
    println!("  Sanitize Mode: {}", config.sanitize_mode);
    println!("  Include Results: {}", config.include_results);
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Run the HTTP service until a shutdown signal arrives.
async fn cmd_serve(config: Config) -> anyhow::Result<()> {
    config.validate().map_err(ServiceError::InvalidConfig)?;

    let handle = metrics::install_recorder().map_err(ServiceError::from)?;
    let _upkeep = metrics::spawn_upkeep(handle.clone(), metrics::UPKEEP_INTERVAL);
    let app_state = AppState::new(&config, handle);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await.map_err(ServiceError::from)?;

    info!("JSON Processing Service started on port {}", config.port);
    info!("Version: {}", system::runtime_version());
    info!("Architecture: {}", system::architecture());
    info!("Available Processors: {}", system::available_processors());
    info!(
        policy = %config.batch_policy,
        sanitize_mode = %config.sanitize_mode,
        include_results = config.include_results,
        "Processing options"
    );

    let router = create_router(app_state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}
