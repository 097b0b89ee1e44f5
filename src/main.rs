//! Gateway entry point.
//!
//! Loads the environment, applies CLI overrides, builds the upstream clients
//! and runs the HTTP server until interrupted.

use actix_web::web;
use clap::Parser;
use dotenvy::dotenv_override;
use std::env::{set_var, var};
use tracing::{error, info};

use lumenscope::{
	api::{create_server, AppState},
	models::Config,
	utils::{logging::setup_logging, parse_string_to_bytes_size},
};

#[derive(Parser)]
#[command(
	name = "lumenscope",
	about = "A read-only Stellar explorer gateway aggregating Horizon, Soroban RPC and StellarExpert.",
	version
)]
struct Cli {
	/// Write logs to file instead of stdout
	#[arg(long)]
	log_file: bool,

	/// Set log level (trace, debug, info, warn, error)
	#[arg(long, value_name = "LEVEL")]
	log_level: Option<String>,

	/// Path to store log files (default: logs/)
	#[arg(long, value_name = "PATH")]
	log_path: Option<String>,

	/// Maximum log file size before rolling (e.g., "1GB", "500MB", "1024KB")
	#[arg(long, value_name = "SIZE", value_parser = parse_string_to_bytes_size)]
	log_max_size: Option<u64>,

	/// Address to bind the server on (default: 127.0.0.1:3001)
	#[arg(long, value_name = "HOST:PORT")]
	bind_address: Option<String>,
}

impl Cli {
	/// Applies CLI options to environment variables, overriding existing values.
	fn apply_to_env(&self) {
		dotenv_override().ok();

		if self.log_file {
			set_var("LOG_MODE", "file");
		}

		if let Ok(level) = var("RUST_LOG") {
			set_var("LOG_LEVEL", level);
		}

		if let Some(level) = &self.log_level {
			set_var("LOG_LEVEL", level);
			set_var("RUST_LOG", level);
		}

		if let Some(path) = &self.log_path {
			set_var("LOG_DATA_DIR", path);
		}

		if let Some(max_size) = &self.log_max_size {
			set_var("LOG_MAX_SIZE", max_size.to_string());
		}

		if let Some(address) = &self.bind_address {
			let mut parts = address.splitn(2, ':');
			if let Some(host) = parts.next() {
				if !host.is_empty() {
					set_var("HOST", host);
				}
			}
			if let Some(port) = parts.next() {
				set_var("PORT", port);
			}
		}
	}
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	cli.apply_to_env();

	setup_logging().unwrap_or_else(|e| {
		error!("Failed to setup logging: {}", e);
	});

	let config = Config::from_env()?;
	let bind_address = format!("{}:{}", config.host, config.port);

	info!(
		horizon = %config.horizon_url,
		soroban = %config.soroban_rpc_url,
		indexer = %config.stellar_expert_url,
		"Configuration loaded"
	);

	let state = web::Data::new(AppState::new(config)?);
	let server = create_server(state, bind_address)?;

	server.await?;
	info!("Gateway stopped");
	Ok(())
}
