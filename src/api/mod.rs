//! HTTP surface of the gateway.
//!
//! Routes, shared application state and the server builder live here; the
//! per-resource handlers live in [`handlers`]. All responses are JSON,
//! including the catch-all for unmatched routes.

pub mod error;
pub mod handlers;

pub use error::ApiError;

use std::time::Instant;

use actix_web::{
	middleware::{Compress, DefaultHeaders, NormalizePath},
	web, App, HttpRequest, HttpResponse, HttpServer,
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::{
	models::{Config, Network},
	services::{horizon::HorizonClient, indexer::IndexerClient, soroban::SorobanClient},
};

/// Immutable per-process state: the configuration and one pre-built client
/// per upstream and network.
pub struct AppState {
	pub config: Config,
	pub started_at: Instant,
	horizon_mainnet: HorizonClient,
	horizon_testnet: HorizonClient,
	soroban_mainnet: SorobanClient,
	soroban_testnet: SorobanClient,
	pub indexer: IndexerClient,
}

impl AppState {
	pub fn new(config: Config) -> anyhow::Result<Self> {
		let horizon_mainnet =
			HorizonClient::new(&config.horizon_url, Network::Mainnet, &config.retry)?;
		let horizon_testnet =
			HorizonClient::new(&config.horizon_testnet_url, Network::Testnet, &config.retry)?;
		let soroban_mainnet =
			SorobanClient::new(&config.soroban_rpc_url, Network::Mainnet, &config.retry)?;
		let soroban_testnet = SorobanClient::new(
			&config.soroban_rpc_testnet_url,
			Network::Testnet,
			&config.retry,
		)?;
		let indexer = IndexerClient::new(&config.stellar_expert_url, &config.retry)?;

		Ok(Self {
			config,
			started_at: Instant::now(),
			horizon_mainnet,
			horizon_testnet,
			soroban_mainnet,
			soroban_testnet,
			indexer,
		})
	}

	pub fn horizon(&self, network: Network) -> &HorizonClient {
		match network {
			Network::Mainnet => &self.horizon_mainnet,
			Network::Testnet => &self.horizon_testnet,
		}
	}

	pub fn soroban(&self, network: Network) -> &SorobanClient {
		match network {
			Network::Mainnet => &self.soroban_mainnet,
			Network::Testnet => &self.soroban_testnet,
		}
	}
}

/// The `network` query parameter, shared across contract routes.
#[derive(Debug, Deserialize)]
pub struct NetworkQuery {
	pub network: Option<String>,
}

impl NetworkQuery {
	/// Resolves the requested network, defaulting to mainnet.
	pub fn resolve(&self) -> Result<Network, ApiError> {
		match &self.network {
			None => Ok(Network::Mainnet),
			Some(raw) => raw.parse().map_err(|_| {
				ApiError::validation("Invalid network")
					.with("provided", raw.as_str())
					.with("expected", "mainnet or testnet")
			}),
		}
	}
}

/// Registers every `/api` route.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
	cfg.service(
		web::scope("/api")
			.route("/health", web::get().to(handlers::health::health))
			.route("/network-stats", web::get().to(handlers::stats::network_stats))
			.route("/ledgers", web::get().to(handlers::ledgers::list))
			.route("/ledgers/{sequence}", web::get().to(handlers::ledgers::detail))
			.route("/transactions", web::get().to(handlers::transactions::list))
			.route(
				"/transactions/{hash}",
				web::get().to(handlers::transactions::detail),
			)
			.route("/operations", web::get().to(handlers::operations::list))
			.route("/accounts/{id}", web::get().to(handlers::accounts::detail))
			.route("/search/{term}", web::get().to(handlers::search::search))
			.route(
				"/contracts/{contract_id}",
				web::get().to(handlers::contracts::summary),
			)
			.route(
				"/contracts/{contract_id}/events",
				web::get().to(handlers::contracts::events),
			)
			.route("/projects", web::get().to(handlers::projects::list))
			.default_service(web::route().to(not_found)),
	)
	.default_service(web::route().to(not_found));
}

/// JSON 404 for unmatched routes.
pub async fn not_found(req: HttpRequest) -> HttpResponse {
	HttpResponse::NotFound().json(json!({
		"message": "Route not found",
		"path": req.path(),
		"method": req.method().as_str(),
	}))
}

/// Builds the HTTP server. Inside Docker the bind host is forced to
/// `0.0.0.0` so the port stays reachable from outside the container.
pub fn create_server(
	state: web::Data<AppState>,
	bind_address: String,
) -> std::io::Result<actix_web::dev::Server> {
	let actual_bind_address = if std::env::var("IN_DOCKER").unwrap_or_default() == "true" {
		match bind_address.split(':').nth(1) {
			Some(port) => format!("0.0.0.0:{}", port),
			None => "0.0.0.0:3001".to_string(),
		}
	} else {
		bind_address.clone()
	};

	info!(
		"Starting gateway on {} (actual bind: {})",
		bind_address, actual_bind_address
	);

	Ok(HttpServer::new(move || {
		App::new()
			.wrap(Compress::default())
			.wrap(NormalizePath::trim())
			.wrap(DefaultHeaders::new())
			.app_data(state.clone())
			.configure(configure_routes)
	})
	.workers(2)
	.bind(actual_bind_address)?
	.shutdown_timeout(5)
	.run())
}
