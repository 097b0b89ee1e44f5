//! Runtime configuration loaded from environment variables.
//!
//! All settings have defaults, so the gateway starts with no environment at
//! all. Values are read once at startup into an immutable [`Config`]; network
//! selection afterwards is always request-scoped, never ambient.

mod error;

pub use error::ConfigError;

use std::{env, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::utils::RetryConfig;

/// A Stellar network a request can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
	#[default]
	Mainnet,
	Testnet,
}

impl Network {
	pub fn as_str(&self) -> &'static str {
		match self {
			Network::Mainnet => "mainnet",
			Network::Testnet => "testnet",
		}
	}

	/// Segment used by the StellarExpert API ("public" for mainnet).
	pub fn expert_segment(&self) -> &'static str {
		match self {
			Network::Mainnet => "public",
			Network::Testnet => "testnet",
		}
	}
}

impl fmt::Display for Network {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

impl FromStr for Network {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_lowercase().as_str() {
			"mainnet" | "public" => Ok(Network::Mainnet),
			"testnet" => Ok(Network::Testnet),
			other => Err(ConfigError::validation_error(
				format!("Unknown network: {}", other),
				None,
				None,
			)),
		}
	}
}

/// Immutable gateway configuration.
#[derive(Debug, Clone)]
pub struct Config {
	/// Bind address for the HTTP server
	pub host: String,
	/// Bind port for the HTTP server
	pub port: u16,
	/// Horizon base URL (mainnet)
	pub horizon_url: String,
	/// Horizon base URL (testnet)
	pub horizon_testnet_url: String,
	/// Soroban JSON-RPC URL (mainnet)
	pub soroban_rpc_url: String,
	/// Soroban JSON-RPC URL (testnet)
	pub soroban_rpc_testnet_url: String,
	/// StellarExpert API base URL
	pub stellar_expert_url: String,
	/// Root directory scanned by the projects listing
	pub projects_root: String,
	/// Retry policy shared by all upstream clients
	pub retry: RetryConfig,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			host: "127.0.0.1".to_string(),
			port: 3001,
			horizon_url: "https://horizon.stellar.org".to_string(),
			horizon_testnet_url: "https://horizon-testnet.stellar.org".to_string(),
			soroban_rpc_url: "https://mainnet.sorobanrpc.com".to_string(),
			soroban_rpc_testnet_url: "https://soroban-testnet.stellar.org".to_string(),
			stellar_expert_url: "https://api.stellar.expert/explorer".to_string(),
			projects_root: "projects".to_string(),
			retry: RetryConfig::default(),
		}
	}
}

impl Config {
	/// Loads the configuration from environment variables, falling back to
	/// defaults for anything unset.
	pub fn from_env() -> Result<Self, ConfigError> {
		let defaults = Config::default();

		let port = match env::var("PORT") {
			Ok(raw) => raw.parse::<u16>().map_err(|e| {
				ConfigError::parse_error(
					"PORT must be a valid port number",
					Some(Box::new(e)),
					Some(std::collections::HashMap::from([(
						"provided".to_string(),
						raw.clone(),
					)])),
				)
			})?,
			Err(_) => defaults.port,
		};

		Ok(Self {
			host: env_or("HOST", defaults.host),
			port,
			horizon_url: env_or("STELLAR_HORIZON_URL", defaults.horizon_url),
			horizon_testnet_url: env_or(
				"STELLAR_HORIZON_TESTNET_URL",
				defaults.horizon_testnet_url,
			),
			soroban_rpc_url: env_or("SOROBAN_RPC_URL", defaults.soroban_rpc_url),
			soroban_rpc_testnet_url: env_or(
				"SOROBAN_RPC_TESTNET_URL",
				defaults.soroban_rpc_testnet_url,
			),
			stellar_expert_url: env_or("STELLAR_EXPERT_URL", defaults.stellar_expert_url),
			projects_root: env_or("PROJECTS_ROOT", defaults.projects_root),
			retry: RetryConfig::default(),
		})
	}

	/// The Horizon base URL for a network.
	pub fn horizon_url(&self, network: Network) -> &str {
		match network {
			Network::Mainnet => &self.horizon_url,
			Network::Testnet => &self.horizon_testnet_url,
		}
	}

	/// The Soroban RPC URL for a network.
	pub fn soroban_url(&self, network: Network) -> &str {
		match network {
			Network::Mainnet => &self.soroban_rpc_url,
			Network::Testnet => &self.soroban_rpc_testnet_url,
		}
	}
}

fn env_or(key: &str, default: String) -> String {
	env::var(key).ok().filter(|v| !v.is_empty()).unwrap_or(default)
}
