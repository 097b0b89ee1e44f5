//! Horizon REST client.
//!
//! One client per network, built once at startup. Every method maps upstream
//! failures into the [`HorizonError`] taxonomy: 404s become `NotFound`, other
//! error statuses `UpstreamError`, transport failures `NetworkError`, and
//! undecodable bodies `ParseError`.

mod error;

pub use error::HorizonError;

use std::collections::HashMap;

use reqwest_middleware::ClientWithMiddleware;
use serde::{de::DeserializeOwned, Deserialize};
use tracing::instrument;

use crate::{
	models::{Account, Ledger, Network, Operation, Transaction},
	services::{build_upstream_client, is_connectivity_error},
	utils::RetryConfig,
};

/// A page of records as Horizon embeds them.
#[derive(Debug, Deserialize)]
struct RecordsPage<T> {
	#[serde(rename = "_embedded", default)]
	embedded: Embedded<T>,
}

#[derive(Debug, Deserialize)]
struct Embedded<T> {
	#[serde(default)]
	records: Vec<T>,
}

impl<T> Default for Embedded<T> {
	fn default() -> Self {
		Self {
			records: Vec::new(),
		}
	}
}

/// Client for one Horizon instance.
#[derive(Clone)]
pub struct HorizonClient {
	base_url: String,
	network: Network,
	client: ClientWithMiddleware,
}

impl HorizonClient {
	pub fn new(base_url: &str, network: Network, retry: &RetryConfig) -> Result<Self, HorizonError> {
		Ok(Self {
			base_url: base_url.trim_end_matches('/').to_string(),
			network,
			client: build_upstream_client(retry)?,
		})
	}

	/// The network this client talks to.
	pub fn network(&self) -> Network {
		self.network
	}

	/// The configured base URL.
	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	/// Recent ledgers, newest first.
	#[instrument(skip(self))]
	pub async fn get_ledgers(&self, limit: u32) -> Result<Vec<Ledger>, HorizonError> {
		let page: RecordsPage<Ledger> = self
			.get_json(&format!("ledgers?order=desc&limit={}", limit), "ledgers")
			.await?;
		Ok(page.embedded.records)
	}

	/// Recent transactions, newest first.
	#[instrument(skip(self))]
	pub async fn get_transactions(&self, limit: u32) -> Result<Vec<Transaction>, HorizonError> {
		let page: RecordsPage<Transaction> = self
			.get_json(
				&format!("transactions?order=desc&limit={}", limit),
				"transactions",
			)
			.await?;
		Ok(page.embedded.records)
	}

	/// Recent operations, newest first.
	#[instrument(skip(self))]
	pub async fn get_operations(&self, limit: u32) -> Result<Vec<Operation>, HorizonError> {
		let page: RecordsPage<Operation> = self
			.get_json(
				&format!("operations?order=desc&limit={}", limit),
				"operations",
			)
			.await?;
		Ok(page.embedded.records)
	}

	/// A single ledger by sequence number.
	#[instrument(skip(self))]
	pub async fn get_ledger(&self, sequence: u32) -> Result<Ledger, HorizonError> {
		self.get_json(&format!("ledgers/{}", sequence), "ledger")
			.await
	}

	/// A single transaction by hash.
	#[instrument(skip(self))]
	pub async fn get_transaction(&self, hash: &str) -> Result<Transaction, HorizonError> {
		self.get_json(&format!("transactions/{}", hash), "transaction")
			.await
	}

	/// A single account by id.
	#[instrument(skip(self))]
	pub async fn get_account(&self, account_id: &str) -> Result<Account, HorizonError> {
		self.get_json(&format!("accounts/{}", account_id), "account")
			.await
	}

	async fn get_json<T: DeserializeOwned>(
		&self,
		path: &str,
		resource: &str,
	) -> Result<T, HorizonError> {
		let url = format!("{}/{}", self.base_url, path);
		let metadata = HashMap::from([
			("url".to_string(), url.clone()),
			("network".to_string(), self.network.to_string()),
		]);

		let response = self.client.get(&url).send().await.map_err(|e| {
			if is_connectivity_error(&e) {
				HorizonError::network_error(
					format!("Failed to reach Horizon for {}", resource),
					Some(Box::new(e)),
					Some(metadata.clone()),
				)
			} else {
				HorizonError::upstream_error(
					format!("Horizon request for {} failed", resource),
					Some(Box::new(e)),
					Some(metadata.clone()),
				)
			}
		})?;

		let status = response.status();
		if status == reqwest::StatusCode::NOT_FOUND {
			return Err(HorizonError::not_found(
				format!("Horizon has no such {}", resource),
				None,
				Some(metadata),
			));
		}
		if !status.is_success() {
			return Err(HorizonError::upstream_error(
				format!(
					"Horizon returned status {} for {}",
					status.as_u16(),
					resource
				),
				None,
				Some(metadata),
			));
		}

		response.json::<T>().await.map_err(|e| {
			HorizonError::parse_error(
				format!("Failed to decode Horizon {} response", resource),
				Some(Box::new(e)),
				Some(metadata),
			)
		})
	}
}

impl std::fmt::Debug for HorizonClient {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("HorizonClient")
			.field("base_url", &self.base_url)
			.field("network", &self.network)
			.finish()
	}
}
