//! StellarExpert indexer client.
//!
//! StellarExpert supplies contract lifecycle metadata the RPC cannot:
//! creation time, creator, invocation counts, validation status. It is always
//! best-effort; a 404 means "not indexed", reported as `Ok(None)` rather than
//! an error so callers can distinguish absence from outage.

mod error;

pub use error::IndexerError;

use std::collections::HashMap;

use reqwest_middleware::ClientWithMiddleware;
use tracing::instrument;

use crate::{
	models::{ExpertContract, Network},
	services::{build_upstream_client, is_connectivity_error},
	utils::RetryConfig,
};

/// Client for the StellarExpert explorer API.
#[derive(Clone)]
pub struct IndexerClient {
	base_url: String,
	client: ClientWithMiddleware,
}

impl IndexerClient {
	pub fn new(base_url: &str, retry: &RetryConfig) -> Result<Self, IndexerError> {
		Ok(Self {
			base_url: base_url.trim_end_matches('/').to_string(),
			client: build_upstream_client(retry)?,
		})
	}

	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	/// Contract metadata for a network, `None` when the indexer does not know
	/// the contract.
	#[instrument(skip(self))]
	pub async fn get_contract(
		&self,
		network: Network,
		contract_id: &str,
	) -> Result<Option<ExpertContract>, IndexerError> {
		let url = format!(
			"{}/{}/contract/{}",
			self.base_url,
			network.expert_segment(),
			contract_id
		);
		let metadata = HashMap::from([
			("url".to_string(), url.clone()),
			("network".to_string(), network.to_string()),
		]);

		let response = self.client.get(&url).send().await.map_err(|e| {
			if is_connectivity_error(&e) {
				IndexerError::network_error(
					"Failed to reach StellarExpert",
					Some(Box::new(e)),
					Some(metadata.clone()),
				)
			} else {
				IndexerError::upstream_error(
					"StellarExpert request failed",
					Some(Box::new(e)),
					Some(metadata.clone()),
				)
			}
		})?;

		let status = response.status();
		if status == reqwest::StatusCode::NOT_FOUND {
			return Ok(None);
		}
		if !status.is_success() {
			return Err(IndexerError::upstream_error(
				format!("StellarExpert returned status {}", status.as_u16()),
				None,
				Some(metadata),
			));
		}

		let contract: ExpertContract = response.json().await.map_err(|e| {
			IndexerError::parse_error(
				"Failed to decode StellarExpert contract response",
				Some(Box::new(e)),
				Some(metadata),
			)
		})?;

		Ok(contract.is_known().then_some(contract))
	}
}

impl std::fmt::Debug for IndexerClient {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("IndexerClient")
			.field("base_url", &self.base_url)
			.finish()
	}
}
