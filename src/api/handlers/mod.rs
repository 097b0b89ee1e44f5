//! Request handlers, one module per resource.

pub mod accounts;
pub mod contracts;
pub mod health;
pub mod ledgers;
pub mod operations;
pub mod projects;
pub mod search;
pub mod stats;
pub mod transactions;

use serde::Deserialize;

/// Query parameters shared by the listing endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
	pub limit: Option<u32>,
	pub network: Option<String>,
}

impl ListQuery {
	pub fn resolve_network(&self) -> Result<crate::models::Network, super::ApiError> {
		super::NetworkQuery {
			network: self.network.clone(),
		}
		.resolve()
	}
}
