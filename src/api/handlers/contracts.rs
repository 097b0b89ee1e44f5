//! Contract summary and event endpoints.

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use crate::{
	api::{ApiError, AppState, NetworkQuery},
	services::{
		aggregator::{contract_events, contract_summary, AggregatorError, EventsQuery},
		clamp_limit,
	},
	utils::is_valid_contract_id,
};

pub async fn summary(
	state: web::Data<AppState>,
	path: web::Path<String>,
	query: web::Query<NetworkQuery>,
) -> Result<HttpResponse, ApiError> {
	let contract_id = path.into_inner();
	if !is_valid_contract_id(&contract_id) {
		return Err(invalid_contract_id(&contract_id));
	}

	let network = query.resolve()?;
	let summary = contract_summary(
		state.soroban(network),
		&state.indexer,
		network,
		&contract_id,
	)
	.await
	.map_err(|e| match e {
		AggregatorError::NotFound(_) => ApiError::not_found("Contract not found")
			.with("contractId", contract_id.as_str())
			.with("network", network.to_string()),
		other => other.into(),
	})?;

	Ok(HttpResponse::Ok().json(summary))
}

/// Query parameters for the contract events endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractEventsQuery {
	pub network: Option<String>,
	pub limit: Option<u32>,
	pub cursor: Option<String>,
	pub start_ledger: Option<u32>,
	pub end_ledger: Option<u32>,
}

pub async fn events(
	state: web::Data<AppState>,
	path: web::Path<String>,
	query: web::Query<ContractEventsQuery>,
) -> Result<HttpResponse, ApiError> {
	let contract_id = path.into_inner();
	if !is_valid_contract_id(&contract_id) {
		return Err(invalid_contract_id(&contract_id));
	}

	let network = NetworkQuery {
		network: query.network.clone(),
	}
	.resolve()?;

	let response = contract_events(
		state.soroban(network),
		network,
		&contract_id,
		EventsQuery {
			limit: clamp_limit(query.limit),
			cursor: query.cursor.clone(),
			start_ledger: query.start_ledger,
			end_ledger: query.end_ledger,
		},
	)
	.await;

	Ok(HttpResponse::Ok().json(response))
}

fn invalid_contract_id(provided: &str) -> ApiError {
	ApiError::validation("Invalid contract id")
		.with("provided", provided)
		.with("expected", "a 56-character id starting with C")
		.with(
			"suggestions",
			json!(["Contract ids use the base32 alphabet A-Z and 2-7"]),
		)
}
