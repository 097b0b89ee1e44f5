//! Transaction listing and lookup.
//!
//! Single-transaction lookups try Horizon mainnet first and retry the same
//! hash against testnet on any failure; when both fail the mainnet error is
//! the one surfaced.

use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::{
	api::{ApiError, AppState},
	models::{normalize_transaction, Network},
	services::{
		clamp_limit,
		fallback::{first_success, Provider},
		horizon::HorizonError,
	},
	utils::is_valid_transaction_hash,
};

use super::ListQuery;

pub async fn list(
	state: web::Data<AppState>,
	query: web::Query<ListQuery>,
) -> Result<HttpResponse, ApiError> {
	let network = query.resolve_network()?;
	let limit = clamp_limit(query.limit);
	let transactions = state.horizon(network).get_transactions(limit).await?;
	let records: Vec<_> = transactions
		.into_iter()
		.map(|tx| normalize_transaction(tx).tagged(network))
		.collect();
	Ok(HttpResponse::Ok().json(records))
}

pub async fn detail(
	state: web::Data<AppState>,
	path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
	let hash = path.into_inner();
	if !is_valid_transaction_hash(&hash) {
		return Err(ApiError::validation("Invalid transaction hash")
			.with("provided", hash.as_str())
			.with("expected", "64 hexadecimal characters"));
	}

	let mainnet = state.horizon(Network::Mainnet);
	let testnet = state.horizon(Network::Testnet);

	let lookup = first_success(
		Provider::new("horizon-mainnet", async {
			mainnet
				.get_transaction(&hash)
				.await
				.map(|tx| (tx, Network::Mainnet))
		}),
		vec![Provider::new("horizon-testnet", async {
			testnet
				.get_transaction(&hash)
				.await
				.map(|tx| (tx, Network::Testnet))
		})],
	)
	.await;

	match lookup {
		Ok((tx, network)) => {
			Ok(HttpResponse::Ok().json(normalize_transaction(tx).tagged(network)))
		}
		Err(HorizonError::NotFound(_)) => Err(ApiError::not_found("Transaction not found")
			.with("hash", hash.as_str())
			.with(
				"suggestions",
				json!([
					"Check that the hash is correct",
					"The transaction may not exist on mainnet or testnet",
					"Recent transactions are listed at /api/transactions",
				]),
			)),
		Err(other) => Err(other.into()),
	}
}
