//! Ledger listing and lookup.

use actix_web::{web, HttpResponse};

use crate::{
	api::{ApiError, AppState},
	models::normalize_ledger,
	services::clamp_limit,
};

use super::ListQuery;

pub async fn list(
	state: web::Data<AppState>,
	query: web::Query<ListQuery>,
) -> Result<HttpResponse, ApiError> {
	let network = query.resolve_network()?;
	let limit = clamp_limit(query.limit);
	let ledgers = state.horizon(network).get_ledgers(limit).await?;
	let records: Vec<_> = ledgers.into_iter().map(normalize_ledger).collect();
	Ok(HttpResponse::Ok().json(records))
}

pub async fn detail(
	state: web::Data<AppState>,
	path: web::Path<String>,
	query: web::Query<ListQuery>,
) -> Result<HttpResponse, ApiError> {
	let raw = path.into_inner();
	let sequence: u32 = match raw.parse() {
		Ok(sequence) if sequence > 0 => sequence,
		_ => {
			return Err(ApiError::validation("Invalid ledger sequence")
				.with("provided", raw.as_str())
				.with("expected", "a positive integer"))
		}
	};

	let network = query.resolve_network()?;
	let ledger = state
		.horizon(network)
		.get_ledger(sequence)
		.await
		.map_err(|e| match e {
			crate::services::horizon::HorizonError::NotFound(_) => {
				ApiError::not_found("Ledger not found")
					.with("sequence", sequence)
					.with(
						"suggestions",
						serde_json::json!([
							"Check that the sequence number is correct",
							"Recent ledgers are listed at /api/ledgers",
						]),
					)
			}
			other => other.into(),
		})?;

	Ok(HttpResponse::Ok().json(normalize_ledger(ledger)))
}
