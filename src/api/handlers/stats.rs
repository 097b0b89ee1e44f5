//! Network statistics endpoint.

use actix_web::{web, HttpResponse};

use crate::{
	api::{ApiError, AppState},
	models::Network,
	services::aggregator,
};

/// Aggregated mainnet statistics. Requires both Horizon fetches to succeed.
pub async fn network_stats(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
	let stats = aggregator::network_stats(state.horizon(Network::Mainnet)).await?;
	Ok(HttpResponse::Ok().json(stats))
}
