//! Operation listing.

use actix_web::{web, HttpResponse};

use crate::{
	api::{ApiError, AppState},
	models::normalize_operation,
	services::clamp_limit,
};

use super::ListQuery;

pub async fn list(
	state: web::Data<AppState>,
	query: web::Query<ListQuery>,
) -> Result<HttpResponse, ApiError> {
	let network = query.resolve_network()?;
	let limit = clamp_limit(query.limit);
	let operations = state.horizon(network).get_operations(limit).await?;
	let records: Vec<_> = operations.into_iter().map(normalize_operation).collect();
	Ok(HttpResponse::Ok().json(records))
}
