//! Account lookup.

use actix_web::{web, HttpResponse};

use crate::{
	api::{ApiError, AppState},
	services::horizon::HorizonError,
	utils::is_valid_account_id,
};

use super::ListQuery;

pub async fn detail(
	state: web::Data<AppState>,
	path: web::Path<String>,
	query: web::Query<ListQuery>,
) -> Result<HttpResponse, ApiError> {
	let account_id = path.into_inner();
	if !is_valid_account_id(&account_id) {
		return Err(ApiError::validation("Invalid account id")
			.with("provided", account_id.as_str())
			.with("expected", "a 56-character id starting with G"));
	}

	let network = query.resolve_network()?;
	let account = state
		.horizon(network)
		.get_account(&account_id)
		.await
		.map_err(|e| match e {
			HorizonError::NotFound(_) => ApiError::not_found("Account not found")
				.with("account_id", account_id.as_str()),
			other => other.into(),
		})?;

	Ok(HttpResponse::Ok().json(account))
}
