//! Identifier classification.
//!
//! Pure and stateless: the term is matched against the known identifier
//! shapes in a fixed order and no upstream call is made.

use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::{
	api::ApiError,
	utils::{classify, SearchMatch},
};

pub async fn search(path: web::Path<String>) -> Result<HttpResponse, ApiError> {
	let term = path.into_inner();
	let body = match classify(&term) {
		Some(SearchMatch::Account) => json!({ "type": "account", "id": term }),
		Some(SearchMatch::Contract) => json!({ "type": "contract", "contractId": term }),
		Some(SearchMatch::TransactionHash) => json!({ "type": "transaction", "hash": term }),
		Some(SearchMatch::LedgerSequence) => json!({ "type": "ledger", "sequence": term }),
		None => {
			return Err(ApiError::not_found("No match for search term")
				.with("provided", term.as_str())
				.with(
					"suggestions",
					json!([
						"Account ids start with G and are 56 characters",
						"Contract ids start with C and are 56 characters",
						"Transaction hashes are 64 hexadecimal characters",
						"Ledger sequences are numeric",
					]),
				))
		}
	};

	Ok(HttpResponse::Ok().json(body))
}
