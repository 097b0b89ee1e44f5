//! HTTP error responses.
//!
//! Every failure leaves the gateway as structured JSON with at least a
//! `message` field. Upstream errors map onto the status taxonomy: not-found
//! stays 404, upstream protocol failures become 500 with a retry hint, and
//! connectivity failures become 503.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::{json, Value as JsonValue};

use crate::services::{
	aggregator::AggregatorError, horizon::HorizonError, indexer::IndexerError,
	soroban::SorobanError,
};

/// Hint attached to 500 responses caused by a misbehaving upstream.
pub const RETRY_HINT: &str = "Upstream provider error, please try again later";

/// Message for 503 responses caused by connectivity failures.
pub const UNAVAILABLE_MESSAGE: &str = "Upstream provider unreachable";

/// A JSON error response with an HTTP status.
#[derive(Debug, Clone)]
pub struct ApiError {
	status: StatusCode,
	body: JsonValue,
}

impl ApiError {
	pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
		Self {
			status,
			body: json!({ "message": message.into() }),
		}
	}

	/// 400 for input rejected before any network call.
	pub fn validation(message: impl Into<String>) -> Self {
		Self::new(StatusCode::BAD_REQUEST, message)
	}

	pub fn not_found(message: impl Into<String>) -> Self {
		Self::new(StatusCode::NOT_FOUND, message)
	}

	pub fn internal(message: impl Into<String>) -> Self {
		Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
	}

	pub fn unavailable(message: impl Into<String>) -> Self {
		Self::new(StatusCode::SERVICE_UNAVAILABLE, message)
	}

	/// Adds a contextual field to the JSON body.
	pub fn with(mut self, key: &str, value: impl Into<JsonValue>) -> Self {
		self.body[key] = value.into();
		self
	}

	pub fn status(&self) -> StatusCode {
		self.status
	}

	pub fn body(&self) -> &JsonValue {
		&self.body
	}
}

impl std::fmt::Display for ApiError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self.body.get("message").and_then(JsonValue::as_str) {
			Some(message) => write!(f, "{}", message),
			None => write!(f, "{}", self.status),
		}
	}
}

impl ResponseError for ApiError {
	fn status_code(&self) -> StatusCode {
		self.status
	}

	fn error_response(&self) -> HttpResponse {
		HttpResponse::build(self.status).json(&self.body)
	}
}

impl From<HorizonError> for ApiError {
	fn from(error: HorizonError) -> Self {
		match error {
			HorizonError::NotFound(ctx) => Self::not_found(ctx.message),
			HorizonError::NetworkError(_) => Self::unavailable(UNAVAILABLE_MESSAGE),
			HorizonError::UpstreamError(_) | HorizonError::ParseError(_) => {
				Self::internal(RETRY_HINT)
			}
			HorizonError::Other(_) => Self::internal(RETRY_HINT),
		}
	}
}

impl From<SorobanError> for ApiError {
	fn from(error: SorobanError) -> Self {
		match error {
			SorobanError::NetworkError(_) => Self::unavailable(UNAVAILABLE_MESSAGE),
			SorobanError::KeyError(ctx) => Self::validation(ctx.message),
			SorobanError::RpcError(_) | SorobanError::ParseError(_) | SorobanError::Other(_) => {
				Self::internal(RETRY_HINT)
			}
		}
	}
}

impl From<IndexerError> for ApiError {
	fn from(error: IndexerError) -> Self {
		match error {
			IndexerError::NetworkError(_) => Self::unavailable(UNAVAILABLE_MESSAGE),
			IndexerError::UpstreamError(_) | IndexerError::ParseError(_)
			| IndexerError::Other(_) => Self::internal(RETRY_HINT),
		}
	}
}

impl From<AggregatorError> for ApiError {
	fn from(error: AggregatorError) -> Self {
		match error {
			AggregatorError::NotFound(ctx) => Self::not_found(ctx.message),
			AggregatorError::Horizon(e) => e.into(),
			AggregatorError::Soroban(e) => e.into(),
			AggregatorError::Indexer(e) => e.into(),
		}
	}
}
