//! Indexer service error types.

use crate::utils::logging::error::{ErrorContext, TraceableError};
use std::collections::HashMap;
use thiserror::Error as ThisError;
use uuid::Uuid;

/// Represents possible errors when querying the StellarExpert indexer
#[derive(ThisError, Debug)]
pub enum IndexerError {
	/// The indexer answered with an error status
	#[error("Upstream error: {0}")]
	UpstreamError(ErrorContext),

	/// DNS, connect or timeout failures reaching the indexer
	#[error("Network error: {0}")]
	NetworkError(ErrorContext),

	/// The response body could not be decoded
	#[error("Parse error: {0}")]
	ParseError(ErrorContext),

	/// Other errors that don't fit into the categories above
	#[error(transparent)]
	Other(#[from] anyhow::Error),
}

impl IndexerError {
	pub fn upstream_error(
		msg: impl Into<String>,
		source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::UpstreamError(ErrorContext::new_with_log(msg, source, metadata))
	}

	pub fn network_error(
		msg: impl Into<String>,
		source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::NetworkError(ErrorContext::new_with_log(msg, source, metadata))
	}

	pub fn parse_error(
		msg: impl Into<String>,
		source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::ParseError(ErrorContext::new_with_log(msg, source, metadata))
	}
}

impl TraceableError for IndexerError {
	fn trace_id(&self) -> String {
		match self {
			Self::UpstreamError(ctx) => ctx.trace_id.clone(),
			Self::NetworkError(ctx) => ctx.trace_id.clone(),
			Self::ParseError(ctx) => ctx.trace_id.clone(),
			Self::Other(_) => Uuid::new_v4().to_string(),
		}
	}
}
