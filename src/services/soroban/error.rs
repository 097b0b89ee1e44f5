//! Soroban RPC service error types.

use crate::utils::logging::error::{ErrorContext, TraceableError};
use std::collections::HashMap;
use thiserror::Error as ThisError;
use uuid::Uuid;

/// Represents possible errors when querying a Soroban RPC endpoint
#[derive(ThisError, Debug)]
pub enum SorobanError {
	/// The RPC answered with a JSON-RPC error envelope
	#[error("RPC error: {0}")]
	RpcError(ErrorContext),

	/// DNS, connect or timeout failures reaching the RPC
	#[error("Network error: {0}")]
	NetworkError(ErrorContext),

	/// The response body could not be decoded
	#[error("Parse error: {0}")]
	ParseError(ErrorContext),

	/// Invalid input for a ledger key (bad contract id or hash)
	#[error("Key error: {0}")]
	KeyError(ErrorContext),

	/// Other errors that don't fit into the categories above
	#[error(transparent)]
	Other(#[from] anyhow::Error),
}

impl SorobanError {
	pub fn rpc_error(
		msg: impl Into<String>,
		source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::RpcError(ErrorContext::new_with_log(msg, source, metadata))
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

	pub fn key_error(
		msg: impl Into<String>,
		source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::KeyError(ErrorContext::new_with_log(msg, source, metadata))
	}
}

impl TraceableError for SorobanError {
	fn trace_id(&self) -> String {
		match self {
			Self::RpcError(ctx) => ctx.trace_id.clone(),
			Self::NetworkError(ctx) => ctx.trace_id.clone(),
			Self::ParseError(ctx) => ctx.trace_id.clone(),
			Self::KeyError(ctx) => ctx.trace_id.clone(),
			Self::Other(_) => Uuid::new_v4().to_string(),
		}
	}
}
