//! Upstream service clients and aggregation logic.
//!
//! Each upstream (Horizon, Soroban RPC, StellarExpert) gets its own client
//! with its own error type; the aggregator composes them. All clients share
//! the same base HTTP client shape: bounded timeouts plus transient-error
//! retries with exponential backoff.

pub mod aggregator;
pub mod fallback;
pub mod horizon;
pub mod indexer;
pub mod soroban;

use std::time::Duration;

use anyhow::Context;
use reqwest_middleware::ClientWithMiddleware;
use reqwest_retry::{
	default_on_request_failure, default_on_request_success, Retryable, RetryableStrategy,
};

use crate::utils::{create_retryable_http_client, RetryConfig};

/// Retries transient failures (5xx, connect errors) and passes everything
/// else through untouched.
pub struct TransientErrorRetryStrategy;
impl RetryableStrategy for TransientErrorRetryStrategy {
	fn handle(
		&self,
		res: &Result<reqwest::Response, reqwest_middleware::Error>,
	) -> Option<Retryable> {
		match res {
			Ok(success) => default_on_request_success(success),
			Err(error) => default_on_request_failure(error),
		}
	}
}

/// Builds the retryable HTTP client every upstream uses: 30s request timeout,
/// 20s connect timeout, pooled connections, transient-error retries.
pub fn build_upstream_client(retry: &RetryConfig) -> Result<ClientWithMiddleware, anyhow::Error> {
	let base_client = reqwest::ClientBuilder::new()
		.pool_idle_timeout(Duration::from_secs(90))
		.pool_max_idle_per_host(32)
		.timeout(Duration::from_secs(30))
		.connect_timeout(Duration::from_secs(20))
		.build()
		.context("Failed to create base HTTP client")?;

	Ok(create_retryable_http_client(
		retry,
		base_client,
		Some(TransientErrorRetryStrategy),
	))
}

/// Whether a request error is a connectivity failure (DNS, refused connection,
/// timeout) rather than an upstream-answered error.
///
/// The retry middleware reports terminal transport failures as
/// `Error::Middleware` wrapping an opaque chain, so the `reqwest::Error`
/// checks alone are not enough: the chain is walked for any transport-level
/// cause, down to the underlying `std::io::Error`.
pub fn is_connectivity_error(error: &reqwest_middleware::Error) -> bool {
	match error {
		reqwest_middleware::Error::Reqwest(e) => is_transport_error(e),
		reqwest_middleware::Error::Middleware(inner) => inner.chain().any(|cause| {
			if let Some(e) = cause.downcast_ref::<reqwest::Error>() {
				return is_transport_error(e);
			}
			if let Some(e) = cause.downcast_ref::<reqwest_middleware::Error>() {
				return is_connectivity_error(e);
			}
			cause.downcast_ref::<std::io::Error>().is_some()
		}),
	}
}

fn is_transport_error(error: &reqwest::Error) -> bool {
	error.is_timeout() || error.is_connect() || error.is_request()
}

/// Clamps a caller-supplied page size into 1..=200, defaulting to 20.
pub fn clamp_limit(limit: Option<u32>) -> u32 {
	limit.unwrap_or(20).clamp(1, 200)
}
