//! Ordered provider fallback.
//!
//! A fallback chain is an explicit list of providers tried in order. The
//! first success wins; when every provider fails, the error surfaced is the
//! one from the first provider, since later providers are best-effort
//! substitutes whose failures matter less to the caller.

use futures::future::BoxFuture;
use std::future::Future;
use tracing::warn;

/// A named unit of work in a fallback chain.
pub struct Provider<'a, T, E> {
	pub name: &'static str,
	call: BoxFuture<'a, Result<T, E>>,
}

impl<'a, T, E> Provider<'a, T, E> {
	pub fn new<F>(name: &'static str, call: F) -> Self
	where
		F: Future<Output = Result<T, E>> + Send + 'a,
	{
		Self {
			name,
			call: Box::pin(call),
		}
	}
}

/// Runs providers in order and returns the first success.
///
/// On total failure the primary provider's error is returned; fallback
/// errors are logged and dropped.
pub async fn first_success<T, E>(
	primary: Provider<'_, T, E>,
	fallbacks: Vec<Provider<'_, T, E>>,
) -> Result<T, E>
where
	E: std::fmt::Display,
{
	let primary_name = primary.name;
	let primary_error = match primary.call.await {
		Ok(value) => return Ok(value),
		Err(e) => {
			warn!(provider = primary_name, error = %e, "Primary provider failed, trying fallbacks");
			e
		}
	};

	for provider in fallbacks {
		match provider.call.await {
			Ok(value) => return Ok(value),
			Err(e) => {
				warn!(provider = provider.name, error = %e, "Fallback provider failed");
			}
		}
	}

	Err(primary_error)
}
