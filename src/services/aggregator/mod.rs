//! Aggregation across upstream providers.
//!
//! These functions compose the Horizon, Soroban RPC and StellarExpert clients
//! into the responses the gateway serves: network statistics, contract
//! summaries with provider fallback, and contract event feeds.

mod contracts;
mod events;
mod stats;

pub use contracts::contract_summary;
pub use events::{contract_events, EventsQuery};
pub use stats::{
	compute_avg_ledger_time, compute_fee_stats, compute_tps, network_stats, AdditionalMetrics,
	FeeStats, LatestLedgerBlock, NetworkStats, NetworkStatsBlock, RecentTransaction,
};

use crate::{
	services::{horizon::HorizonError, indexer::IndexerError, soroban::SorobanError},
	utils::logging::error::{ErrorContext, TraceableError},
};
use thiserror::Error as ThisError;

/// An error from a multi-provider aggregation.
#[derive(ThisError, Debug)]
pub enum AggregatorError {
	/// No provider knows the requested resource
	#[error("Not found: {0}")]
	NotFound(ErrorContext),

	#[error(transparent)]
	Horizon(#[from] HorizonError),

	#[error(transparent)]
	Soroban(#[from] SorobanError),

	#[error(transparent)]
	Indexer(#[from] IndexerError),
}

impl AggregatorError {
	pub fn not_found(
		msg: impl Into<String>,
		metadata: Option<std::collections::HashMap<String, String>>,
	) -> Self {
		Self::NotFound(ErrorContext::new_with_log(msg, None, metadata))
	}
}

impl TraceableError for AggregatorError {
	fn trace_id(&self) -> String {
		match self {
			Self::NotFound(ctx) => ctx.trace_id.clone(),
			Self::Horizon(e) => e.trace_id(),
			Self::Soroban(e) => e.trace_id(),
			Self::Indexer(e) => e.trace_id(),
		}
	}
}
