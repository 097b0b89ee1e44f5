//! Soroban contract event data structures.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// A contract event with decoded topics and value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContractEvent {
	/// Opaque, cursor-ordered event id
	pub id: String,

	#[serde(rename = "type")]
	pub event_type: String,

	pub ledger: u32,
	pub ledger_closed_at: String,
	pub tx_hash: String,
	pub in_successful_contract_call: bool,

	/// Decoded topic values
	pub topic_json: Vec<JsonValue>,

	/// Decoded event value
	pub value_json: JsonValue,
}

/// A contract invocation derived from events: one entry per transaction hash,
/// first-seen order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Invocation {
	pub tx_hash: String,
	pub ledger: u32,
	pub ledger_closed_at: String,
	pub success: bool,
}

/// The events endpoint response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractEventsResponse {
	pub contract_id: String,
	pub network: String,
	pub events: Vec<ContractEvent>,
	pub invocations: Vec<Invocation>,

	/// Pagination cursor for the next page, when the RPC supplied one
	pub cursor: Option<String>,

	pub latest_ledger: Option<u32>,
	pub oldest_ledger: Option<u32>,

	/// Set when event data is degraded or unavailable
	pub warning: Option<String>,
}

/// Derives invocations from events by first-seen transaction hash.
pub fn derive_invocations(events: &[ContractEvent]) -> Vec<Invocation> {
	let mut seen = std::collections::HashSet::new();
	let mut invocations = Vec::new();
	for event in events {
		if !event.tx_hash.is_empty() && seen.insert(event.tx_hash.clone()) {
			invocations.push(Invocation {
				tx_hash: event.tx_hash.clone(),
				ledger: event.ledger,
				ledger_closed_at: event.ledger_closed_at.clone(),
				success: event.in_successful_contract_call,
			});
		}
	}
	invocations
}
