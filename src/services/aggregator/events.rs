//! Contract event aggregation.
//!
//! Event data is strictly best-effort: any RPC failure degrades to an empty
//! feed with a warning instead of an error response. The scan window defaults
//! to the RPC's retention window and caller-supplied bounds are clamped into
//! it; an explicit cursor bypasses the window entirely.

use serde_json::json;
use tracing::{instrument, warn};

use crate::{
	models::{derive_invocations, ContractEvent, ContractEventsResponse, Network},
	services::soroban::{EventsRequest, RpcEvent, SorobanClient},
	utils::decode_xdr_base64,
};

/// Warning attached when event data could not be fetched.
const EVENTS_UNAVAILABLE_WARNING: &str = "Event data is currently unavailable for this contract";

/// Caller-supplied query parameters for the events endpoint.
#[derive(Debug, Clone, Default)]
pub struct EventsQuery {
	pub limit: u32,
	pub cursor: Option<String>,
	pub start_ledger: Option<u32>,
	pub end_ledger: Option<u32>,
}

/// Computes the ledger scan range. The default start is the beginning of the
/// retention window; caller bounds are clamped into `[oldest, latest]`.
pub fn scan_range(
	latest: u32,
	oldest: u32,
	window: u32,
	start: Option<u32>,
	end: Option<u32>,
) -> (u32, Option<u32>) {
	let default_start = latest.saturating_sub(window).saturating_add(1).max(oldest);
	let start = start
		.map(|s| s.clamp(oldest, latest))
		.unwrap_or(default_start);
	let end = end.map(|e| e.clamp(oldest, latest));
	(start, end)
}

/// Fetches and decodes contract events. Never fails: RPC trouble yields an
/// empty feed with a warning.
#[instrument(skip(soroban, query))]
pub async fn contract_events(
	soroban: &SorobanClient,
	network: Network,
	contract_id: &str,
	query: EventsQuery,
) -> ContractEventsResponse {
	let mut response = ContractEventsResponse {
		contract_id: contract_id.to_string(),
		network: network.to_string(),
		events: Vec::new(),
		invocations: Vec::new(),
		cursor: None,
		latest_ledger: None,
		oldest_ledger: None,
		warning: None,
	};

	let health = match soroban.get_health().await {
		Ok(health) => health,
		Err(e) => {
			warn!(contract_id, error = %e, "RPC health check failed, degrading event feed");
			response.warning = Some(EVENTS_UNAVAILABLE_WARNING.to_string());
			return response;
		}
	};

	response.latest_ledger = Some(health.latest_ledger);
	response.oldest_ledger = Some(health.oldest_ledger);

	let request = if query.cursor.is_some() {
		// A cursor pins the position; ledger bounds would conflict with it
		EventsRequest {
			contract_id: contract_id.to_string(),
			start_ledger: None,
			end_ledger: None,
			cursor: query.cursor,
			limit: query.limit,
		}
	} else {
		let (start, end) = scan_range(
			health.latest_ledger,
			health.oldest_ledger,
			health.ledger_retention_window,
			query.start_ledger,
			query.end_ledger,
		);
		EventsRequest {
			contract_id: contract_id.to_string(),
			start_ledger: Some(start),
			end_ledger: end,
			cursor: None,
			limit: query.limit,
		}
	};

	match soroban.get_events(&request).await {
		Ok(events) => {
			response.events = events.events.iter().map(decode_event).collect();
			response.invocations = derive_invocations(&response.events);
			response.cursor = events.cursor;
			if events.latest_ledger > 0 {
				response.latest_ledger = Some(events.latest_ledger);
			}
		}
		Err(e) => {
			warn!(contract_id, error = %e, "Event fetch failed, degrading event feed");
			response.warning = Some(EVENTS_UNAVAILABLE_WARNING.to_string());
		}
	}

	response
}

/// Decodes an RPC event's XDR topics and value. Undecodable XDR passes
/// through as the raw base64 string rather than dropping the event.
fn decode_event(event: &RpcEvent) -> ContractEvent {
	ContractEvent {
		id: event.id.clone(),
		event_type: event.event_type.clone(),
		ledger: event.ledger,
		ledger_closed_at: event.ledger_closed_at.clone(),
		tx_hash: event.tx_hash.clone(),
		in_successful_contract_call: event.in_successful_contract_call,
		topic_json: event
			.topic
			.iter()
			.map(|t| {
				decode_xdr_base64(t)
					.map(|v| v.to_json())
					.unwrap_or_else(|_| json!(t))
			})
			.collect(),
		value_json: decode_xdr_base64(&event.value)
			.map(|v| v.to_json())
			.unwrap_or_else(|_| json!(event.value)),
	}
}
