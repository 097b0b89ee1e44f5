//! Soroban JSON-RPC client.
//!
//! Covers the methods the gateway needs: `getHealth`, `getLatestLedger`,
//! `getLedgerEntries` and `getEvents`. Ledger keys are built here from
//! strkey contract ids and WASM hashes.

mod error;

pub use error::SorobanError;

use std::collections::HashMap;

use reqwest_middleware::ClientWithMiddleware;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use stellar_xdr::curr::{
	ContractDataDurability, Hash, LedgerKey, LedgerKeyContractCode, LedgerKeyContractData, Limits,
	ScAddress, ScVal, WriteXdr,
};
use tracing::instrument;

use crate::{
	models::Network,
	services::{build_upstream_client, is_connectivity_error},
	utils::RetryConfig,
};

/// `getHealth` response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
	#[serde(default)]
	pub status: String,

	#[serde(default)]
	pub latest_ledger: u32,

	#[serde(default)]
	pub oldest_ledger: u32,

	#[serde(default)]
	pub ledger_retention_window: u32,
}

/// `getLatestLedger` response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestLedgerResponse {
	#[serde(default)]
	pub id: String,

	#[serde(default)]
	pub protocol_version: u32,

	#[serde(default)]
	pub sequence: u32,
}

/// One entry in a `getLedgerEntries` response; `xdr` is base64 XDR of the
/// `LedgerEntryData`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntryResult {
	pub key: String,
	pub xdr: String,

	#[serde(default)]
	pub last_modified_ledger_seq: Option<u32>,

	#[serde(default)]
	pub live_until_ledger_seq: Option<u32>,
}

/// `getLedgerEntries` response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntriesResponse {
	#[serde(default)]
	pub entries: Vec<LedgerEntryResult>,

	#[serde(default)]
	pub latest_ledger: u32,
}

/// Parameters for a `getEvents` call.
#[derive(Debug, Clone, Default)]
pub struct EventsRequest {
	pub contract_id: String,
	pub start_ledger: Option<u32>,
	pub end_ledger: Option<u32>,
	pub cursor: Option<String>,
	pub limit: u32,
}

/// One event in a `getEvents` response; topics and value are base64 XDR.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcEvent {
	#[serde(default, rename = "type")]
	pub event_type: String,

	#[serde(default)]
	pub ledger: u32,

	#[serde(default)]
	pub ledger_closed_at: String,

	#[serde(default)]
	pub contract_id: String,

	#[serde(default)]
	pub id: String,

	#[serde(default)]
	pub paging_token: Option<String>,

	#[serde(default)]
	pub topic: Vec<String>,

	#[serde(default)]
	pub value: String,

	#[serde(default)]
	pub in_successful_contract_call: bool,

	#[serde(default)]
	pub tx_hash: String,
}

/// `getEvents` response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsResponse {
	#[serde(default)]
	pub events: Vec<RpcEvent>,

	#[serde(default)]
	pub latest_ledger: u32,

	#[serde(default)]
	pub cursor: Option<String>,
}

#[derive(Serialize)]
struct RpcRequest<'a, P: Serialize> {
	jsonrpc: &'static str,
	id: u32,
	method: &'a str,
	params: P,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
	code: i64,
	message: String,
}

#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
	result: Option<T>,
	error: Option<RpcErrorObject>,
}

/// Client for one Soroban RPC endpoint.
#[derive(Clone)]
pub struct SorobanClient {
	base_url: String,
	network: Network,
	client: ClientWithMiddleware,
}

impl SorobanClient {
	pub fn new(base_url: &str, network: Network, retry: &RetryConfig) -> Result<Self, SorobanError> {
		Ok(Self {
			base_url: base_url.trim_end_matches('/').to_string(),
			network,
			client: build_upstream_client(retry)?,
		})
	}

	pub fn network(&self) -> Network {
		self.network
	}

	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	/// RPC health: latest and oldest retained ledger plus the retention window.
	#[instrument(skip(self))]
	pub async fn get_health(&self) -> Result<HealthResponse, SorobanError> {
		self.call("getHealth", serde_json::json!({})).await
	}

	/// The most recently closed ledger known to the RPC.
	#[instrument(skip(self))]
	pub async fn get_latest_ledger(&self) -> Result<LatestLedgerResponse, SorobanError> {
		self.call("getLatestLedger", serde_json::json!({})).await
	}

	/// Fetches ledger entries by base64-encoded XDR keys.
	#[instrument(skip(self, keys))]
	pub async fn get_ledger_entries(
		&self,
		keys: &[String],
	) -> Result<LedgerEntriesResponse, SorobanError> {
		self.call("getLedgerEntries", serde_json::json!({ "keys": keys }))
			.await
	}

	/// Fetches contract events. `cursor` takes precedence over the ledger
	/// range, matching RPC semantics.
	#[instrument(skip(self, request), fields(contract_id = %request.contract_id))]
	pub async fn get_events(&self, request: &EventsRequest) -> Result<EventsResponse, SorobanError> {
		let mut params = serde_json::json!({
			"filters": [{
				"type": "contract",
				"contractIds": [request.contract_id],
			}],
			"pagination": { "limit": request.limit },
		});

		if let Some(cursor) = &request.cursor {
			params["pagination"]["cursor"] = serde_json::json!(cursor);
		} else {
			if let Some(start) = request.start_ledger {
				params["startLedger"] = serde_json::json!(start);
			}
			if let Some(end) = request.end_ledger {
				params["endLedger"] = serde_json::json!(end);
			}
		}

		self.call("getEvents", params).await
	}

	async fn call<P: Serialize, T: DeserializeOwned>(
		&self,
		method: &str,
		params: P,
	) -> Result<T, SorobanError> {
		let metadata = HashMap::from([
			("url".to_string(), self.base_url.clone()),
			("method".to_string(), method.to_string()),
			("network".to_string(), self.network.to_string()),
		]);

		let request = RpcRequest {
			jsonrpc: "2.0",
			id: 1,
			method,
			params,
		};

		let response = self
			.client
			.post(&self.base_url)
			.json(&request)
			.send()
			.await
			.map_err(|e| {
				if is_connectivity_error(&e) {
					SorobanError::network_error(
						format!("Failed to reach Soroban RPC for {}", method),
						Some(Box::new(e)),
						Some(metadata.clone()),
					)
				} else {
					SorobanError::rpc_error(
						format!("Soroban RPC request for {} failed", method),
						Some(Box::new(e)),
						Some(metadata.clone()),
					)
				}
			})?;

		let status = response.status();
		if !status.is_success() {
			return Err(SorobanError::rpc_error(
				format!(
					"Soroban RPC returned status {} for {}",
					status.as_u16(),
					method
				),
				None,
				Some(metadata),
			));
		}

		let envelope: RpcResponse<T> = response.json().await.map_err(|e| {
			SorobanError::parse_error(
				format!("Failed to decode Soroban RPC {} response", method),
				Some(Box::new(e)),
				Some(metadata.clone()),
			)
		})?;

		if let Some(error) = envelope.error {
			let metadata = {
				let mut m = metadata;
				m.insert("code".to_string(), error.code.to_string());
				m
			};
			return Err(SorobanError::rpc_error(error.message, None, Some(metadata)));
		}

		envelope.result.ok_or_else(|| {
			SorobanError::parse_error(
				format!("Soroban RPC {} response had no result", method),
				None,
				None,
			)
		})
	}
}

impl std::fmt::Debug for SorobanClient {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SorobanClient")
			.field("base_url", &self.base_url)
			.field("network", &self.network)
			.finish()
	}
}

/// Builds the base64 XDR ledger key for a contract's instance entry.
pub fn contract_instance_key(contract_id: &str) -> Result<String, SorobanError> {
	let contract = stellar_strkey::Contract::from_string(contract_id).map_err(|e| {
		SorobanError::key_error(
			"Invalid contract id",
			Some(Box::new(e)),
			Some(HashMap::from([(
				"contract_id".to_string(),
				contract_id.to_string(),
			)])),
		)
	})?;

	let key = LedgerKey::ContractData(LedgerKeyContractData {
		contract: ScAddress::Contract(Hash(contract.0)),
		key: ScVal::LedgerKeyContractInstance,
		durability: ContractDataDurability::Persistent,
	});

	key.to_xdr_base64(Limits::none()).map_err(|e| {
		SorobanError::key_error("Failed to encode contract instance key", Some(Box::new(e)), None)
	})
}

/// Builds the base64 XDR ledger key for a contract-code entry.
pub fn contract_code_key(wasm_hash: &[u8; 32]) -> Result<String, SorobanError> {
	let key = LedgerKey::ContractCode(LedgerKeyContractCode {
		hash: Hash(*wasm_hash),
	});

	key.to_xdr_base64(Limits::none()).map_err(|e| {
		SorobanError::key_error("Failed to encode contract code key", Some(Box::new(e)), None)
	})
}
