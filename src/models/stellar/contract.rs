//! Soroban contract data structures.
//!
//! [`ContractSummary`] is the aggregated response for a contract: Soroban RPC
//! supplies the live instance (executable, storage, code), StellarExpert
//! supplies lifecycle metadata, and `source` records which providers actually
//! contributed.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Which providers contributed to a contract summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractSource {
	#[serde(rename = "soroban-rpc")]
	SorobanRpc,

	#[serde(rename = "soroban-rpc+stellar-expert")]
	Combined,

	#[serde(rename = "stellar-expert")]
	StellarExpert,
}

/// A decoded instance-storage entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageEntry {
	pub key: String,
	pub value: JsonValue,
}

/// The aggregated contract response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractSummary {
	pub contract_id: String,
	pub network: String,
	pub status: String,

	/// "wasm" or "asset"
	pub executable_type: String,

	pub wasm_hash: Option<String>,
	pub code_hash: Option<String>,

	/// Decoded WASM byte length
	pub code_size: Option<u64>,

	pub created_ledger: Option<u32>,
	pub created_at: Option<String>,
	pub creator: Option<String>,
	pub last_modified_ledger: Option<u32>,
	pub latest_ledger: Option<u32>,
	pub oldest_ledger: Option<u32>,
	pub ledger_retention_window: Option<u32>,

	pub storage_count: Option<u64>,
	pub storage: Vec<StorageEntry>,

	pub admin: Option<String>,
	pub owner: Option<String>,

	pub source: ContractSource,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub warning: Option<String>,

	pub invocations: Option<u64>,
	pub subinvocations: Option<u64>,
	pub events_count: Option<u64>,
	pub errors_count: Option<u64>,

	/// Indexer-reported storage entry count, distinct from `storage_count`
	pub storage_entries: Option<u64>,
	pub validation_status: Option<String>,
}

impl ContractSummary {
	/// An empty summary for a contract, defaulting to the RPC source and
	/// "wasm" executable; builders fill in what each provider knows.
	pub fn new(contract_id: &str, network: &str) -> Self {
		Self {
			contract_id: contract_id.to_string(),
			network: network.to_string(),
			status: "active".to_string(),
			executable_type: "wasm".to_string(),
			wasm_hash: None,
			code_hash: None,
			code_size: None,
			created_ledger: None,
			created_at: None,
			creator: None,
			last_modified_ledger: None,
			latest_ledger: None,
			oldest_ledger: None,
			ledger_retention_window: None,
			storage_count: None,
			storage: Vec::new(),
			admin: None,
			owner: None,
			source: ContractSource::SorobanRpc,
			warning: None,
			invocations: None,
			subinvocations: None,
			events_count: None,
			errors_count: None,
			storage_entries: None,
			validation_status: None,
		}
	}
}

/// Validation block in a StellarExpert contract payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpertValidation {
	#[serde(default)]
	pub status: Option<String>,
}

/// A contract record as StellarExpert reports it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpertContract {
	#[serde(default)]
	pub contract: Option<String>,

	/// Creation time in unix seconds
	#[serde(default)]
	pub created: Option<i64>,

	#[serde(default)]
	pub creator: Option<String>,

	/// WASM hash
	#[serde(default)]
	pub wasm: Option<String>,

	#[serde(default)]
	pub storage_entries: Option<u64>,

	#[serde(default)]
	pub invocations: Option<u64>,

	#[serde(default)]
	pub subinvocations: Option<u64>,

	#[serde(default)]
	pub events: Option<u64>,

	#[serde(default)]
	pub errors: Option<u64>,

	#[serde(default)]
	pub validation: Option<ExpertValidation>,
}

impl ExpertContract {
	/// Whether the indexer actually knows this contract.
	pub fn is_known(&self) -> bool {
		self.contract.is_some()
	}
}
