//! Contract summary aggregation.
//!
//! The live path decodes the contract instance from Soroban RPC ledger
//! entries and enriches it with StellarExpert metadata. When the RPC is down
//! or does not hold the instance, the chain falls back to a reduced-fidelity
//! summary built from the indexer alone, flagged with a warning.

use std::collections::HashMap;

use chrono::{TimeZone, Utc};
use stellar_xdr::curr::{
	ContractExecutable, LedgerEntryData, Limits, ReadXdr, ScMapEntry, ScVal,
};
use tokio::try_join;
use tracing::{instrument, warn};

use crate::{
	models::{ContractSource, ContractSummary, ExpertContract, Network, StorageEntry},
	services::{
		aggregator::AggregatorError,
		fallback::{first_success, Provider},
		indexer::IndexerClient,
		soroban::{contract_code_key, contract_instance_key, SorobanClient, SorobanError},
	},
	utils::decode_scval,
};

/// Warning attached to summaries built without live RPC data.
const INDEXER_ONLY_WARNING: &str =
	"Soroban RPC data unavailable; summary built from the StellarExpert indexer only";

/// Aggregates a contract summary: Soroban RPC first, StellarExpert as
/// fallback. On total failure the RPC error is surfaced.
#[instrument(skip(soroban, indexer))]
pub async fn contract_summary(
	soroban: &SorobanClient,
	indexer: &IndexerClient,
	network: Network,
	contract_id: &str,
) -> Result<ContractSummary, AggregatorError> {
	first_success(
		Provider::new("soroban-rpc", rpc_summary(soroban, indexer, network, contract_id)),
		vec![Provider::new(
			"stellar-expert",
			indexer_summary(indexer, network, contract_id),
		)],
	)
	.await
}

async fn rpc_summary(
	soroban: &SorobanClient,
	indexer: &IndexerClient,
	network: Network,
	contract_id: &str,
) -> Result<ContractSummary, AggregatorError> {
	let keys = [contract_instance_key(contract_id)?];

	let (health, entries) = try_join!(
		soroban.get_health(),
		soroban.get_ledger_entries(&keys)
	)?;

	let entry = entries.entries.first().ok_or_else(|| {
		AggregatorError::not_found(
			"Contract instance not found on this network",
			Some(HashMap::from([
				("contract_id".to_string(), contract_id.to_string()),
				("network".to_string(), network.to_string()),
			])),
		)
	})?;

	let data = LedgerEntryData::from_xdr_base64(&entry.xdr, Limits::none()).map_err(|e| {
		SorobanError::parse_error(
			"Failed to decode contract instance ledger entry",
			Some(Box::new(e)),
			None,
		)
	})?;

	let contract_data = match data {
		LedgerEntryData::ContractData(data) => data,
		other => {
			return Err(SorobanError::parse_error(
				"Ledger entry is not contract data",
				None,
				Some(HashMap::from([(
					"entry_type".to_string(),
					format!("{:?}", other.discriminant()),
				)])),
			)
			.into())
		}
	};

	let instance = match contract_data.val {
		ScVal::ContractInstance(instance) => instance,
		_ => {
			return Err(SorobanError::parse_error(
				"Contract data entry does not hold a contract instance",
				None,
				None,
			)
			.into())
		}
	};

	let mut summary = ContractSummary::new(contract_id, network.as_str());
	summary.latest_ledger = Some(health.latest_ledger);
	summary.oldest_ledger = Some(health.oldest_ledger);
	summary.ledger_retention_window = Some(health.ledger_retention_window);
	summary.last_modified_ledger = entry.last_modified_ledger_seq;

	match instance.executable {
		ContractExecutable::Wasm(wasm_hash) => {
			summary.executable_type = "wasm".to_string();
			summary.wasm_hash = Some(hex::encode(wasm_hash.0));

			// Code lookup failing must not sink the summary
			match fetch_code_details(soroban, &wasm_hash.0).await {
				Ok(Some((code_size, code_hash))) => {
					summary.code_size = Some(code_size);
					summary.code_hash = Some(code_hash);
				}
				Ok(None) => {
					warn!(contract_id, "Contract code entry not found");
				}
				Err(e) => {
					warn!(contract_id, error = %e, "Failed to fetch contract code entry");
				}
			}
		}
		ContractExecutable::StellarAsset => {
			summary.executable_type = "asset".to_string();
		}
	}

	if let Some(storage) = instance.storage {
		let entries: Vec<StorageEntry> = storage
			.0
			.iter()
			.map(|ScMapEntry { key, val }| StorageEntry {
				key: decode_scval(key).key_string(),
				value: decode_scval(val).to_json(),
			})
			.collect();
		summary.storage_count = Some(entries.len() as u64);
		let (admin, owner) = scan_access_keys(&entries);
		summary.admin = admin;
		summary.owner = owner;
		summary.storage = entries;
	} else {
		summary.storage_count = Some(0);
	}

	// Indexer metadata is opportunistic; absence or failure never sinks the
	// RPC summary
	match indexer.get_contract(network, contract_id).await {
		Ok(Some(expert)) => {
			apply_expert_metadata(&mut summary, &expert);
			summary.source = ContractSource::Combined;
		}
		Ok(None) => {}
		Err(e) => {
			warn!(contract_id, error = %e, "StellarExpert enrichment failed");
		}
	}

	Ok(summary)
}

async fn indexer_summary(
	indexer: &IndexerClient,
	network: Network,
	contract_id: &str,
) -> Result<ContractSummary, AggregatorError> {
	let expert = indexer
		.get_contract(network, contract_id)
		.await?
		.ok_or_else(|| {
			AggregatorError::not_found(
				"Contract not known to the indexer",
				Some(HashMap::from([
					("contract_id".to_string(), contract_id.to_string()),
					("network".to_string(), network.to_string()),
				])),
			)
		})?;

	let mut summary = ContractSummary::new(contract_id, network.as_str());
	summary.source = ContractSource::StellarExpert;
	summary.warning = Some(INDEXER_ONLY_WARNING.to_string());
	summary.wasm_hash = expert.wasm.clone();
	summary.code_hash = expert.wasm.clone();
	summary.storage_count = expert.storage_entries;
	apply_expert_metadata(&mut summary, &expert);

	Ok(summary)
}

/// Copies indexer lifecycle metadata onto a summary.
fn apply_expert_metadata(summary: &mut ContractSummary, expert: &ExpertContract) {
	summary.created_at = expert
		.created
		.and_then(|secs| Utc.timestamp_opt(secs, 0).single())
		.map(|dt| dt.to_rfc3339());
	summary.creator = expert.creator.clone();
	summary.invocations = expert.invocations;
	summary.subinvocations = expert.subinvocations;
	summary.events_count = expert.events;
	summary.errors_count = expert.errors;
	summary.storage_entries = expert.storage_entries;
	summary.validation_status = expert
		.validation
		.as_ref()
		.and_then(|v| v.status.clone());
}

/// Scans decoded storage for admin and owner entries by case-insensitive key
/// synonyms. First match wins for each.
fn scan_access_keys(entries: &[StorageEntry]) -> (Option<String>, Option<String>) {
	let mut admin = None;
	let mut owner = None;
	for entry in entries {
		let key = entry.key.to_lowercase();
		if admin.is_none() && (key == "admin" || key == "administrator") {
			admin = entry.value.as_str().map(str::to_string);
		}
		if owner.is_none() && key == "owner" {
			owner = entry.value.as_str().map(str::to_string);
		}
	}
	(admin, owner)
}

/// Fetches the contract-code entry for a WASM hash. Returns the decoded code
/// byte length and the code hash, or `None` when the entry is missing.
async fn fetch_code_details(
	soroban: &SorobanClient,
	wasm_hash: &[u8; 32],
) -> Result<Option<(u64, String)>, AggregatorError> {
	let code_key = contract_code_key(wasm_hash)?;
	let entries = soroban.get_ledger_entries(&[code_key]).await?;

	let Some(entry) = entries.entries.first() else {
		return Ok(None);
	};

	let data = LedgerEntryData::from_xdr_base64(&entry.xdr, Limits::none()).map_err(|e| {
		SorobanError::parse_error(
			"Failed to decode contract code ledger entry",
			Some(Box::new(e)),
			None,
		)
	})?;

	match data {
		LedgerEntryData::ContractCode(code) => Ok(Some((
			code.code.len() as u64,
			hex::encode(code.hash.0),
		))),
		_ => Ok(None),
	}
}
