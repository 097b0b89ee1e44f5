//! Stellar transaction data structures.
//!
//! [`Transaction`] mirrors a Horizon transaction record. Horizon reports fees
//! as strings (`fee_charged`) while older payloads carry numeric `fee_paid`;
//! [`FeeAmount`] absorbs both. [`normalize_transaction`] produces the
//! guaranteed-complete shape, including the id/hash cross-default and the
//! `fee_account` fallback to the source account.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::models::Network;

/// A fee value as it appears on the wire: either a decimal string or a number.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FeeAmount {
	Number(i64),
	Text(String),
}

impl FeeAmount {
	/// The fee in stroops, if it parses.
	pub fn as_stroops(&self) -> Option<i64> {
		match self {
			FeeAmount::Number(n) => Some(*n),
			FeeAmount::Text(s) => s.trim().parse::<i64>().ok(),
		}
	}

	/// The wire representation as a string.
	pub fn as_text(&self) -> String {
		match self {
			FeeAmount::Number(n) => n.to_string(),
			FeeAmount::Text(s) => s.clone(),
		}
	}
}

/// A transaction record as Horizon reports it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transaction {
	#[serde(default)]
	pub id: Option<String>,

	#[serde(default)]
	pub hash: Option<String>,

	/// Ledger sequence; some Horizon SDK payloads call this `ledger_attr`
	#[serde(default, alias = "ledger_attr")]
	pub ledger: Option<u64>,

	#[serde(default)]
	pub source_account: Option<String>,

	#[serde(default)]
	pub source_account_sequence: Option<String>,

	#[serde(default)]
	pub fee_account: Option<String>,

	#[serde(default, alias = "fee_paid")]
	pub fee_charged: Option<FeeAmount>,

	#[serde(default)]
	pub max_fee: Option<FeeAmount>,

	#[serde(default)]
	pub operation_count: Option<u64>,

	#[serde(default)]
	pub created_at: Option<String>,

	/// Absent means the transaction succeeded
	#[serde(default)]
	pub successful: Option<bool>,

	#[serde(default)]
	pub memo: Option<String>,

	#[serde(default)]
	pub memo_type: Option<String>,
}

impl Transaction {
	/// The fee in stroops, zero when absent or unparseable.
	pub fn fee_stroops(&self) -> i64 {
		self.fee_charged
			.as_ref()
			.and_then(FeeAmount::as_stroops)
			.unwrap_or(0)
	}
}

/// A transaction with every documented field present.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NormalizedTransaction {
	pub id: String,
	pub hash: String,
	pub ledger: u64,
	pub source_account: String,
	pub source_account_sequence: String,
	pub fee_account: String,
	pub fee_charged: String,
	pub max_fee: String,
	pub operation_count: u64,
	pub created_at: String,
	pub successful: bool,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub memo: Option<String>,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub memo_type: Option<String>,

	/// Which Horizon network served this record
	#[serde(rename = "_source", skip_serializing_if = "Option::is_none")]
	pub source: Option<String>,

	/// When this gateway processed the record (RFC 3339)
	#[serde(rename = "_processed_at", skip_serializing_if = "Option::is_none")]
	pub processed_at: Option<String>,
}

impl NormalizedTransaction {
	/// Tags the record with the network it was served from and the processing
	/// time. Used by the single-transaction lookup, not by listings.
	pub fn tagged(mut self, network: Network) -> Self {
		self.source = Some(network.as_str().to_string());
		self.processed_at = Some(Utc::now().to_rfc3339());
		self
	}
}

/// Applies the documented defaults. `id` and `hash` default to each other,
/// `successful` is true unless explicitly false, and `fee_account` falls back
/// to the source account.
pub fn normalize_transaction(raw: Transaction) -> NormalizedTransaction {
	let id = raw
		.id
		.clone()
		.or_else(|| raw.hash.clone())
		.unwrap_or_default();
	let hash = raw.hash.or(raw.id).unwrap_or_default();
	let source_account = raw.source_account.unwrap_or_default();

	NormalizedTransaction {
		id,
		hash,
		ledger: raw.ledger.unwrap_or(0),
		fee_account: raw.fee_account.unwrap_or_else(|| source_account.clone()),
		source_account,
		source_account_sequence: raw.source_account_sequence.unwrap_or_default(),
		fee_charged: raw
			.fee_charged
			.as_ref()
			.map(FeeAmount::as_text)
			.unwrap_or_else(|| "0".to_string()),
		max_fee: raw
			.max_fee
			.as_ref()
			.map(FeeAmount::as_text)
			.unwrap_or_else(|| "0".to_string()),
		operation_count: raw.operation_count.unwrap_or(0),
		created_at: raw.created_at.unwrap_or_else(|| Utc::now().to_rfc3339()),
		successful: raw.successful.unwrap_or(true),
		memo: raw.memo,
		memo_type: raw.memo_type,
		source: None,
		processed_at: None,
	}
}
