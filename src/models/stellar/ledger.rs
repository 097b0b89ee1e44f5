//! Stellar ledger data structures.
//!
//! [`Ledger`] mirrors the Horizon ledger record with every field optional the
//! way real payloads are. [`NormalizedLedger`] is the guaranteed-complete
//! shape this gateway serves; [`normalize_ledger`] is the only place defaults
//! are applied.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Base fee applied when Horizon omits the field, in stroops.
pub const DEFAULT_BASE_FEE_STROOPS: i64 = 100;

/// Base reserve applied when Horizon omits the field, in stroops.
pub const DEFAULT_BASE_RESERVE_STROOPS: i64 = 5_000_000;

/// A ledger record as Horizon reports it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ledger {
	#[serde(default)]
	pub sequence: u32,

	#[serde(default)]
	pub hash: Option<String>,

	#[serde(default)]
	pub prev_hash: Option<String>,

	#[serde(default)]
	pub transaction_count: Option<u64>,

	#[serde(default)]
	pub operation_count: Option<u64>,

	#[serde(default)]
	pub successful_transaction_count: Option<u64>,

	#[serde(default)]
	pub failed_transaction_count: Option<u64>,

	/// RFC 3339 close time
	#[serde(default)]
	pub closed_at: Option<String>,

	#[serde(default)]
	pub total_coins: Option<String>,

	#[serde(default)]
	pub fee_pool: Option<String>,

	#[serde(default)]
	pub base_fee_in_stroops: Option<i64>,

	#[serde(default)]
	pub base_reserve_in_stroops: Option<i64>,
}

/// A ledger with every documented field present.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NormalizedLedger {
	pub sequence: u32,
	pub hash: String,
	pub prev_hash: String,
	pub transaction_count: u64,
	pub operation_count: u64,
	pub successful_transaction_count: u64,
	pub failed_transaction_count: u64,
	pub closed_at: String,
	pub total_coins: String,
	pub fee_pool: String,
	pub base_fee_in_stroops: i64,
	pub base_reserve_in_stroops: i64,
}

/// Applies the documented defaults: counts to 0, hashes to "", coin totals to
/// "0", close time to now, base fee and reserve to the protocol defaults.
pub fn normalize_ledger(raw: Ledger) -> NormalizedLedger {
	NormalizedLedger {
		sequence: raw.sequence,
		hash: raw.hash.unwrap_or_default(),
		prev_hash: raw.prev_hash.unwrap_or_default(),
		transaction_count: raw.transaction_count.unwrap_or(0),
		operation_count: raw.operation_count.unwrap_or(0),
		successful_transaction_count: raw.successful_transaction_count.unwrap_or(0),
		failed_transaction_count: raw.failed_transaction_count.unwrap_or(0),
		closed_at: raw.closed_at.unwrap_or_else(|| Utc::now().to_rfc3339()),
		total_coins: raw.total_coins.unwrap_or_else(|| "0".to_string()),
		fee_pool: raw.fee_pool.unwrap_or_else(|| "0".to_string()),
		base_fee_in_stroops: raw.base_fee_in_stroops.unwrap_or(DEFAULT_BASE_FEE_STROOPS),
		base_reserve_in_stroops: raw
			.base_reserve_in_stroops
			.unwrap_or(DEFAULT_BASE_RESERVE_STROOPS),
	}
}
