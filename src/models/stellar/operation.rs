//! Stellar operation data structures.
//!
//! Operations are polymorphic in Horizon (payments, offers, invocations and
//! so on), so only the fields common to every type are modeled; everything
//! else passes through untouched.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

/// An operation record as Horizon reports it. Type-specific fields are kept
/// in `extra` and passed through verbatim.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Operation {
	#[serde(default)]
	pub id: Option<String>,

	#[serde(default, rename = "type")]
	pub operation_type: Option<String>,

	#[serde(default)]
	pub transaction_hash: Option<String>,

	#[serde(default)]
	pub source_account: Option<String>,

	#[serde(default)]
	pub created_at: Option<String>,

	#[serde(flatten)]
	pub extra: BTreeMap<String, JsonValue>,
}

/// An operation with the common fields guaranteed present.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NormalizedOperation {
	pub id: String,

	#[serde(rename = "type")]
	pub operation_type: String,

	pub transaction_hash: String,
	pub source_account: String,
	pub created_at: String,

	#[serde(flatten)]
	pub extra: BTreeMap<String, JsonValue>,
}

/// Applies the documented defaults: ids and hashes to "", timestamps to now.
pub fn normalize_operation(raw: Operation) -> NormalizedOperation {
	NormalizedOperation {
		id: raw.id.unwrap_or_default(),
		operation_type: raw.operation_type.unwrap_or_default(),
		transaction_hash: raw.transaction_hash.unwrap_or_default(),
		source_account: raw.source_account.unwrap_or_default(),
		created_at: raw.created_at.unwrap_or_else(|| Utc::now().to_rfc3339()),
		extra: raw.extra,
	}
}
