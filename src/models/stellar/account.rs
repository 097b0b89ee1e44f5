//! Stellar account data structures.
//!
//! Accounts pass through from Horizon without defaulting; the typed fields
//! below cover what the explorer renders and `extra` keeps the rest intact.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

/// A balance line on an account.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Balance {
	#[serde(default)]
	pub balance: String,

	#[serde(default)]
	pub asset_type: String,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub asset_code: Option<String>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub asset_issuer: Option<String>,

	#[serde(flatten)]
	pub extra: BTreeMap<String, JsonValue>,
}

/// A signer on an account.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Signer {
	#[serde(default)]
	pub key: String,

	#[serde(default)]
	pub weight: u32,

	#[serde(default, rename = "type")]
	pub signer_type: String,
}

/// Operation thresholds on an account.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Thresholds {
	#[serde(default)]
	pub low_threshold: u8,

	#[serde(default)]
	pub med_threshold: u8,

	#[serde(default)]
	pub high_threshold: u8,
}

/// Authorization flags on an account.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AccountFlags {
	#[serde(default)]
	pub auth_required: bool,

	#[serde(default)]
	pub auth_revocable: bool,

	#[serde(default)]
	pub auth_immutable: bool,

	#[serde(default)]
	pub auth_clawback_enabled: bool,
}

/// An account record as Horizon reports it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Account {
	#[serde(default)]
	pub id: String,

	#[serde(default)]
	pub account_id: String,

	#[serde(default)]
	pub sequence: String,

	#[serde(default)]
	pub subentry_count: u32,

	#[serde(default)]
	pub balances: Vec<Balance>,

	#[serde(default)]
	pub signers: Vec<Signer>,

	#[serde(default)]
	pub thresholds: Thresholds,

	#[serde(default)]
	pub flags: AccountFlags,

	#[serde(flatten)]
	pub extra: BTreeMap<String, JsonValue>,
}
