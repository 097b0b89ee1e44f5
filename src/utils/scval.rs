//! Decoding of Soroban contract values (ScVal) into JSON-friendly values.
//!
//! Contract storage, event topics and event values arrive as base64-encoded
//! XDR. [`DecodedValue`] is the decoded form: a tagged sum type over the
//! Soroban value space with an explicit [`DecodedValue::Unknown`] variant
//! carrying the raw XDR bytes for anything this decoder does not model.

use serde_json::{json, Value as JsonValue};
use stellar_strkey::{ed25519::PublicKey as StrkeyPublicKey, Contract as StrkeyContract};
use stellar_xdr::curr::{
	AccountId, Int128Parts, Int256Parts, Limits, PublicKey, ReadXdr, ScAddress, ScMapEntry, ScVal,
	UInt128Parts, UInt256Parts, WriteXdr,
};

use alloy_primitives::{I256, U256};

/// A decoded Soroban value.
///
/// 128- and 256-bit integers are carried as decimal strings since they exceed
/// what JSON numbers represent. Map keys are stringified recursively so a map
/// always serializes to a JSON object.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedValue {
	Void,
	Bool(bool),
	U32(u32),
	I32(i32),
	U64(u64),
	I64(i64),
	Timepoint(u64),
	Duration(u64),
	U128(String),
	I128(String),
	U256(String),
	I256(String),
	Bytes(Vec<u8>),
	String(String),
	Symbol(String),
	Vec(Vec<DecodedValue>),
	Map(Vec<(String, DecodedValue)>),
	Address(String),
	/// A variant this decoder does not model, kept as raw XDR bytes.
	Unknown(Vec<u8>),
}

impl DecodedValue {
	/// Renders the value as JSON: scalars map to JSON scalars, bytes to hex,
	/// big integers to decimal strings, maps to objects, and unknown variants
	/// to an object tagging the raw XDR.
	pub fn to_json(&self) -> JsonValue {
		match self {
			DecodedValue::Void => JsonValue::Null,
			DecodedValue::Bool(b) => json!(b),
			DecodedValue::U32(n) => json!(n),
			DecodedValue::I32(n) => json!(n),
			DecodedValue::U64(n) => json!(n),
			DecodedValue::I64(n) => json!(n),
			DecodedValue::Timepoint(t) => json!(t),
			DecodedValue::Duration(d) => json!(d),
			DecodedValue::U128(s)
			| DecodedValue::I128(s)
			| DecodedValue::U256(s)
			| DecodedValue::I256(s) => json!(s),
			DecodedValue::Bytes(b) => json!(hex::encode(b)),
			DecodedValue::String(s) | DecodedValue::Symbol(s) => json!(s),
			DecodedValue::Vec(items) => {
				JsonValue::Array(items.iter().map(|v| v.to_json()).collect())
			}
			DecodedValue::Map(entries) => {
				let mut map = serde_json::Map::new();
				for (key, val) in entries {
					map.insert(key.clone(), val.to_json());
				}
				JsonValue::Object(map)
			}
			DecodedValue::Address(addr) => json!(addr),
			DecodedValue::Unknown(raw) => json!({
				"type": "unknown",
				"raw_xdr": hex::encode(raw),
			}),
		}
	}

	/// Stringifies the value for use as a map key.
	pub fn key_string(&self) -> String {
		match self {
			DecodedValue::String(s) | DecodedValue::Symbol(s) | DecodedValue::Address(s) => {
				s.clone()
			}
			DecodedValue::Bool(b) => b.to_string(),
			DecodedValue::U32(n) => n.to_string(),
			DecodedValue::I32(n) => n.to_string(),
			DecodedValue::U64(n) => n.to_string(),
			DecodedValue::I64(n) => n.to_string(),
			DecodedValue::Timepoint(t) => t.to_string(),
			DecodedValue::Duration(d) => d.to_string(),
			DecodedValue::U128(s)
			| DecodedValue::I128(s)
			| DecodedValue::U256(s)
			| DecodedValue::I256(s) => s.clone(),
			DecodedValue::Bytes(b) => hex::encode(b),
			other => other.to_json().to_string(),
		}
	}
}

/// Converts an ScVal into a [`DecodedValue`].
pub fn decode_scval(val: &ScVal) -> DecodedValue {
	match val {
		ScVal::Void => DecodedValue::Void,
		ScVal::Bool(b) => DecodedValue::Bool(*b),
		ScVal::U32(n) => DecodedValue::U32(*n),
		ScVal::I32(n) => DecodedValue::I32(*n),
		ScVal::U64(n) => DecodedValue::U64(*n),
		ScVal::I64(n) => DecodedValue::I64(*n),
		ScVal::Timepoint(t) => DecodedValue::Timepoint(t.0),
		ScVal::Duration(d) => DecodedValue::Duration(d.0),
		ScVal::U128(n) => DecodedValue::U128(combine_u128(n)),
		ScVal::I128(n) => DecodedValue::I128(combine_i128(n)),
		ScVal::U256(n) => DecodedValue::U256(combine_u256(n)),
		ScVal::I256(n) => DecodedValue::I256(combine_i256(n)),
		ScVal::Bytes(b) => DecodedValue::Bytes(b.to_vec()),
		ScVal::String(s) => DecodedValue::String(s.to_string()),
		ScVal::Symbol(s) => DecodedValue::Symbol(s.to_string()),
		ScVal::Vec(Some(vec)) => {
			DecodedValue::Vec(vec.0.iter().map(decode_scval).collect())
		}
		ScVal::Vec(None) => DecodedValue::Vec(Vec::new()),
		ScVal::Map(Some(map)) => {
			let mut entries = Vec::with_capacity(map.0.len());
			for ScMapEntry { key, val } in map.0.iter() {
				entries.push((decode_scval(key).key_string(), decode_scval(val)));
			}
			DecodedValue::Map(entries)
		}
		ScVal::Map(None) => DecodedValue::Map(Vec::new()),
		ScVal::Address(addr) => DecodedValue::Address(address_to_strkey(addr)),
		other => {
			// Keep the raw XDR rather than silently flattening the value
			let raw = other.to_xdr(Limits::none()).unwrap_or_default();
			DecodedValue::Unknown(raw)
		}
	}
}

/// Decodes a base64-encoded XDR ScVal into a [`DecodedValue`].
pub fn decode_xdr_base64(encoded: &str) -> Result<DecodedValue, stellar_xdr::curr::Error> {
	let val = ScVal::from_xdr_base64(encoded, Limits::none())?;
	Ok(decode_scval(&val))
}

/// Renders an ScAddress in strkey form (G... for accounts, C... for contracts).
pub fn address_to_strkey(addr: &ScAddress) -> String {
	match addr {
		ScAddress::Contract(hash) => StrkeyContract(hash.0).to_string(),
		ScAddress::Account(AccountId(PublicKey::PublicKeyTypeEd25519(key))) => {
			StrkeyPublicKey(key.0).to_string()
		}
	}
}

/// Combines the parts of a UInt128 into a single decimal string.
pub fn combine_u128(n: &UInt128Parts) -> String {
	(((n.hi as u128) << 64) | (n.lo as u128)).to_string()
}

/// Combines the parts of an Int128 into a single decimal string.
pub fn combine_i128(n: &Int128Parts) -> String {
	(((n.hi as i128) << 64) | (n.lo as i128)).to_string()
}

/// Combines the parts of a UInt256 into a single decimal string.
pub fn combine_u256(n: &UInt256Parts) -> String {
	U256::from_limbs([n.lo_lo, n.lo_hi, n.hi_lo, n.hi_hi]).to_string()
}

/// Combines the parts of an Int256 into a single decimal string.
/// hi_hi is signed (i64); reinterpreting the limbs keeps two's complement.
pub fn combine_i256(n: &Int256Parts) -> String {
	let raw = U256::from_limbs([n.lo_lo, n.lo_hi, n.hi_lo, n.hi_hi as u64]);
	I256::from_raw(raw).to_string()
}
