//! Parsing utilities.

use byte_unit::Byte;
use std::str::FromStr;

/// Parses a human-readable size string ("1GB", "500MB", "1024KB") into bytes.
pub fn parse_string_to_bytes_size(s: &str) -> Result<u64, String> {
	match Byte::from_str(s) {
		Ok(byte) => Ok(byte.as_u64()),
		Err(e) => Err(format!("Invalid size format: '{}'. Error: {}", s, e)),
	}
}
