//! Stroop to XLM conversion and display formatting.
//!
//! Horizon reports fees and reserves in stroops (1 XLM = 10,000,000 stroops).
//! Amounts are rendered with exactly 7 decimals; absent or unparseable input
//! degrades to zero rather than propagating NaN into responses.

/// Stroops per lumen.
pub const STROOPS_PER_XLM: f64 = 10_000_000.0;

/// Converts a stroop count to XLM.
pub fn stroops_to_xlm(stroops: i64) -> f64 {
	stroops as f64 / STROOPS_PER_XLM
}

/// Formats an XLM amount with exactly 7 decimal places.
/// Non-finite input renders as "0.0000000".
pub fn format_xlm(value: f64) -> String {
	if value.is_finite() {
		format!("{:.7}", value)
	} else {
		"0.0000000".to_string()
	}
}

/// Parses a raw stroop field (as Horizon reports it, a decimal string) and
/// formats it as XLM. Unparseable input renders as "0.0000000".
pub fn format_stroop_str(raw: &str) -> String {
	match raw.trim().parse::<i64>() {
		Ok(stroops) => format_xlm(stroops_to_xlm(stroops)),
		Err(_) => "0.0000000".to_string(),
	}
}

/// Parses a raw stroop field into a stroop count, if strictly positive.
/// Used by fee statistics, which only consider transactions that actually
/// paid a fee.
pub fn positive_stroops(raw: &str) -> Option<i64> {
	raw.trim().parse::<i64>().ok().filter(|n| *n > 0)
}
