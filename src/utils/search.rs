//! Identifier classification for the search endpoint and request validation.
//!
//! Classification is pure and total. The check order is a tie-break: a 56-char
//! term starting with `G` is always an account, never a contract, and digit
//! strings are only ledger sequences when nothing else matched.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
	static ref CONTRACT_ID_REGEX: Regex =
		Regex::new(r"^C[A-Za-z2-7]{55}$").expect("contract id regex must compile");
	static ref TX_HASH_REGEX: Regex =
		Regex::new(r"^[0-9a-fA-F]{64}$").expect("tx hash regex must compile");
}

/// The outcome of classifying a search term. Callers keep the term itself,
/// so the variants only name its shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMatch {
	Account,
	Contract,
	TransactionHash,
	LedgerSequence,
}

/// Classifies a search term by shape, in order: account, contract,
/// transaction hash, ledger sequence. Returns `None` for unrecognized input.
pub fn classify(term: &str) -> Option<SearchMatch> {
	if term.starts_with('G') && term.len() == 56 {
		return Some(SearchMatch::Account);
	}
	if is_valid_contract_id(term) {
		return Some(SearchMatch::Contract);
	}
	if is_valid_transaction_hash(term) {
		return Some(SearchMatch::TransactionHash);
	}
	if !term.is_empty() && term.bytes().all(|b| b.is_ascii_digit()) {
		return Some(SearchMatch::LedgerSequence);
	}
	None
}

/// A transaction hash is exactly 64 hexadecimal characters.
pub fn is_valid_transaction_hash(hash: &str) -> bool {
	TX_HASH_REGEX.is_match(hash)
}

/// An account id starts with `G` and is 56 characters long.
pub fn is_valid_account_id(id: &str) -> bool {
	id.starts_with('G') && id.len() == 56
}

/// A contract id starts with `C` followed by 55 base32 characters.
/// Case-insensitive after the prefix.
pub fn is_valid_contract_id(id: &str) -> bool {
	CONTRACT_ID_REGEX.is_match(id)
}
