//! Identifier classification properties.

use proptest::prelude::*;

use lumenscope::utils::{
	classify, is_valid_account_id, is_valid_contract_id, is_valid_transaction_hash, SearchMatch,
};

proptest! {
	#[test]
	fn account_shapes_classify_as_accounts(suffix in "[A-Z2-7]{55}") {
		let term = format!("G{}", suffix);
		prop_assert_eq!(classify(&term), Some(SearchMatch::Account));
		prop_assert!(is_valid_account_id(&term));
	}

	#[test]
	fn contract_shapes_classify_as_contracts(suffix in "[A-Z2-7]{55}") {
		let term = format!("C{}", suffix);
		prop_assert_eq!(classify(&term), Some(SearchMatch::Contract));
		prop_assert!(is_valid_contract_id(&term));
	}

	#[test]
	fn hex64_classifies_as_transaction_hash(hash in "[0-9a-f]{64}") {
		prop_assert_eq!(classify(&hash), Some(SearchMatch::TransactionHash));
		prop_assert!(is_valid_transaction_hash(&hash));
	}

	#[test]
	fn digit_strings_classify_as_ledger_sequences(sequence in "[0-9]{1,9}") {
		prop_assert_eq!(classify(&sequence), Some(SearchMatch::LedgerSequence));
	}

	// The shapes are mutually exclusive, so every term gets at most one class
	#[test]
	fn classification_is_deterministic(term in ".{0,80}") {
		let first = classify(&term);
		let second = classify(&term);
		prop_assert_eq!(first, second);
	}

	#[test]
	fn wrong_length_is_never_an_account(term in "G[A-Z2-7]{0,54}") {
		prop_assert_ne!(classify(&term), Some(SearchMatch::Account));
	}

	#[test]
	fn non_hex_is_never_a_transaction_hash(term in "[g-z]{64}") {
		prop_assert_ne!(classify(&term), Some(SearchMatch::TransactionHash));
		prop_assert!(!is_valid_transaction_hash(&term));
	}
}
