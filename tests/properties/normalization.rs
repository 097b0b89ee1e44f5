//! Record normalization properties.

use proptest::prelude::*;

use lumenscope::models::{
	normalize_ledger, normalize_transaction, FeeAmount, Ledger, Transaction,
};

fn optional_string() -> impl Strategy<Value = Option<String>> {
	proptest::option::of("[a-z0-9]{1,16}")
}

proptest! {
	#[test]
	fn transactions_always_carry_id_and_hash(
		id in optional_string(),
		hash in optional_string(),
	) {
		let raw = Transaction {
			id: id.clone(),
			hash: hash.clone(),
			..Default::default()
		};
		let normalized = normalize_transaction(raw);

		// id and hash cross-default to each other
		if let Some(id) = &id {
			prop_assert_eq!(&normalized.id, id);
		}
		if let Some(hash) = &hash {
			prop_assert_eq!(&normalized.hash, hash);
		}
		if id.is_some() || hash.is_some() {
			prop_assert!(!normalized.id.is_empty());
			prop_assert!(!normalized.hash.is_empty());
			prop_assert_eq!(
				normalized.id.is_empty(),
				normalized.hash.is_empty()
			);
		}
	}

	#[test]
	fn fee_account_falls_back_to_source_account(
		source in "[A-Z]{8}",
		fee_account in optional_string(),
	) {
		let raw = Transaction {
			source_account: Some(source.clone()),
			fee_account: fee_account.clone(),
			..Default::default()
		};
		let normalized = normalize_transaction(raw);
		match fee_account {
			Some(explicit) => prop_assert_eq!(normalized.fee_account, explicit),
			None => prop_assert_eq!(normalized.fee_account, source),
		}
	}

	#[test]
	fn successful_defaults_to_true(successful in proptest::option::of(any::<bool>())) {
		let raw = Transaction {
			successful,
			..Default::default()
		};
		let normalized = normalize_transaction(raw);
		prop_assert_eq!(normalized.successful, successful.unwrap_or(true));
	}

	#[test]
	fn fees_default_to_zero_string(fee in proptest::option::of(any::<i64>())) {
		let raw = Transaction {
			fee_charged: fee.map(FeeAmount::Number),
			..Default::default()
		};
		let normalized = normalize_transaction(raw);
		match fee {
			Some(fee) => prop_assert_eq!(normalized.fee_charged, fee.to_string()),
			None => prop_assert_eq!(normalized.fee_charged, "0"),
		}
	}

	#[test]
	fn ledger_counts_never_go_missing(
		sequence in any::<u32>(),
		transaction_count in proptest::option::of(any::<u64>()),
		operation_count in proptest::option::of(any::<u64>()),
	) {
		let raw = Ledger {
			sequence,
			transaction_count,
			operation_count,
			..Default::default()
		};
		let normalized = normalize_ledger(raw);
		prop_assert_eq!(normalized.sequence, sequence);
		prop_assert_eq!(normalized.transaction_count, transaction_count.unwrap_or(0));
		prop_assert_eq!(normalized.operation_count, operation_count.unwrap_or(0));
		prop_assert!(!normalized.closed_at.is_empty());
		prop_assert_eq!(normalized.total_coins.is_empty(), false);
	}
}
