//! Limit clamping and provider-fallback properties.

use proptest::prelude::*;

use lumenscope::services::{
	clamp_limit,
	fallback::{first_success, Provider},
};

proptest! {
	#[test]
	fn clamped_limit_is_always_in_range(limit in proptest::option::of(any::<u32>())) {
		let clamped = clamp_limit(limit);
		prop_assert!((1..=200).contains(&clamped));
	}

	#[test]
	fn in_range_limits_pass_through(limit in 1u32..=200) {
		prop_assert_eq!(clamp_limit(Some(limit)), limit);
	}

	#[test]
	fn absent_limit_defaults_to_twenty(_seed in any::<u8>()) {
		prop_assert_eq!(clamp_limit(None), 20);
	}

	#[test]
	fn first_success_wins_regardless_of_fallback_outcomes(
		outcomes in proptest::collection::vec(any::<Option<i32>>(), 0..6),
		primary in any::<i32>(),
	) {
		let result = run_chain(Some(primary), outcomes);
		prop_assert_eq!(result, Ok(primary));
	}

	#[test]
	fn total_failure_surfaces_the_primary_error(
		outcomes in proptest::collection::vec(Just(None::<i32>), 0..6),
	) {
		let result = run_chain(None, outcomes);
		prop_assert_eq!(result, Err("provider 0 failed".to_string()));
	}

	#[test]
	fn first_successful_fallback_is_returned(
		leading_failures in 0usize..4,
		value in any::<i32>(),
	) {
		let mut outcomes = vec![None; leading_failures];
		outcomes.push(Some(value));
		let result = run_chain(None, outcomes);
		prop_assert_eq!(result, Ok(value));
	}
}

/// Runs a provider chain where `Some` succeeds and `None` fails.
fn run_chain(primary: Option<i32>, fallbacks: Vec<Option<i32>>) -> Result<i32, String> {
	let runtime = tokio::runtime::Builder::new_current_thread()
		.build()
		.unwrap();

	runtime.block_on(async move {
		let make = |index: usize, outcome: Option<i32>| async move {
			outcome.ok_or_else(|| format!("provider {} failed", index))
		};

		first_success(
			Provider::new("primary", make(0, primary)),
			fallbacks
				.into_iter()
				.enumerate()
				.map(|(i, outcome)| Provider::new("fallback", make(i + 1, outcome)))
				.collect(),
		)
		.await
	})
}
