//! Network statistics aggregation.
//!
//! Fetches recent ledgers and transactions from Horizon concurrently and
//! derives throughput, fee and cadence figures. The windows are fixed: TPS
//! over the 20 most recent ledgers (when at least 10 exist), ledger cadence
//! over up to 10 consecutive pairs (when at least 5 exist), totals over the
//! 10 most recent.

use chrono::DateTime;
use serde::{Deserialize, Serialize};
use tokio::try_join;
use tracing::{info, instrument};

use crate::{
	models::{
		Ledger, Transaction, DEFAULT_BASE_FEE_STROOPS, DEFAULT_BASE_RESERVE_STROOPS,
	},
	services::horizon::{HorizonClient, HorizonError},
	utils::{format_xlm, stroops_to_xlm},
};

/// Number of ledgers fetched for the stats window.
const LEDGER_FETCH_LIMIT: u32 = 50;
/// Number of transactions fetched for fee statistics.
const TRANSACTION_FETCH_LIMIT: u32 = 200;
/// Minimum ledgers required before TPS is computed.
const TPS_MIN_LEDGERS: usize = 10;
/// TPS window size.
const TPS_WINDOW: usize = 20;
/// Minimum ledgers required before cadence is computed.
const CADENCE_MIN_LEDGERS: usize = 5;
/// Maximum consecutive ledger pairs in the cadence window.
const CADENCE_MAX_PAIRS: usize = 10;
/// Fallback ledger cadence in seconds.
const DEFAULT_LEDGER_TIME_SECS: f64 = 5.0;
/// Number of transactions echoed back in the stats response.
const RECENT_TRANSACTIONS: usize = 15;
/// Ledgers summed for the additional metrics block.
const METRICS_WINDOW: usize = 10;

/// The latest-ledger block of the stats response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestLedgerBlock {
	pub sequence: u32,
	pub hash: String,
	pub transaction_count: u64,
	pub operation_count: u64,
	pub closed_at: String,
	pub total_coins: String,
	pub fee_pool: String,
}

/// The aggregate figures block of the stats response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkStatsBlock {
	pub average_fee: String,
	pub min_fee: String,
	pub max_fee: String,
	pub transactions_per_second: String,
	pub total_lumens: String,
	pub fee_pool: String,
	pub base_fee: String,
	pub base_reserve: String,
	pub average_ledger_time: String,
	pub network_liveness: String,
	pub transactions_analyzed: u64,
}

/// A recent transaction in the stats response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentTransaction {
	pub id: String,
	pub hash: String,
	pub ledger: u64,
	pub source_account: String,
	pub fee_paid: String,
	pub operation_count: u64,
	pub created_at: String,
}

/// Totals over the most recent ledgers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalMetrics {
	pub total_ledgers: u32,
	pub recent_transaction_count: u64,
	pub recent_operation_count: u64,
	pub average_operations_per_transaction: String,
	pub ledgers_analyzed: u64,
}

/// The full stats response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkStats {
	pub latest_ledger: LatestLedgerBlock,
	pub network_stats: NetworkStatsBlock,
	pub recent_transactions: Vec<RecentTransaction>,
	pub additional_metrics: AdditionalMetrics,
}

/// Fee statistics over transactions that paid a strictly positive fee.
#[derive(Debug, Clone, PartialEq)]
pub struct FeeStats {
	pub average_xlm: f64,
	pub min_xlm: f64,
	pub max_xlm: f64,
	pub analyzed: u64,
}

fn parse_close_time(ledger: &Ledger) -> Option<DateTime<chrono::FixedOffset>> {
	ledger
		.closed_at
		.as_deref()
		.and_then(|s| DateTime::parse_from_rfc3339(s).ok())
}

/// Computes transactions per second over the 20 most recent ledgers and the
/// matching activity label. Too few ledgers or a degenerate time window keep
/// the defaults: 0 TPS, "Baixa Atividade".
pub fn compute_tps(ledgers: &[Ledger]) -> (f64, &'static str) {
	if ledgers.len() < TPS_MIN_LEDGERS {
		return (0.0, "Baixa Atividade");
	}

	let window = &ledgers[..ledgers.len().min(TPS_WINDOW)];
	let total_tx: u64 = window
		.iter()
		.map(|l| l.transaction_count.unwrap_or(0))
		.sum();

	let newest = window.first().and_then(parse_close_time);
	let oldest = window.last().and_then(parse_close_time);
	let span_seconds = match (newest, oldest) {
		(Some(newest), Some(oldest)) => (newest - oldest).num_milliseconds() as f64 / 1000.0,
		_ => 0.0,
	};

	if span_seconds <= 0.0 {
		return (0.0, "Baixa Atividade");
	}

	let tps = total_tx as f64 / span_seconds;
	let label = if tps > 5.0 {
		"Alta Atividade"
	} else if tps > 1.0 {
		"Atividade Moderada"
	} else if tps > 0.1 {
		"Atividade Baixa"
	} else {
		"Rede em Standby"
	};

	(tps, label)
}

/// Computes fee statistics over transactions whose fee parses to a strictly
/// positive stroop count.
pub fn compute_fee_stats(transactions: &[Transaction]) -> FeeStats {
	let fees: Vec<f64> = transactions
		.iter()
		.map(Transaction::fee_stroops)
		.filter(|stroops| *stroops > 0)
		.map(stroops_to_xlm)
		.collect();

	if fees.is_empty() {
		return FeeStats {
			average_xlm: 0.0,
			min_xlm: 0.0,
			max_xlm: 0.0,
			analyzed: 0,
		};
	}

	let total: f64 = fees.iter().sum();
	FeeStats {
		average_xlm: total / fees.len() as f64,
		min_xlm: fees.iter().cloned().fold(f64::INFINITY, f64::min),
		max_xlm: fees.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
		analyzed: fees.len() as u64,
	}
}

/// Computes the mean positive time delta across up to 10 consecutive ledger
/// pairs. Falls back to 5.0 seconds when fewer than 5 ledgers exist or no
/// pair yields a positive delta.
pub fn compute_avg_ledger_time(ledgers: &[Ledger]) -> f64 {
	if ledgers.len() < CADENCE_MIN_LEDGERS {
		return DEFAULT_LEDGER_TIME_SECS;
	}

	let pairs = (ledgers.len() - 1).min(CADENCE_MAX_PAIRS);
	let mut diffs = Vec::with_capacity(pairs);
	for i in 0..pairs {
		if let (Some(newer), Some(older)) = (
			parse_close_time(&ledgers[i]),
			parse_close_time(&ledgers[i + 1]),
		) {
			let diff = (newer - older).num_milliseconds() as f64 / 1000.0;
			if diff > 0.0 {
				diffs.push(diff);
			}
		}
	}

	if diffs.is_empty() {
		DEFAULT_LEDGER_TIME_SECS
	} else {
		diffs.iter().sum::<f64>() / diffs.len() as f64
	}
}

/// Fetches ledgers and transactions concurrently and assembles the stats
/// response. Either fetch failing fails the whole operation.
#[instrument(skip(horizon))]
pub async fn network_stats(horizon: &HorizonClient) -> Result<NetworkStats, HorizonError> {
	let (ledgers, transactions) = try_join!(
		horizon.get_ledgers(LEDGER_FETCH_LIMIT),
		horizon.get_transactions(TRANSACTION_FETCH_LIMIT)
	)?;

	let latest = ledgers.first().cloned().ok_or_else(|| {
		HorizonError::upstream_error("Horizon returned an empty ledger list", None, None)
	})?;

	let (tps, liveness) = compute_tps(&ledgers);
	let fee_stats = compute_fee_stats(&transactions);
	let avg_ledger_time = compute_avg_ledger_time(&ledgers);

	info!(
		tps = tps,
		transactions_analyzed = fee_stats.analyzed,
		"Network statistics computed"
	);

	let metrics_window = &ledgers[..ledgers.len().min(METRICS_WINDOW)];
	let recent_tx_count: u64 = metrics_window
		.iter()
		.map(|l| l.transaction_count.unwrap_or(0))
		.sum();
	let recent_op_count: u64 = metrics_window
		.iter()
		.map(|l| l.operation_count.unwrap_or(0))
		.sum();

	let recent_transactions = transactions
		.iter()
		.take(RECENT_TRANSACTIONS)
		.map(|tx| RecentTransaction {
			id: tx.id.clone().unwrap_or_default(),
			hash: tx.hash.clone().unwrap_or_default(),
			ledger: tx.ledger.unwrap_or(0),
			source_account: tx.source_account.clone().unwrap_or_default(),
			fee_paid: format_xlm(stroops_to_xlm(tx.fee_stroops())),
			operation_count: tx.operation_count.unwrap_or(0),
			created_at: tx
				.created_at
				.clone()
				.unwrap_or_else(|| chrono::Utc::now().to_rfc3339()),
		})
		.collect();

	Ok(NetworkStats {
		latest_ledger: LatestLedgerBlock {
			sequence: latest.sequence,
			hash: latest.hash.clone().unwrap_or_default(),
			transaction_count: latest.transaction_count.unwrap_or(0),
			operation_count: latest.operation_count.unwrap_or(0),
			closed_at: latest
				.closed_at
				.clone()
				.unwrap_or_else(|| chrono::Utc::now().to_rfc3339()),
			total_coins: latest.total_coins.clone().unwrap_or_else(|| "0".to_string()),
			fee_pool: latest.fee_pool.clone().unwrap_or_else(|| "0".to_string()),
		},
		network_stats: NetworkStatsBlock {
			average_fee: format_xlm(fee_stats.average_xlm),
			min_fee: format_xlm(fee_stats.min_xlm),
			max_fee: format_xlm(fee_stats.max_xlm),
			transactions_per_second: format!("{:.3}", tps),
			total_lumens: latest.total_coins.clone().unwrap_or_else(|| "0".to_string()),
			fee_pool: latest.fee_pool.unwrap_or_else(|| "0".to_string()),
			base_fee: format_xlm(stroops_to_xlm(
				latest.base_fee_in_stroops.unwrap_or(DEFAULT_BASE_FEE_STROOPS),
			)),
			base_reserve: format_xlm(stroops_to_xlm(
				latest
					.base_reserve_in_stroops
					.unwrap_or(DEFAULT_BASE_RESERVE_STROOPS),
			)),
			average_ledger_time: format!("{:.1}", avg_ledger_time),
			network_liveness: liveness.to_string(),
			transactions_analyzed: fee_stats.analyzed,
		},
		recent_transactions,
		additional_metrics: AdditionalMetrics {
			total_ledgers: latest.sequence,
			recent_transaction_count: recent_tx_count,
			recent_operation_count: recent_op_count,
			average_operations_per_transaction: if recent_tx_count > 0 {
				format!("{:.1}", recent_op_count as f64 / recent_tx_count as f64)
			} else {
				"0".to_string()
			},
			ledgers_analyzed: metrics_window.len() as u64,
		},
	})
}
