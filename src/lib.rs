//! Read-only aggregation gateway for the Stellar network.
//!
//! This library serves a JSON REST API over three upstream providers: the
//! Horizon REST API, the Soroban JSON-RPC service and the StellarExpert
//! indexer. It includes:
//!
//! - Normalization of ledgers, transactions and operations into stable shapes
//! - Contract summaries decoded from on-chain XDR with indexer enrichment
//! - Explicit fallback chains across providers and networks
//! - Best-effort contract event feeds that degrade instead of failing
//!
//! # Module Structure
//!
//! - `api`: HTTP routes, handlers and error mapping
//! - `models`: Configuration and Stellar data structures
//! - `services`: Upstream clients and the aggregation layer
//! - `utils`: Common utilities and helper functions

pub mod api;
pub mod models;
pub mod services;
pub mod utils;
