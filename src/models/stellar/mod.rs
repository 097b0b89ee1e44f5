//! Stellar domain models: typed Horizon records, their normalized forms, and
//! the aggregated Soroban contract shapes.

mod account;
mod contract;
mod event;
mod ledger;
mod operation;
mod transaction;

pub use account::{Account, AccountFlags, Balance, Signer, Thresholds};
pub use contract::{
	ContractSource, ContractSummary, ExpertContract, ExpertValidation, StorageEntry,
};
pub use event::{
	derive_invocations, ContractEvent, ContractEventsResponse, Invocation,
};
pub use ledger::{
	normalize_ledger, Ledger, NormalizedLedger, DEFAULT_BASE_FEE_STROOPS,
	DEFAULT_BASE_RESERVE_STROOPS,
};
pub use operation::{normalize_operation, NormalizedOperation, Operation};
pub use transaction::{normalize_transaction, FeeAmount, NormalizedTransaction, Transaction};
