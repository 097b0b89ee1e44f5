//! Utility modules for common functionality.
//!
//! - [`amount`]: stroop/XLM conversion and formatting
//! - [`http`]: retryable HTTP client construction
//! - [`logging`]: logging setup and structured error context
//! - [`parsing`]: size-string parsing for CLI flags
//! - [`scval`]: Soroban value (ScVal) decoding
//! - [`search`]: identifier classification and validation

mod amount;
mod http;
mod parsing;
mod scval;
mod search;

pub mod logging;

pub use amount::*;
pub use http::*;
pub use parsing::*;
pub use scval::*;
pub use search::*;
