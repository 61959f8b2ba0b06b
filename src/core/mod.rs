//! Core types shared by every publisher operation
//!
//! - **config**: Optional publisher.toml parsing
//! - **error**: Error types with contextual help messages
//! - **invocation**: The nine positional arguments of a run
//! - **outcome**: Tagged run outcome and exit-code mapping

pub mod config;
pub mod error;
pub mod invocation;
pub mod outcome;
