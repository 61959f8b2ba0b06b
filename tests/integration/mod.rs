//! Integration tests for product-publisher
//!
//! Each test runs the compiled binary against fake storage and publishing
//! clients written as shell scripts.

#![cfg(unix)]

mod test_dry_run;
mod test_publish;
mod test_usage;
