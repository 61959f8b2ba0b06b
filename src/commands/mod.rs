//! CLI commands for product-publisher
//!
//! - **publish**: Upload a product directory and publish it (or print the plan with `--dry-run`)

pub mod publish;

pub use publish::{PublishOptions, run_publish};
