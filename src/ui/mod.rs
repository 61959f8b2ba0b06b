//! Terminal output

pub mod report;

pub use report::Reporter;
