//! External tool execution

pub mod runner;

pub use runner::{SystemRunner, ToolRunner};
