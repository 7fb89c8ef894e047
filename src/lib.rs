pub mod config;
pub mod error;
pub mod fetch;
pub mod monitoring;
pub mod output;
pub mod parser;
pub mod reporting;
pub mod shell;
pub mod stats;
pub mod types;

pub use error::{AquaError, Result};
