//! Historical pollutant reporting.
//!
//! Loads the yearly hourly tables for each station and partitions them into
//! daily, hour-of-day and monthly buckets, treating missing readings as
//! no-ops.

pub mod aggregate;
pub mod source;
pub mod types;
pub mod utility;
