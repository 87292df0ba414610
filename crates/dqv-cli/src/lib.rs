//! CLI library components for the data quality validator.

pub mod io;
pub mod logging;
pub mod sample;
