//! permwatch library
//!
//! This module exports the CLI's configuration, analysis, and output
//! functionality for use in integration tests and as a library.

pub mod analyze;
pub mod config;
pub mod output;
