//! Dialer Service Library Crate
//!
//! Loads configuration, selects the telephony provider and reports the result
//! of placing one call. The `dialer` binary is a thin wrapper around this library.

pub mod cli;
pub mod config;
pub mod dial;
pub mod report;
