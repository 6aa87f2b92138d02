//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, default servers, map endpoint)
//! - CLI option types and parsing
//! - Configuration validation

mod constants;
mod types;

pub use constants::*;
pub use types::{Config, FamilyEndpoint, LogFormat, LogLevel, ValidationError};
