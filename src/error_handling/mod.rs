//! Error types for initialization and lookup failures.
//!
//! Lookup failures are converted to data, not propagated as errors: every
//! [`EndpointFailure`] becomes an `ErrorRecord` appended to the same result
//! list as successes, so the rendering side handles both uniformly.

mod types;

pub use types::{EndpointFailure, InitializationError};
