//! Error handling for the health probe client
//!
//! Probe operations never fail; these errors only cover the setup surface:
//! loading configuration and building the HTTP client.

mod helpers;
mod types;

pub use types::{HealthError, Result};
