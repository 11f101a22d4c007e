//! Utility modules
//!
//! - **error**: Error types for client setup
//! - **logging**: Tracing subscriber setup

pub mod error;
pub mod logging;

pub use error::{HealthError, Result};
pub use logging::{LogFormat, init_tracing};
