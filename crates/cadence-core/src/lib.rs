//! `cadence-core`: configuration, error types and identifiers shared by the
//! Cadence crates.

pub mod config;
pub mod error;
pub mod types;

pub use config::CadenceConfig;
pub use error::{CadenceError, Result};
pub use types::{Locale, TaskId};
