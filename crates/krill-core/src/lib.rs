//! Core types and configuration for the krill/whale population model.

pub mod types;
pub mod config;
pub mod error;
pub mod nonfinite;

pub use error::{Error, Result};
pub use types::*;
pub use config::*;
