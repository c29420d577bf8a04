//! Chronicle Core - Shared foundation for changelog tooling
//!
//! This crate provides the error types, configuration, change categories and
//! document persistence helpers used by the other Chronicle crates.

pub mod config;
pub mod error;
pub mod types;
pub mod workflow;

pub use error::{ChronicleError, Result};
pub use types::ChangeCategory;
