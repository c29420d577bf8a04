//! Workflow helpers for Chronicle

mod changelog;

pub use changelog::*;
