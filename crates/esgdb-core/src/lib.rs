//! esgdb-core
//!
//! Shared domain types, error taxonomy, collaborator traits, configuration and
//! summary-record loading for the ESG section retrieval workspace.

#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod config;
pub mod data_processor;
pub mod error;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
