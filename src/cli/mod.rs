//! CLI support for sieve-lang
//!
//! Provides programmatic access to the `sieve` command so it can be embedded
//! in other tools and tested without spawning a process.

mod check;
mod docs;

pub use check::{CheckOptions, CheckResult, execute_check, parse_records};
pub use docs::{DocCategory, get_doc_category, get_docs_overview};

use serde::Serialize;
use std::io;
use thiserror::Error;

use crate::{FilterError, Record, Store, StoreError, ValueType};

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Filter error: {0}")]
    Filter(#[from] FilterError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("No input provided. Use --input, --file or pipe a JSON array of stores to stdin.")]
    NoInput,

    #[error("Unknown category: '{0}'\nRun 'sieve docs' to see available categories.")]
    UnknownCategory(String),
}

impl CliError {
    /// Whether the failure was caused by the user's query or input
    /// rather than by the environment.
    pub fn is_user_error(&self) -> bool {
        match self {
            CliError::Filter(_) | CliError::Json(_) | CliError::NoInput | CliError::UnknownCategory(_) => true,
            CliError::Store(e) => e.is_client_error(),
            CliError::Io(_) => false,
        }
    }
}

/// One filterable field, as listed by `sieve fields`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub value_type: ValueType,
    pub orderable: bool,
}

/// Fields a store filter can reference.
pub fn list_fields() -> Vec<FieldInfo> {
    Store::schema()
        .fields()
        .map(|def| FieldInfo {
            name: def.name.clone(),
            value_type: def.value_type(),
            orderable: def.value_type().is_orderable(),
        })
        .collect()
}
