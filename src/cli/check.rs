//! Run sieve filters against JSON store records

use super::CliError;
use crate::{ParserConfig, Record, Store, StoreCatalog, parse_filter_with};

/// Options for the check command
#[derive(Debug, Clone)]
pub struct CheckOptions {
    /// The filter expression
    pub query: String,
    /// JSON array of store records
    pub input: Option<String>,
    /// Only compile the filter, don't run it
    pub syntax_only: bool,
    /// Parser settings
    pub config: ParserConfig,
}

impl Default for CheckOptions {
    fn default() -> Self {
        CheckOptions {
            query: String::new(),
            input: None,
            syntax_only: false,
            config: ParserConfig::default(),
        }
    }
}

/// Result of a check operation
#[derive(Debug)]
pub enum CheckResult {
    /// The filter compiled; carries its canonical form
    SyntaxValid(String),
    /// Matching records, in input order
    Success(Vec<Store>),
}

/// Decode a JSON array of store records.
pub fn parse_records(json: &str) -> Result<Vec<Store>, CliError> {
    Ok(serde_json::from_str(json)?)
}

/// Execute a sieve check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    if options.syntax_only {
        let predicate = parse_filter_with(&options.query, Store::schema(), &options.config)?;
        return Ok(CheckResult::SyntaxValid(predicate.to_string()));
    }

    let json = options.input.as_ref().ok_or(CliError::NoInput)?;
    let catalog = StoreCatalog::from_stores(parse_records(json)?);

    let hits = catalog.query_with(Some(&options.query), &options.config)?;
    Ok(CheckResult::Success(hits.into_iter().cloned().collect()))
}
