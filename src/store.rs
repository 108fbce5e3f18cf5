//! In-memory store records and the catalog that owns them.
//!
//! The catalog is the collaborator the filter language was built for: it
//! owns a collection of [`Store`] records, keeps it consistent, and answers
//! filter queries by compiling them against [`Store::schema`].

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    error::FilterError,
    evaluator::filter,
    parse_filter_with,
    parser::ParserConfig,
    schema::{FieldSchema, Record},
};

pub const MAX_ID_LEN: usize = 30;
pub const MAX_TITLE_LEN: usize = 100;
pub const MAX_CONTENT_LEN: usize = 2000;

/// A store listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub views: i64,
    #[serde(default)]
    pub time_stamp: i64,
}

impl Store {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        views: i64,
        time_stamp: i64,
    ) -> Self {
        Store {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            views,
            time_stamp,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Check required fields and length limits.
    pub fn validate(&self) -> Result<(), StoreError> {
        check_text("id", &self.id, MAX_ID_LEN)?;
        check_text("title", &self.title, MAX_TITLE_LEN)?;
        check_text("content", &self.content, MAX_CONTENT_LEN)
    }
}

fn check_text(field: &'static str, value: &str, max: usize) -> Result<(), StoreError> {
    let len = value.chars().count();
    if value.trim().is_empty() {
        return Err(StoreError::Invalid {
            field,
            reason: "is required".to_string(),
        });
    }
    if len > max {
        return Err(StoreError::Invalid {
            field,
            reason: format!("is {} characters long, the limit is {}", len, max),
        });
    }
    Ok(())
}

impl Record for Store {
    fn schema() -> &'static FieldSchema<Self> {
        static SCHEMA: OnceLock<FieldSchema<Store>> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            FieldSchema::new()
                .string("Id", Store::id)
                .string("Title", Store::title)
                .string("Content", Store::content)
                .int("Views", |store: &Store| store.views)
                .int("TimeStamp", |store: &Store| store.time_stamp)
        })
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("invalid store: {field} {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("a store with the title '{0}' already exists")]
    DuplicateTitle(String),

    #[error("store with id '{0}' not found")]
    NotFound(String),

    #[error("invalid filter: {0}")]
    Filter(#[from] FilterError),
}

impl StoreError {
    /// Whether the error was caused by the caller's input (a rejected request)
    /// rather than by a missing record.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, StoreError::NotFound(_))
    }
}

/// Ordered, in-memory collection of [`Store`] records.
///
/// # Examples
///
/// ```
/// use sieve_lang::{Store, StoreCatalog};
///
/// let mut catalog = StoreCatalog::new();
/// catalog.add(Store::new("store-1", "Gadget Haven", "Tech gadgets.", 150, 0)).unwrap();
/// catalog.add(Store::new("store-2", "Book World", "Books.", 200, 0)).unwrap();
///
/// let hits = catalog.query(Some(r#"EQUAL(title,"Book World")"#)).unwrap();
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].id, "store-2");
/// ```
#[derive(Debug, Clone, Default)]
pub struct StoreCatalog {
    stores: Vec<Store>,
}

impl StoreCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from existing records without validation, keeping the
    /// last record for any repeated id.
    pub fn from_stores(stores: impl IntoIterator<Item = Store>) -> Self {
        let mut catalog = StoreCatalog::new();
        for store in stores {
            catalog.upsert(store);
        }
        catalog
    }

    pub fn all(&self) -> &[Store] {
        &self.stores
    }

    pub fn len(&self) -> usize {
        self.stores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Store> {
        self.stores.iter().find(|s| s.id == id)
    }

    fn upsert(&mut self, store: Store) {
        match self.stores.iter_mut().find(|s| s.id == store.id) {
            Some(existing) => *existing = store,
            None => self.stores.push(store),
        }
    }

    fn title_taken(&self, title: &str, except_id: &str) -> bool {
        self.stores
            .iter()
            .any(|s| s.id != except_id && s.title.to_lowercase() == title.to_lowercase())
    }

    /// Insert a new store, or replace the one with the same id.
    ///
    /// Titles are unique (ignoring case) across different ids.
    pub fn add(&mut self, store: Store) -> Result<&Store, StoreError> {
        store.validate()?;
        if self.title_taken(&store.title, &store.id) {
            tracing::warn!(id = %store.id, title = %store.title, "rejected store with duplicate title");
            return Err(StoreError::DuplicateTitle(store.title));
        }

        let id = store.id.clone();
        self.upsert(store);
        tracing::debug!(%id, total = self.stores.len(), "store saved");
        self.get(&id).ok_or(StoreError::NotFound(id))
    }

    /// Replace every field of an existing store except its id.
    pub fn update(&mut self, id: &str, updated: Store) -> Result<&Store, StoreError> {
        let index = self
            .stores
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let updated = Store {
            id: id.to_string(),
            ..updated
        };
        updated.validate()?;
        if self.title_taken(&updated.title, id) {
            return Err(StoreError::DuplicateTitle(updated.title));
        }

        self.stores[index] = updated;
        tracing::debug!(%id, "store updated");
        Ok(&self.stores[index])
    }

    pub fn delete(&mut self, id: &str) -> Result<Store, StoreError> {
        let index = self
            .stores
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        tracing::debug!(%id, "store deleted");
        Ok(self.stores.remove(index))
    }

    /// Records matching `query`, in catalog order. A missing or blank query
    /// returns every record.
    pub fn query(&self, query: Option<&str>) -> Result<Vec<&Store>, StoreError> {
        self.query_with(query, &ParserConfig::default())
    }

    pub fn query_with(
        &self,
        query: Option<&str>,
        config: &ParserConfig,
    ) -> Result<Vec<&Store>, StoreError> {
        let query = match query {
            Some(q) if !q.trim().is_empty() => q,
            _ => return Ok(self.stores.iter().collect()),
        };

        let predicate = parse_filter_with(query, Store::schema(), config).inspect_err(|err| {
            tracing::warn!(%query, error = %err, "rejected filter");
        })?;
        let hits = filter(&predicate, &self.stores);
        tracing::debug!(filter = %predicate, matched = hits.len(), scanned = self.stores.len(), "query");
        Ok(hits)
    }
}
