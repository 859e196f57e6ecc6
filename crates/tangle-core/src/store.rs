//! Virtual fragment documents, keyed by virtual URI.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// What [`FragmentStore::register`] did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreChange {
    /// The URI was not present before.
    Inserted,
    /// The URI existed with different content.
    Updated,
    /// The URI existed with identical content.
    Unchanged,
}

/// Contract through which an analysis engine reads virtual document content.
pub trait ContentProvider {
    /// Content of the virtual document at `uri`; empty when unknown.
    fn provide(&self, uri: &str) -> String;
}

/// Owner of all virtual fragment documents.
///
/// Single-writer by contract: the document controller performs every
/// mutation, engines read through [`ContentProvider`]. There is no interior
/// locking; callers serialize access.
#[derive(Debug, Default)]
pub struct FragmentStore {
    documents: HashMap<String, String>,
}

impl FragmentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the content for `uri`, reporting what changed.
    ///
    /// [`StoreChange::Updated`] is the change signal a caller forwards to
    /// engines that cache virtual document content.
    pub fn register(&mut self, uri: impl Into<String>, content: impl Into<String>) -> StoreChange {
        let uri = uri.into();
        let content = content.into();
        let change = match self.documents.get(&uri) {
            None => StoreChange::Inserted,
            Some(existing) if *existing == content => StoreChange::Unchanged,
            Some(_) => StoreChange::Updated,
        };
        if change != StoreChange::Unchanged {
            self.documents.insert(uri, content);
        }
        change
    }

    /// Content stored for `uri`. Unknown URIs read as empty, never an error.
    pub fn read(&self, uri: &str) -> &str {
        self.documents.get(uri).map_or("", String::as_str)
    }

    /// Remove `uri`, reporting whether it was present.
    pub fn unregister(&mut self, uri: &str) -> bool {
        self.documents.remove(uri).is_some()
    }

    /// Whether `uri` currently has content.
    pub fn contains(&self, uri: &str) -> bool {
        self.documents.contains_key(uri)
    }

    /// Number of registered virtual documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// True when no virtual documents are registered.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl ContentProvider for FragmentStore {
    fn provide(&self, uri: &str) -> String {
        self.read(uri).to_string()
    }
}
