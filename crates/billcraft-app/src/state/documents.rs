//! # Document Collection State
//!
//! In-memory mirror of the persisted document collection.
//!
//! ## Thread Safety
//! The collection is wrapped in `Arc<Mutex<T>>` because commands can
//! run concurrently and writes must be exclusive. Operations hold the
//! lock briefly; persistence happens outside the lock with a cloned
//! snapshot.
//!
//! ## Save Flow
//! ```text
//! save_document command
//!      │
//!      ├── upsert into DocumentsState   (in-memory, under lock)
//!      ├── snapshot()                   (clone, releases lock)
//!      └── store.save_documents(&snap)  (async SQLite write)
//! ```

use std::sync::{Arc, Mutex};

use billcraft_core::Document;

/// Managed state for the document collection.
#[derive(Debug, Clone)]
pub struct DocumentsState {
    documents: Arc<Mutex<Vec<Document>>>,
}

impl DocumentsState {
    /// Creates an empty collection.
    pub fn new() -> Self {
        DocumentsState {
            documents: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Seeds the collection from persisted documents at startup.
    pub fn from_documents(documents: Vec<Document>) -> Self {
        DocumentsState {
            documents: Arc::new(Mutex::new(documents)),
        }
    }

    /// Executes a function with read access to the collection.
    pub fn with_documents<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&[Document]) -> R,
    {
        let documents = self.documents.lock().expect("Documents mutex poisoned");
        f(&documents)
    }

    /// Executes a function with write access to the collection.
    pub fn with_documents_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Vec<Document>) -> R,
    {
        let mut documents = self.documents.lock().expect("Documents mutex poisoned");
        f(&mut documents)
    }

    /// Inserts or replaces a document by id.
    ///
    /// An existing document is replaced in place, keeping its position
    /// in the collection; a new one is appended. Saving twice is
    /// therefore idempotent.
    pub fn upsert(&self, document: Document) {
        self.with_documents_mut(|docs| {
            match docs.iter_mut().find(|d| d.id == document.id) {
                Some(existing) => *existing = document,
                None => docs.push(document),
            }
        });
    }

    /// Removes a document by id. Returns whether it existed.
    pub fn remove(&self, id: &str) -> bool {
        self.with_documents_mut(|docs| {
            let before = docs.len();
            docs.retain(|d| d.id != id);
            docs.len() != before
        })
    }

    /// Finds a document by id.
    pub fn find(&self, id: &str) -> Option<Document> {
        self.with_documents(|docs| docs.iter().find(|d| d.id == id).cloned())
    }

    /// Full snapshot of the collection, in insertion order.
    pub fn snapshot(&self) -> Vec<Document> {
        self.with_documents(|docs| docs.to_vec())
    }

    /// Snapshot sorted newest-first by document date (ties keep
    /// insertion order).
    pub fn sorted_by_date_desc(&self) -> Vec<Document> {
        let mut docs = self.snapshot();
        docs.sort_by(|a, b| b.date.cmp(&a.date));
        docs
    }

    /// Number of documents in the collection.
    pub fn len(&self) -> usize {
        self.with_documents(|docs| docs.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for DocumentsState {
    fn default() -> Self {
        Self::new()
    }
}
