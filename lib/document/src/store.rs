//! Owner-scoped document store.
//!
//! In-memory storage for XML documents. Every fetch and delete is
//! scoped by owner; a missing document and a foreign document are the
//! same observable outcome.

use crate::document::Document;
use crate::error::DocumentError;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;
use xmldoc_core::{DocumentId, Result};

/// Stores documents keyed by ID, scoped by owner on access.
///
/// Shared across callers behind `&self`; the map lives behind an async
/// `RwLock`.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: RwLock<HashMap<DocumentId, Document>>,
}

impl DocumentStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lists the given owner's documents, oldest first.
    pub async fn list(&self, owner: &str) -> Vec<Document> {
        let documents = self.documents.read().await;
        let mut owned: Vec<Document> = documents
            .values()
            .filter(|doc| doc.owner() == owner)
            .cloned()
            .collect();
        owned.sort_by_key(Document::created_at);
        owned
    }

    /// Fetches one of the owner's documents.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::NotAccessible`] when the document does
    /// not exist or belongs to another owner.
    pub async fn get(&self, id: DocumentId, owner: &str) -> Result<Document, DocumentError> {
        let documents = self.documents.read().await;
        match documents.get(&id) {
            Some(doc) if doc.owner() == owner => Ok(doc.clone()),
            _ => Err(DocumentError::NotAccessible { id }.into()),
        }
    }

    /// Saves a document, inserting or replacing by ID.
    ///
    /// Returns the stored document.
    pub async fn save(&self, document: Document) -> Document {
        debug!(id = %document.id(), "saving document");
        let mut documents = self.documents.write().await;
        documents.insert(document.id(), document.clone());
        document
    }

    /// Deletes one of the owner's documents.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::NotAccessible`] when the document does
    /// not exist or belongs to another owner. A foreign document is
    /// left untouched.
    pub async fn delete(&self, id: DocumentId, owner: &str) -> Result<(), DocumentError> {
        debug!(id = %id, "deleting document");
        let mut documents = self.documents.write().await;
        match documents.get(&id) {
            Some(doc) if doc.owner() == owner => {
                documents.remove(&id);
                Ok(())
            }
            _ => Err(DocumentError::NotAccessible { id }.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_then_get_returns_the_document() {
        let store = DocumentStore::new();
        let doc = store
            .save(Document::new("alice", "notes", "<notes/>"))
            .await;

        let fetched = store.get(doc.id(), "alice").await.expect("get");
        assert_eq!(fetched, doc);
    }

    #[tokio::test]
    async fn get_denies_foreign_documents() {
        let store = DocumentStore::new();
        let doc = store
            .save(Document::new("alice", "notes", "<notes/>"))
            .await;

        assert!(store.get(doc.id(), "mallory").await.is_err());
    }

    #[tokio::test]
    async fn get_denies_unknown_ids() {
        let store = DocumentStore::new();
        assert!(store.get(DocumentId::new(), "alice").await.is_err());
    }

    #[tokio::test]
    async fn list_returns_only_the_owners_documents_oldest_first() {
        let store = DocumentStore::new();
        let first = store
            .save(Document::new("alice", "first", "<a/>"))
            .await;
        store.save(Document::new("bob", "other", "<b/>")).await;
        let second = store
            .save(Document::new("alice", "second", "<c/>"))
            .await;

        let listed = store.list("alice").await;
        let names: Vec<&str> = listed.iter().map(Document::name).collect();

        assert_eq!(listed.len(), 2);
        assert!(listed.contains(&first) && listed.contains(&second));
        assert!(names == vec!["first", "second"] || first.created_at() == second.created_at());
    }

    #[tokio::test]
    async fn save_replaces_by_id() {
        let store = DocumentStore::new();
        let mut doc = store
            .save(Document::new("alice", "notes", "<notes/>"))
            .await;

        doc.set_content("<notes><entry>hi</entry></notes>");
        doc.set_version("2");
        store.save(doc.clone()).await;

        let fetched = store.get(doc.id(), "alice").await.expect("get");
        assert_eq!(fetched.version(), "2");
        assert_eq!(store.list("alice").await.len(), 1);
    }

    #[tokio::test]
    async fn delete_removes_the_document() {
        let store = DocumentStore::new();
        let doc = store
            .save(Document::new("alice", "notes", "<notes/>"))
            .await;

        store.delete(doc.id(), "alice").await.expect("delete");

        assert!(store.get(doc.id(), "alice").await.is_err());
        assert!(store.list("alice").await.is_empty());
    }

    #[tokio::test]
    async fn delete_denies_and_keeps_foreign_documents() {
        let store = DocumentStore::new();
        let doc = store
            .save(Document::new("alice", "notes", "<notes/>"))
            .await;

        assert!(store.delete(doc.id(), "mallory").await.is_err());
        assert!(store.get(doc.id(), "alice").await.is_ok());
    }
}
