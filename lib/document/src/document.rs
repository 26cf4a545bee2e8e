//! The stored XML document record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use xmldoc_core::DocumentId;

/// An XML document owned by a user.
///
/// The content is kept as the raw XML text; interpretation (generic
/// conversion, typed marshalling) happens on demand in the `dynamic`
/// and `marshal` modules. The owner is the identity provider's username
/// for the user who created the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Unique document ID.
    id: DocumentId,
    /// Owner, as the identity provider's username.
    owner: String,
    /// Display name of the document.
    name: String,
    /// Raw XML content.
    content: String,
    /// Caller-managed version label.
    version: String,
    /// When the document was created.
    created_at: DateTime<Utc>,
}

impl Document {
    /// Creates a new document owned by the given user.
    ///
    /// The ID is generated and the version starts at "1".
    #[must_use]
    pub fn new(
        owner: impl Into<String>,
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: DocumentId::new(),
            owner: owner.into(),
            name: name.into(),
            content: content.into(),
            version: "1".to_string(),
            created_at: Utc::now(),
        }
    }

    /// Sets the version label.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Returns the document ID.
    #[must_use]
    pub fn id(&self) -> DocumentId {
        self.id
    }

    /// Returns the owner's username.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the raw XML content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the version label.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns when the document was created.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Renames the document.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Replaces the XML content.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// Replaces the version label.
    pub fn set_version(&mut self, version: impl Into<String>) {
        self.version = version.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_document_has_generated_id_and_initial_version() {
        let doc = Document::new("alice", "notes", "<notes/>");

        assert!(doc.id().to_string().starts_with("doc_"));
        assert_eq!(doc.owner(), "alice");
        assert_eq!(doc.name(), "notes");
        assert_eq!(doc.content(), "<notes/>");
        assert_eq!(doc.version(), "1");
    }

    #[test]
    fn with_version_overrides_the_label() {
        let doc = Document::new("alice", "notes", "<notes/>").with_version("2.1");
        assert_eq!(doc.version(), "2.1");
    }

    #[test]
    fn setters_replace_fields() {
        let mut doc = Document::new("alice", "notes", "<notes/>");

        doc.set_name("journal");
        doc.set_content("<journal/>");
        doc.set_version("2");

        assert_eq!(doc.name(), "journal");
        assert_eq!(doc.content(), "<journal/>");
        assert_eq!(doc.version(), "2");
    }

    #[test]
    fn document_serialization_roundtrip() {
        let doc = Document::new("alice", "notes", "<notes><entry>hi</entry></notes>");

        let json = serde_json::to_string(&doc).expect("serialize");
        let parsed: Document = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(doc, parsed);
    }
}
