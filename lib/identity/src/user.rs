//! The user record returned by the identity provider.
//!
//! The record is treated as opaque by the rest of the application:
//! nothing downstream reads or validates individual fields, only the
//! presence of a record decides whether someone is signed in.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A user record as returned by the identity provider.
///
/// Carries the provider-side username and whatever attributes the
/// provider attached to the account (email, verification flags, ...).
/// No attribute is interpreted locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// The provider-side username.
    username: String,
    /// Provider-side account attributes, by attribute name.
    #[serde(default)]
    attributes: HashMap<String, String>,
}

impl UserRecord {
    /// Creates a record with the given username and no attributes.
    #[must_use]
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            attributes: HashMap::new(),
        }
    }

    /// Adds a provider attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Returns the provider-side username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the value of a provider attribute, if present.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Returns all provider attributes.
    #[must_use]
    pub fn attributes(&self) -> &HashMap<String, String> {
        &self.attributes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_has_username_and_no_attributes() {
        let user = UserRecord::new("alice");

        assert_eq!(user.username(), "alice");
        assert!(user.attributes().is_empty());
    }

    #[test]
    fn with_attribute_is_readable_by_name() {
        let user = UserRecord::new("alice").with_attribute("email", "alice@example.com");

        assert_eq!(user.attribute("email"), Some("alice@example.com"));
        assert_eq!(user.attribute("phone"), None);
    }

    #[test]
    fn record_serialization_roundtrip() {
        let user = UserRecord::new("alice")
            .with_attribute("email", "alice@example.com")
            .with_attribute("email_verified", "true");

        let json = serde_json::to_string(&user).expect("serialize");
        let parsed: UserRecord = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(user, parsed);
    }

    #[test]
    fn record_deserializes_without_attributes() {
        let parsed: UserRecord =
            serde_json::from_str(r#"{"username":"alice"}"#).expect("deserialize");
        assert_eq!(parsed.username(), "alice");
        assert!(parsed.attributes().is_empty());
    }
}
