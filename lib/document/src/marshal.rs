//! Typed XML marshalling over serde.
//!
//! For documents with a known schema, callers define a serde type and
//! convert between it and XML text. Attributes use the `@`-prefix field
//! rename convention of `quick_xml::de`.

use crate::error::XmlError;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Deserializes XML text into a typed value.
///
/// # Errors
///
/// Returns [`XmlError::Malformed`] when the input is not well-formed or
/// does not match the target type's schema.
pub fn from_xml<T: DeserializeOwned>(xml: &str) -> Result<T, XmlError> {
    quick_xml::de::from_str(xml).map_err(|err| XmlError::Malformed {
        reason: err.to_string(),
    })
}

/// Serializes a typed value to XML text under the given root element.
///
/// # Errors
///
/// Returns [`XmlError::Serialize`] when the value cannot be represented
/// as XML.
pub fn to_xml<T: Serialize>(root: &str, value: &T) -> Result<String, XmlError> {
    quick_xml::se::to_string_with_root(root, value).map_err(|err| XmlError::Serialize {
        reason: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Book {
        #[serde(rename = "@id")]
        id: String,
        title: String,
        author: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        publisher: Option<String>,
        year: i32,
        genres: Genres,
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Genres {
        #[serde(rename = "genre", default)]
        genre: Vec<String>,
    }

    fn dune() -> Book {
        Book {
            id: "b1".to_string(),
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            publisher: Some("Chilton Books".to_string()),
            year: 1965,
            genres: Genres {
                genre: vec!["science fiction".to_string(), "adventure".to_string()],
            },
        }
    }

    #[test]
    fn from_xml_reads_attributes_and_nested_lists() {
        let xml = r#"<book id="b1">
            <title>Dune</title>
            <author>Frank Herbert</author>
            <publisher>Chilton Books</publisher>
            <year>1965</year>
            <genres>
                <genre>science fiction</genre>
                <genre>adventure</genre>
            </genres>
        </book>"#;

        let book: Book = from_xml(xml).expect("unmarshal");
        assert_eq!(book, dune());
    }

    #[test]
    fn from_xml_defaults_a_missing_list() {
        let xml = r#"<book id="b2">
            <title>Hyperion</title>
            <author>Dan Simmons</author>
            <year>1989</year>
            <genres></genres>
        </book>"#;

        let book: Book = from_xml(xml).expect("unmarshal");
        assert_eq!(book.publisher, None);
        assert!(book.genres.genre.is_empty());
    }

    #[test]
    fn from_xml_rejects_schema_mismatches() {
        let err = from_xml::<Book>("<book><title>No id</title></book>").unwrap_err();
        assert!(matches!(err, XmlError::Malformed { .. }));
    }

    #[test]
    fn marshalling_roundtrips_through_xml() {
        let xml = to_xml("book", &dune()).expect("marshal");
        let parsed: Book = from_xml(&xml).expect("unmarshal");
        assert_eq!(parsed, dune());
    }
}
