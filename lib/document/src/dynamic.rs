//! Schema-free XML interpretation.
//!
//! Converts arbitrary XML into a `serde_json::Value` without knowing
//! the document's schema ahead of time, checks well-formedness, and
//! extracts structural metadata about the root element.
//!
//! Conversion rules:
//! - Element attributes land under an `@attributes` key.
//! - Child elements are grouped by name: a single occurrence becomes a
//!   scalar entry, repeated occurrences become an array.
//! - A child with no attributes and no element children collapses to
//!   its trimmed text content.
//! - Text inside an element that also carries attributes or children
//!   is kept under a `#text` key.

use crate::error::XmlError;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use serde::Serialize;
use serde_json::{Map, Value};

/// Key under which element attributes are collected.
const ATTRIBUTES_KEY: &str = "@attributes";

/// Key for the text content of an element that also carries attributes
/// or child elements.
const TEXT_KEY: &str = "#text";

/// Structural metadata about an XML document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct XmlMetadata {
    /// Name of the root element.
    pub root_element: String,
    /// Namespace URIs declared on the root element.
    pub namespaces: Vec<String>,
    /// One-level summary of the root element's shape.
    pub structure: StructureSummary,
}

/// One-level structural summary of an element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructureSummary {
    /// Element name.
    pub name: String,
    /// Attribute names, in document order.
    pub attributes: Vec<String>,
    /// Direct children grouped by name, in order of first occurrence.
    pub children: Vec<ChildCount>,
}

/// Occurrence count for one child element name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChildCount {
    /// Child element name.
    pub name: String,
    /// Number of direct children with that name.
    pub count: usize,
}

/// Parsed element tree, internal to this module.
#[derive(Debug)]
struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlElement>,
    text: String,
}

impl XmlElement {
    fn from_start(start: &BytesStart<'_>) -> Result<Self, XmlError> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|err| XmlError::Malformed {
                reason: err.to_string(),
            })?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(|err| XmlError::Malformed {
                    reason: err.to_string(),
                })?
                .into_owned();
            attributes.push((key, value));
        }
        Ok(Self {
            name,
            attributes,
            children: Vec::new(),
            text: String::new(),
        })
    }

    /// A leaf carries only text content.
    fn is_leaf(&self) -> bool {
        self.attributes.is_empty() && self.children.is_empty()
    }
}

/// Parses the document into an element tree rooted at the single
/// top-level element.
fn parse_tree(xml: &str) -> Result<XmlElement, XmlError> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        let event = reader.read_event().map_err(|err| XmlError::Malformed {
            reason: err.to_string(),
        })?;
        match event {
            Event::Start(start) => {
                stack.push(XmlElement::from_start(&start)?);
            }
            Event::Empty(start) => {
                let element = XmlElement::from_start(&start)?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(end) => {
                let element = stack.pop().ok_or_else(|| XmlError::Malformed {
                    reason: format!(
                        "closing tag '{}' without a matching opening tag",
                        String::from_utf8_lossy(end.name().as_ref())
                    ),
                })?;
                if element.name.as_bytes() != end.name().as_ref() {
                    return Err(XmlError::Malformed {
                        reason: format!(
                            "expected closing tag '{}', found '{}'",
                            element.name,
                            String::from_utf8_lossy(end.name().as_ref())
                        ),
                    });
                }
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(text) => {
                let text = text.unescape().map_err(|err| XmlError::Malformed {
                    reason: err.to_string(),
                })?;
                match stack.last_mut() {
                    Some(parent) => parent.text.push_str(&text),
                    None if text.trim().is_empty() => {}
                    None => {
                        return Err(XmlError::Malformed {
                            reason: "text content outside the root element".to_string(),
                        });
                    }
                }
            }
            Event::CData(cdata) => {
                let text = String::from_utf8_lossy(&cdata.into_inner()).into_owned();
                if let Some(parent) = stack.last_mut() {
                    parent.text.push_str(&text);
                }
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions and
            // doctypes carry no structure.
            Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_) => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(XmlError::Malformed {
            reason: format!("unclosed element '{}'", open.name),
        });
    }
    root.ok_or_else(|| XmlError::Malformed {
        reason: "document has no root element".to_string(),
    })
}

/// Attaches a completed element to its parent, or installs it as the
/// root when the stack is empty.
fn attach(
    stack: &mut Vec<XmlElement>,
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<(), XmlError> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(element);
            Ok(())
        }
        None if root.is_none() => {
            *root = Some(element);
            Ok(())
        }
        None => Err(XmlError::Malformed {
            reason: format!("unexpected second root element '{}'", element.name),
        }),
    }
}

/// Converts an XML document into a `serde_json::Value`.
///
/// # Errors
///
/// Returns [`XmlError::Malformed`] when the input is not well-formed.
pub fn parse_to_value(xml: &str) -> Result<Value, XmlError> {
    let root = parse_tree(xml)?;
    Ok(element_to_value(&root))
}

fn element_to_value(element: &XmlElement) -> Value {
    if element.is_leaf() {
        return Value::String(element.text.trim().to_string());
    }

    let mut map = Map::new();
    if !element.attributes.is_empty() {
        let attrs: Map<String, Value> = element
            .attributes
            .iter()
            .map(|(key, value)| (key.clone(), Value::String(value.clone())))
            .collect();
        map.insert(ATTRIBUTES_KEY.to_string(), Value::Object(attrs));
    }

    for (name, mut values) in group_children(element) {
        let entry = if values.len() == 1 {
            values.remove(0)
        } else {
            Value::Array(values)
        };
        map.insert(name, entry);
    }

    let text = element.text.trim();
    if !text.is_empty() {
        map.insert(TEXT_KEY.to_string(), Value::String(text.to_string()));
    }

    Value::Object(map)
}

/// Groups direct children by name, preserving first-occurrence order.
fn group_children(element: &XmlElement) -> Vec<(String, Vec<Value>)> {
    let mut groups: Vec<(String, Vec<Value>)> = Vec::new();
    for child in &element.children {
        let value = element_to_value(child);
        match groups.iter_mut().find(|(name, _)| *name == child.name) {
            Some((_, values)) => values.push(value),
            None => groups.push((child.name.clone(), vec![value])),
        }
    }
    groups
}

/// Returns whether the input parses as a well-formed XML document.
#[must_use]
pub fn is_well_formed(xml: &str) -> bool {
    parse_tree(xml).is_ok()
}

/// Extracts structural metadata about the document's root element.
///
/// Namespaces are the URIs of `xmlns` and `xmlns:*` declarations on the
/// root. The structure summary covers the root's direct children only.
///
/// # Errors
///
/// Returns [`XmlError::Malformed`] when the input is not well-formed.
pub fn metadata(xml: &str) -> Result<XmlMetadata, XmlError> {
    let root = parse_tree(xml)?;

    let namespaces = root
        .attributes
        .iter()
        .filter(|(key, _)| key == "xmlns" || key.starts_with("xmlns:"))
        .map(|(_, value)| value.clone())
        .collect();

    let attributes = root
        .attributes
        .iter()
        .map(|(key, _)| key.clone())
        .collect();

    let children = group_children(&root)
        .into_iter()
        .map(|(name, values)| ChildCount {
            name,
            count: values.len(),
        })
        .collect();

    Ok(XmlMetadata {
        root_element: root.name.clone(),
        namespaces,
        structure: StructureSummary {
            name: root.name,
            attributes,
            children,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const LIBRARY: &str = r#"<library xmlns="http://example.com/library" open="true">
        <book id="b1">
            <title>Dune</title>
            <author>Frank Herbert</author>
        </book>
        <book id="b2">
            <title>Hyperion</title>
            <author>Dan Simmons</author>
        </book>
        <address>12 Main St</address>
    </library>"#;

    #[test]
    fn attributes_land_under_the_attributes_key() {
        let value = parse_to_value(r#"<note priority="high">call back</note>"#).expect("parse");
        assert_eq!(
            value,
            json!({ "@attributes": { "priority": "high" }, "#text": "call back" })
        );
    }

    #[test]
    fn repeated_children_group_into_an_array() {
        let value = parse_to_value(LIBRARY).expect("parse");

        let books = value.get("book").expect("book entry");
        assert!(books.is_array());
        assert_eq!(books.as_array().expect("array").len(), 2);
        assert_eq!(
            books[0],
            json!({
                "@attributes": { "id": "b1" },
                "title": "Dune",
                "author": "Frank Herbert",
            })
        );
    }

    #[test]
    fn single_leaf_child_collapses_to_its_text() {
        let value = parse_to_value(LIBRARY).expect("parse");
        assert_eq!(value.get("address"), Some(&json!("12 Main St")));
    }

    #[test]
    fn leaf_text_is_trimmed() {
        let value = parse_to_value("<greeting>\n  hello\n</greeting>").expect("parse");
        assert_eq!(value, json!("hello"));
    }

    #[test]
    fn empty_elements_parse_as_empty_leaves() {
        let value = parse_to_value("<config><flag/></config>").expect("parse");
        assert_eq!(value, json!({ "flag": "" }));
    }

    #[test]
    fn cdata_is_kept_as_text() {
        let value =
            parse_to_value("<script><![CDATA[if (a < b) run();]]></script>").expect("parse");
        assert_eq!(value, json!("if (a < b) run();"));
    }

    #[test]
    fn unclosed_element_is_rejected() {
        let err = parse_to_value("<library><book></library>").unwrap_err();
        assert!(matches!(err, XmlError::Malformed { .. }));
    }

    #[test]
    fn second_root_element_is_rejected() {
        assert!(!is_well_formed("<a/><b/>"));
    }

    #[test]
    fn well_formedness_check() {
        assert!(is_well_formed(LIBRARY));
        assert!(!is_well_formed("not xml at all"));
        assert!(!is_well_formed(""));
    }

    #[test]
    fn metadata_summarizes_the_root() {
        let meta = metadata(LIBRARY).expect("metadata");

        assert_eq!(meta.root_element, "library");
        assert_eq!(meta.namespaces, vec!["http://example.com/library"]);
        assert_eq!(meta.structure.name, "library");
        assert_eq!(meta.structure.attributes, vec!["xmlns", "open"]);
        assert_eq!(
            meta.structure.children,
            vec![
                ChildCount {
                    name: "book".to_string(),
                    count: 2
                },
                ChildCount {
                    name: "address".to_string(),
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn metadata_collects_prefixed_namespaces() {
        let meta = metadata(
            r#"<doc xmlns="http://example.com/a" xmlns:x="http://example.com/b"><x:item/></doc>"#,
        )
        .expect("metadata");
        assert_eq!(
            meta.namespaces,
            vec!["http://example.com/a", "http://example.com/b"]
        );
    }

    #[test]
    fn metadata_rejects_malformed_input() {
        assert!(metadata("<open>").is_err());
    }
}
