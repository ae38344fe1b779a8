use std::io::Read;

use roxmltree::ParsingOptions;

use crate::document::encoding::decode_xml;
use crate::document::error::DocumentError;
use crate::document::{Attribute, Element, Node, OrderDocument, QName};

const UTF8_BOM: &str = "\u{feff}";

/// Read a byte stream to the end and parse it as a namespace-aware document.
pub fn parse_document<R: Read>(mut reader: R) -> Result<OrderDocument, DocumentError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    parse_bytes(&bytes)
}

/// Parse raw bytes, detecting the encoding from a byte order mark or the XML declaration.
pub fn parse_bytes(bytes: &[u8]) -> Result<OrderDocument, DocumentError> {
    let text = decode_xml(bytes)?;
    parse_str(&text)
}

/// Parse XML text. DTDs are refused; whitespace-only text nodes are dropped.
pub fn parse_str(text: &str) -> Result<OrderDocument, DocumentError> {
    let text = text.strip_prefix(UTF8_BOM).unwrap_or(text);
    if text.trim().is_empty() {
        return Err(DocumentError::Empty);
    }

    let options = ParsingOptions {
        allow_dtd: false,
        ..ParsingOptions::default()
    };
    let doc = roxmltree::Document::parse_with_options(text, options)?;
    let root = convert_element(doc.root_element());
    log::trace!("Parsed document with root {}", root.name);
    Ok(OrderDocument::new(root))
}

fn convert_element(node: roxmltree::Node<'_, '_>) -> Element {
    let tag = node.tag_name();
    let name = QName {
        namespace: tag.namespace().map(str::to_string),
        prefix: tag
            .namespace()
            .and_then(|ns| node.lookup_prefix(ns))
            .map(str::to_string),
        local: tag.name().to_string(),
    };

    let attributes = node
        .attributes()
        .map(|attr| Attribute {
            name: QName {
                namespace: attr.namespace().map(str::to_string),
                prefix: attr
                    .namespace()
                    .and_then(|ns| node.lookup_prefix(ns))
                    .map(str::to_string),
                local: attr.name().to_string(),
            },
            value: attr.value().to_string(),
        })
        .collect();

    let mut children = Vec::new();
    for child in node.children() {
        if child.is_element() {
            children.push(Node::Element(convert_element(child)));
        } else if child.is_text() {
            if let Some(text) = child.text() {
                if !text.trim().is_empty() {
                    children.push(Node::Text(text.to_string()));
                }
            }
        }
    }

    Element {
        name,
        attributes,
        children,
    }
}
