//! Shared access to pyramid and annotation XML documents

use crate::error::{PyramidError, Result};
use roxmltree::{Document, Node, ParsingOptions};
use std::str::FromStr;

/// Parse a document; pyramid files often carry an inline DTD
pub(crate) fn parse(xml: &str) -> Result<Document<'_>> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    Ok(Document::parse_with_options(xml, options)?)
}

/// Direct element children named `tag`, in document order
pub(crate) fn children<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    tag: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(move |child| child.is_element() && child.has_tag_name(tag))
}

/// First direct element child named `tag`
pub(crate) fn child<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    tag: &'static str,
) -> Option<Node<'a, 'input>> {
    children(node, tag).next()
}

/// The `text/line` nodes of `root`, joined by newlines
pub(crate) fn document_text(root: Node<'_, '_>) -> String {
    let Some(text) = child(root, "text") else {
        return String::new();
    };
    children(text, "line")
        .map(|line| line.text().unwrap_or(""))
        .collect::<Vec<_>>()
        .join("\n")
}

/// A required string attribute
pub(crate) fn required<'a>(
    node: Node<'a, '_>,
    element: &'static str,
    attribute: &'static str,
) -> Result<&'a str> {
    node.attribute(attribute)
        .ok_or(PyramidError::MissingAttribute { element, attribute })
}

/// A required attribute parsed as `T`
pub(crate) fn parsed<T: FromStr>(
    node: Node<'_, '_>,
    element: &'static str,
    attribute: &'static str,
) -> Result<T> {
    let raw = required(node, element, attribute)?;
    raw.trim()
        .parse()
        .map_err(|_| PyramidError::InvalidAttribute {
            element,
            attribute,
            value: raw.to_string(),
        })
}
