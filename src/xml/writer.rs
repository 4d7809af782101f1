//! Descriptor serialization
//!
//! Content-faithful: elements, attributes, text, and comments are
//! written back exactly as stored, so a parse/write round trip of an
//! unmodified document loses nothing. Character data and attribute
//! values are re-escaped on the way out.

use crate::xml::model::{Document, Element, Node};

/// Serialize a document, including the XML declaration
pub fn write_document(doc: &Document) -> String {
    let mut output = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    write_element(&doc.root, &mut output);
    output.push('\n');
    output
}

fn write_element(element: &Element, output: &mut String) {
    output.push('<');
    output.push_str(&element.name);

    for (key, value) in &element.attributes {
        output.push(' ');
        output.push_str(key);
        output.push_str("=\"");
        output.push_str(&escape_attribute(value));
        output.push('"');
    }

    if element.children.is_empty() {
        output.push_str("/>");
        return;
    }

    output.push('>');
    for child in &element.children {
        match child {
            Node::Element(el) => write_element(el, output),
            Node::Text(text) => output.push_str(&escape_text(text)),
            Node::Comment(text) => {
                output.push_str("<!--");
                output.push_str(text);
                output.push_str("-->");
            }
        }
    }
    output.push_str("</");
    output.push_str(&element.name);
    output.push('>');
}

fn escape_text(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attribute(input: &str) -> String {
    escape_text(input).replace('"', "&quot;")
}
