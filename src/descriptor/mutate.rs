//! In-place tree edits: entry insertion, duplicate-guarded child
//! appends, comment annotation

use crate::xml::model::{Element, Node};

/// Indentation for a top-level entry
pub const ENTRY_INDENT: &str = "\n    ";
/// Indentation for a field inside an entry
pub const FIELD_INDENT: &str = "\n        ";

/// Insert a top-level entry at the given child index, preceded by two
/// line breaks so each entry is visually separated by a blank line.
/// Returns the entry's final index.
pub fn insert_entry(root: &mut Element, index: usize, entry: Element) -> usize {
    root.children.insert(index, Node::Element(entry));
    root.children.insert(index, Node::Text(ENTRY_INDENT.into()));
    root.children.insert(index, Node::Text(ENTRY_INDENT.into()));
    index + 2
}

/// Whitespace-normalized text equality: all space/tab/CR/LF stripped
/// from both sides before comparison
pub fn normalized_eq(a: &str, b: &str) -> bool {
    strip_whitespace(a) == strip_whitespace(b)
}

fn strip_whitespace(input: &str) -> String {
    input
        .chars()
        .filter(|c| !matches!(c, ' ' | '\t' | '\r' | '\n'))
        .collect()
}

/// Append a field child unless a child with the same tag name and
/// normalized-equal text content is already present.
///
/// A same-name child holding a *different* value does not count as
/// present: the new child is appended as a conflicting sibling rather
/// than replacing the old one.
///
/// Returns true when the child was appended.
pub fn append_child_if_absent(parent: &mut Element, child: Element) -> bool {
    let candidate_text = child.text_content();
    let already_present = parent.child_elements().any(|existing| {
        existing.name == child.name && normalized_eq(&existing.text_content(), &candidate_text)
    });
    if already_present {
        return false;
    }

    // Keep a trailing closing-tag indent (if any) at the end.
    let at = match parent.children.last() {
        Some(node) if node.is_blank_text() => parent.children.len() - 1,
        _ => parent.children.len(),
    };
    parent.children.insert(at, Node::Element(child));
    parent.children.insert(at, Node::Text(FIELD_INDENT.into()));
    true
}

/// Attach a one-line comment immediately before the entry at `index`
/// under the root, unless the text is blank or an identical comment
/// already exists anywhere in the document. Comment text is framed with
/// a single space on each side. Returns the entry's shifted index.
pub fn ensure_comment_before(root: &mut Element, index: usize, comment: &str) -> usize {
    if comment.trim().is_empty() {
        return index;
    }

    let framed = format!(" {comment} ");
    if comment_exists(root, &framed) {
        return index;
    }

    root.children.insert(index, Node::Comment(framed));
    root.children
        .insert(index + 1, Node::Text(ENTRY_INDENT.into()));
    index + 2
}

fn comment_exists(element: &Element, framed: &str) -> bool {
    element.children.iter().any(|node| match node {
        Node::Comment(text) => text == framed,
        Node::Element(el) => comment_exists(el, framed),
        Node::Text(_) => false,
    })
}
