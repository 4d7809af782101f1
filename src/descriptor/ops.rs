//! Descriptor upsert operations
//!
//! Each operation validates its arguments, locates or creates the
//! target entry, populates fields behind the duplicate guard, and
//! optionally annotates the new entry with a comment. Re-running an
//! operation with identical inputs is a no-op; "already exists" is
//! never an error.

use tracing::debug;

use crate::descriptor::locate;
use crate::descriptor::mutate::{
    append_child_if_absent, ensure_comment_before, insert_entry, ENTRY_INDENT,
};
use crate::descriptor::order::{self, EntryKind};
use crate::error::{Error, ErrorKind, Result};
use crate::xml::model::{Document, Element, Node};

/// A requested descriptor change. Request-side only: never stored in
/// the document tree.
#[derive(Clone, Debug, PartialEq)]
pub enum DescriptorEntry {
    Servlet {
        name: String,
        class_name: String,
        url_mapping: String,
        load_on_startup: Option<i32>,
        comment: Option<String>,
    },
    ContextParam {
        name: String,
        value: String,
        comment: Option<String>,
    },
    EnvEntry {
        name: String,
        entry_type: String,
        value: String,
        comment: Option<String>,
    },
}

/// Apply one requested change to the document
pub fn apply(doc: &mut Document, entry: &DescriptorEntry) -> Result<()> {
    match entry {
        DescriptorEntry::Servlet {
            name,
            class_name,
            url_mapping,
            load_on_startup,
            comment,
        } => add_servlet(
            doc,
            name,
            class_name,
            url_mapping,
            *load_on_startup,
            comment.as_deref(),
        ),
        DescriptorEntry::ContextParam {
            name,
            value,
            comment,
        } => add_context_param(doc, name, value, comment.as_deref()),
        DescriptorEntry::EnvEntry {
            name,
            entry_type,
            value,
            comment,
        } => add_env_entry(doc, name, entry_type, value, comment.as_deref()),
    }
}

/// Add a `servlet` entry and its matching `servlet-mapping`, both
/// placed canonically. Every call creates a new pair; servlet names are
/// not deduplicated at this layer.
pub fn add_servlet(
    doc: &mut Document,
    name: &str,
    class_name: &str,
    url_mapping: &str,
    load_on_startup: Option<i32>,
    comment: Option<&str>,
) -> Result<()> {
    require("servlet name", name)?;
    require("servlet class", class_name)?;
    require("url mapping", url_mapping)?;

    let root = &mut doc.root;

    let mut servlet = new_entry("servlet");
    append_child_if_absent(&mut servlet, Element::text("servlet-name", name));
    append_child_if_absent(&mut servlet, Element::text("servlet-class", class_name));
    if let Some(load) = load_on_startup {
        append_child_if_absent(&mut servlet, Element::text("load-on-startup", load.to_string()));
    }

    let at = order::insertion_index(root, EntryKind::Servlet);
    let at = insert_entry(root, at, servlet);
    if let Some(text) = comment {
        ensure_comment_before(root, at, text);
    }

    let mut mapping = new_entry("servlet-mapping");
    append_child_if_absent(&mut mapping, Element::text("servlet-name", name));
    append_child_if_absent(&mut mapping, Element::text("url-pattern", url_mapping));

    let at = order::insertion_index(root, EntryKind::ServletMapping);
    insert_entry(root, at, mapping);

    debug!(servlet = name, class = class_name, "added servlet and mapping");
    Ok(())
}

/// Upsert a `context-param` keyed by `param-name`
pub fn add_context_param(
    doc: &mut Document,
    name: &str,
    value: &str,
    comment: Option<&str>,
) -> Result<()> {
    require("param name", name)?;
    require("param value", value)?;

    let root = &mut doc.root;
    match locate::entry_index(root, "context-param", "param-name", name) {
        Some(idx) => {
            debug!(param = name, "context-param already present");
            if let Some(entry) = root.element_at_mut(idx) {
                append_child_if_absent(entry, Element::text("param-value", value));
            }
        }
        None => {
            let mut entry = new_entry("context-param");
            append_child_if_absent(&mut entry, Element::text("param-name", name));
            append_child_if_absent(&mut entry, Element::text("param-value", value));

            let at = order::insertion_index(root, EntryKind::ContextParam);
            let at = insert_entry(root, at, entry);
            if let Some(text) = comment {
                ensure_comment_before(root, at, text);
            }
            debug!(param = name, "added context-param");
        }
    }
    Ok(())
}

/// Upsert an `env-entry` keyed by `env-entry-name`. New entries go
/// after the last `error-page`, or at the end of the root when none
/// exists.
pub fn add_env_entry(
    doc: &mut Document,
    name: &str,
    entry_type: &str,
    value: &str,
    comment: Option<&str>,
) -> Result<()> {
    require("env entry name", name)?;

    let root = &mut doc.root;
    match locate::entry_index(root, "env-entry", "env-entry-name", name) {
        Some(idx) => {
            debug!(entry = name, "env-entry already present");
            if let Some(entry) = root.element_at_mut(idx) {
                append_child_if_absent(entry, Element::text("env-entry-type", entry_type));
                append_child_if_absent(entry, Element::text("env-entry-value", value));
            }
        }
        None => {
            let mut entry = new_entry("env-entry");
            append_child_if_absent(&mut entry, Element::text("env-entry-name", name));
            append_child_if_absent(&mut entry, Element::text("env-entry-type", entry_type));
            append_child_if_absent(&mut entry, Element::text("env-entry-value", value));

            let at = order::env_entry_insertion_index(root);
            let at = insert_entry(root, at, entry);
            if let Some(text) = comment {
                ensure_comment_before(root, at, text);
            }
            debug!(entry = name, "added env-entry");
        }
    }
    Ok(())
}

/// Empty entry shell carrying its closing-tag indent
fn new_entry(name: &str) -> Element {
    let mut entry = Element::new(name);
    entry.children.push(Node::Text(ENTRY_INDENT.into()));
    entry
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::new(ErrorKind::InvalidArgument {
            field: field.into(),
        }));
    }
    Ok(())
}
