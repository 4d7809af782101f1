//! Read-transform-write orchestration
//!
//! One call = one blocking cycle against the descriptor file: verify it
//! exists, read and parse it, apply a single mutation in memory, then
//! hand the serialized result to the store for atomic replacement.
//! Validation and parsing both happen before any mutation, so a failed
//! call never writes anything.

use std::path::Path;

use tracing::{debug, instrument};

use crate::descriptor::ops::{self, DescriptorEntry};
use crate::error::{Error, ErrorKind, Result};
use crate::store::{DescriptorStore, FileStore};
use crate::xml::model::Document;
use crate::xml::parser::Parser;
use crate::xml::writer::write_document;

/// Descriptor mutation engine bound to an injected store
#[derive(Clone, Debug)]
pub struct Engine<S = FileStore> {
    store: S,
}

impl Engine<FileStore> {
    pub const fn new() -> Self {
        Self { store: FileStore }
    }
}

impl Default for Engine<FileStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: DescriptorStore> Engine<S> {
    pub const fn with_store(store: S) -> Self {
        Self { store }
    }

    /// Apply one requested change to the descriptor at `path` and
    /// persist the result. Returns the mutated document.
    #[instrument(skip(self, entry))]
    pub fn apply(&self, path: &Path, entry: &DescriptorEntry) -> Result<Document> {
        let mut doc = self.load(path)?;
        ops::apply(&mut doc, entry)?;
        self.store.replace(path, &write_document(&doc))?;
        debug!("descriptor updated");
        Ok(doc)
    }

    pub fn add_servlet(
        &self,
        path: &Path,
        name: &str,
        class_name: &str,
        url_mapping: &str,
        load_on_startup: Option<i32>,
        comment: Option<&str>,
    ) -> Result<Document> {
        self.apply(
            path,
            &DescriptorEntry::Servlet {
                name: name.into(),
                class_name: class_name.into(),
                url_mapping: url_mapping.into(),
                load_on_startup,
                comment: comment.map(Into::into),
            },
        )
    }

    pub fn add_context_param(
        &self,
        path: &Path,
        name: &str,
        value: &str,
        comment: Option<&str>,
    ) -> Result<Document> {
        self.apply(
            path,
            &DescriptorEntry::ContextParam {
                name: name.into(),
                value: value.into(),
                comment: comment.map(Into::into),
            },
        )
    }

    pub fn add_env_entry(
        &self,
        path: &Path,
        name: &str,
        entry_type: &str,
        value: &str,
        comment: Option<&str>,
    ) -> Result<Document> {
        self.apply(
            path,
            &DescriptorEntry::EnvEntry {
                name: name.into(),
                entry_type: entry_type.into(),
                value: value.into(),
                comment: comment.map(Into::into),
            },
        )
    }

    fn load(&self, path: &Path) -> Result<Document> {
        if !self.store.exists(path) {
            return Err(Error::new(ErrorKind::DescriptorNotFound {
                path: path.display().to_string(),
            }));
        }
        let content = self.store.read(path)?;
        Parser::new(content.as_bytes()).parse()
    }
}
