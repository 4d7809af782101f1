//! webxml - idempotent, structure-preserving editor for web
//! application deployment descriptors
//!
//! Repeated identical requests converge to a single entry instead of
//! accumulating duplicates; unrelated elements, comments, and existing
//! formatting are preserved.
//!
//! # Quick Start
//!
//! ```
//! use webxml::{descriptor, parse_str, write_document};
//! # fn main() -> Result<(), webxml::Error> {
//! let mut doc = parse_str("<web-app></web-app>")?;
//! descriptor::add_env_entry(&mut doc, "mailHost", "java.lang.String", "smtp.example.com", None)?;
//! descriptor::add_env_entry(&mut doc, "mailHost", "java.lang.String", "smtp.example.com", None)?;
//! let out = write_document(&doc);
//! assert_eq!(out.matches("<env-entry>").count(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! File-backed callers go through [`Engine`], which reads, mutates, and
//! atomically replaces the descriptor in one call.

#![forbid(unsafe_code)]

pub mod error;
pub use error::{Error, ErrorKind, Pos, Result};

pub mod xml;
pub use xml::{write_document, Document, Element, Node, Parser};

pub mod descriptor;
pub use descriptor::{DescriptorEntry, EntryKind};

pub mod store;
pub use store::{DescriptorStore, FileStore};

pub mod engine;
pub use engine::Engine;

/// Parse a descriptor from a string
pub fn parse_str(s: &str) -> Result<Document> {
    let mut parser = Parser::new(s.as_bytes());
    parser.parse()
}

/// Parse a descriptor from bytes
pub fn parse_bytes(bytes: &[u8]) -> Result<Document> {
    let mut parser = Parser::new(bytes);
    parser.parse()
}
