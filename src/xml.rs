//! XML document layer: model, parser, writer

pub mod cursor;
pub mod model;
pub mod parser;
pub mod writer;

pub use model::{Document, Element, Node};
pub use parser::Parser;
pub use writer::write_document;
