#![forbid(unsafe_code)]

//! GraphML parser + in-memory graph model (headless).
//!
//! The entry point is [`build`] (or [`GraphBuilder`] when parse options are needed). A build
//! parses the whole document, resolves `<data key="...">` tokens through the document's
//! `<key>` declarations and returns an immutable [`GraphModel`]. Re-parsing a document produces
//! a fresh model; nothing is ever patched in place.

mod builder;
pub mod error;
pub mod keys;
pub mod model;

pub use builder::{GraphBuilder, build};
pub use error::{Error, Result};
pub use keys::AttributeKeyTable;
pub use model::{Attributes, EdgeRecord, GraphModel, NodeRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Accept documents carrying a `<!DOCTYPE ...>` declaration.
    ///
    /// On by default; [`ParseOptions::strict`] rejects them.
    pub allow_dtd: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::permissive()
    }
}

impl ParseOptions {
    pub fn strict() -> Self {
        Self { allow_dtd: false }
    }

    pub fn permissive() -> Self {
        Self { allow_dtd: true }
    }
}
