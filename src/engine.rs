//! Interface to the inverted-index engine the core drives.
//!
//! The core never looks inside the engine. It issues whole-document
//! replacements and deletions, a single commit per unit of work, and term
//! lookups against point-in-time readers. [`MemoryEngine`] is the bundled
//! implementation; any other engine plugs in through [`IndexEngine`].
//!
//! # Contract
//!
//! - Mutations are staged until [`IndexEngine::commit`] and are invisible to
//!   readers opened before the commit returns.
//! - [`IndexEngine::rollback`] drops every staged mutation.
//! - [`EngineReader::term_query`] yields entity ids strictly ascending with no
//!   duplicates.
//! - A reader's view is fixed when it is opened.

pub mod memory;

use std::fmt::Debug;

use crate::data::{Document, EntityId};
use crate::error::Result;

pub use memory::MemoryEngine;

/// Ascending, duplicate-free stream of entity ids produced by a term lookup.
pub type PostingIter<'a> = Box<dyn Iterator<Item = EntityId> + Send + 'a>;

/// Write side of an index engine.
///
/// The write path is single-writer; callers serialize access.
pub trait IndexEngine: Send + Sync + Debug {
    /// Stage a whole-document replacement. A document with no fields must be
    /// treated as a deletion.
    fn add_or_replace_document(&self, doc: Document) -> Result<()>;

    /// Stage removal of a document. Removing an absent document is a no-op.
    fn delete_document(&self, id: EntityId) -> Result<()>;

    /// Make every staged mutation visible atomically.
    fn commit(&self) -> Result<()>;

    /// Drop every staged mutation.
    fn rollback(&self) -> Result<()>;

    /// Open a point-in-time view of the committed index.
    fn open_reader(&self) -> Result<Box<dyn EngineReader>>;
}

/// Read side of an index engine, fixed at open time.
pub trait EngineReader: Send + Sync + Debug {
    /// Entities whose `field` contains `term`.
    fn term_query(&self, field: &str, term: &str) -> Result<PostingIter<'_>>;

    /// Stored fields of a committed document.
    fn document(&self, id: EntityId) -> Result<Option<Document>>;

    /// Number of documents visible to this reader.
    fn num_docs(&self) -> usize;

    /// Commit generation this reader observes.
    fn generation(&self) -> u64;
}
