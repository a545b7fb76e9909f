//! Scoped point-in-time reader and its query results.

use std::iter::Peekable;
use std::sync::Arc;

use crate::catalog::FieldCatalog;
use crate::data::{Document, EntityId};
use crate::engine::EngineReader;
use crate::error::{InsightError, Result};
use crate::search::merge::UnionMerger;

/// Read handle over one snapshot of the index.
///
/// The engine snapshot is held until [`IndexReader::close`] is called or the
/// reader is dropped. Any use after `close` fails with
/// [`InsightError::ReaderClosed`].
#[derive(Debug)]
pub struct IndexReader {
    catalog: Arc<FieldCatalog>,
    inner: Option<Box<dyn EngineReader>>,
}

impl IndexReader {
    pub(crate) fn new(catalog: Arc<FieldCatalog>, inner: Box<dyn EngineReader>) -> Self {
        log::debug!("opened index reader at generation {}", inner.generation());
        Self {
            catalog,
            inner: Some(inner),
        }
    }

    fn engine_reader(&self) -> Result<&dyn EngineReader> {
        self.inner.as_deref().ok_or(InsightError::ReaderClosed)
    }

    /// Entities matching any of `terms`.
    ///
    /// The term at position `i` is looked up in the catalog field at position
    /// `i`; fields past the last term are not queried. The result is strictly
    /// ascending by entity id and contains each entity once. No terms yields
    /// an empty result.
    pub fn query<S: AsRef<str>>(&self, terms: &[S]) -> Result<QueryResult<'_>> {
        let reader = self.engine_reader()?;
        if terms.len() > self.catalog.len() {
            return Err(InsightError::invalid_argument(format!(
                "query has {} terms but the index tracks only {} fields",
                terms.len(),
                self.catalog.len()
            )));
        }

        let mut sources = Vec::with_capacity(terms.len());
        for (field, term) in self.catalog.iter().zip(terms) {
            sources.push(reader.term_query(field, term.as_ref())?);
        }
        Ok(QueryResult::new(UnionMerger::new(sources)))
    }

    /// Entities whose `field` contains `term`.
    pub fn query_field(&self, field: &str, term: &str) -> Result<QueryResult<'_>> {
        let reader = self.engine_reader()?;
        if !self.catalog.contains(field) {
            return Err(InsightError::invalid_argument(format!(
                "field '{field}' is not indexed"
            )));
        }
        let postings = reader.term_query(field, term)?;
        Ok(QueryResult::new(UnionMerger::new(vec![postings])))
    }

    /// Indexed fields of an entity, if it has any.
    pub fn document(&self, id: EntityId) -> Result<Option<Document>> {
        self.engine_reader()?.document(id)
    }

    pub fn num_docs(&self) -> Result<usize> {
        Ok(self.engine_reader()?.num_docs())
    }

    /// Commit generation this reader observes.
    pub fn generation(&self) -> Result<u64> {
        Ok(self.engine_reader()?.generation())
    }

    pub fn catalog(&self) -> &FieldCatalog {
        &self.catalog
    }

    /// Release the snapshot. Closing twice is a no-op.
    pub fn close(&mut self) {
        if let Some(inner) = self.inner.take() {
            log::debug!("closed index reader at generation {}", inner.generation());
        }
    }

    pub fn is_closed(&self) -> bool {
        self.inner.is_none()
    }
}

/// Lazily merged, single-pass stream of matching entity ids.
///
/// Borrows its reader, so the snapshot stays alive while the result is used.
#[derive(Debug)]
pub struct QueryResult<'a> {
    merger: Peekable<UnionMerger<'a>>,
}

impl<'a> QueryResult<'a> {
    fn new(merger: UnionMerger<'a>) -> Self {
        Self {
            merger: merger.peekable(),
        }
    }

    /// Whether another id remains.
    pub fn has_next(&mut self) -> bool {
        self.merger.peek().is_some()
    }

    /// Next id without consuming it.
    pub fn peek(&mut self) -> Option<EntityId> {
        self.merger.peek().copied()
    }
}

impl Iterator for QueryResult<'_> {
    type Item = EntityId;

    fn next(&mut self) -> Option<EntityId> {
        self.merger.next()
    }
}
