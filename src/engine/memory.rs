//! In-memory inverted index with snapshot readers.
//!
//! Committed state lives in an immutable [`Snapshot`] behind an `Arc`. A
//! commit builds the next snapshot from the current one plus the staged
//! mutations and swaps it in, so readers holding the previous `Arc` keep their
//! view untouched.

use std::collections::BTreeSet;
use std::sync::Arc;

use ahash::AHashMap;
use parking_lot::{Mutex, RwLock};

use crate::analysis::{Analyzer, StandardAnalyzer};
use crate::data::{Document, EntityId};
use crate::engine::{EngineReader, IndexEngine, PostingIter};
use crate::error::Result;

/// Term postings of one field, each sorted by entity id.
type FieldPostings = AHashMap<String, BTreeSet<EntityId>>;

/// Committed index state at one generation.
#[derive(Debug, Clone, Default)]
struct Snapshot {
    generation: u64,
    documents: AHashMap<EntityId, Document>,
    postings: AHashMap<String, FieldPostings>,
}

impl Snapshot {
    fn remove(&mut self, id: EntityId, analyzer: &dyn Analyzer) {
        let Some(doc) = self.documents.remove(&id) else {
            return;
        };
        for (field, text) in &doc.fields {
            let Some(terms) = self.postings.get_mut(field) else {
                continue;
            };
            for term in analyzer.analyze(text) {
                if let Some(ids) = terms.get_mut(&term) {
                    ids.remove(&id);
                    if ids.is_empty() {
                        terms.remove(&term);
                    }
                }
            }
        }
    }

    fn replace(&mut self, doc: Document, analyzer: &dyn Analyzer) {
        self.remove(doc.id, analyzer);
        if doc.is_empty() {
            return;
        }
        for (field, text) in &doc.fields {
            let terms = self.postings.entry(field.clone()).or_default();
            for term in analyzer.analyze(text) {
                terms.entry(term).or_default().insert(doc.id);
            }
        }
        self.documents.insert(doc.id, doc);
    }
}

#[derive(Debug)]
enum StagedOp {
    Replace(Document),
    Delete(EntityId),
}

/// In-memory [`IndexEngine`].
///
/// Each commit clones the committed snapshot before applying staged
/// mutations, so commit cost grows with index size.
#[derive(Debug)]
pub struct MemoryEngine {
    analyzer: Arc<dyn Analyzer>,
    committed: RwLock<Arc<Snapshot>>,
    staged: Mutex<Vec<StagedOp>>,
}

impl MemoryEngine {
    /// Create an empty engine with the [`StandardAnalyzer`].
    pub fn new() -> Self {
        Self::with_analyzer(Arc::new(StandardAnalyzer::new()))
    }

    pub fn with_analyzer(analyzer: Arc<dyn Analyzer>) -> Self {
        Self {
            analyzer,
            committed: RwLock::new(Arc::new(Snapshot::default())),
            staged: Mutex::new(Vec::new()),
        }
    }

    /// Number of mutations staged since the last commit.
    pub fn pending_ops(&self) -> usize {
        self.staged.lock().len()
    }

    /// Generation of the latest commit.
    pub fn generation(&self) -> u64 {
        self.committed.read().generation
    }
}

impl Default for MemoryEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexEngine for MemoryEngine {
    fn add_or_replace_document(&self, doc: Document) -> Result<()> {
        self.staged.lock().push(StagedOp::Replace(doc));
        Ok(())
    }

    fn delete_document(&self, id: EntityId) -> Result<()> {
        self.staged.lock().push(StagedOp::Delete(id));
        Ok(())
    }

    fn commit(&self) -> Result<()> {
        let mut staged = self.staged.lock();
        if staged.is_empty() {
            return Ok(());
        }

        let mut next = Snapshot::clone(&self.committed.read());
        let ops = staged.len();
        for op in staged.drain(..) {
            match op {
                StagedOp::Replace(doc) => next.replace(doc, self.analyzer.as_ref()),
                StagedOp::Delete(id) => next.remove(id, self.analyzer.as_ref()),
            }
        }
        next.generation += 1;

        log::debug!(
            "memory engine committed generation {} ({} ops, {} docs)",
            next.generation,
            ops,
            next.documents.len()
        );
        *self.committed.write() = Arc::new(next);
        Ok(())
    }

    fn rollback(&self) -> Result<()> {
        let mut staged = self.staged.lock();
        if !staged.is_empty() {
            log::debug!("memory engine dropped {} staged ops", staged.len());
            staged.clear();
        }
        Ok(())
    }

    fn open_reader(&self) -> Result<Box<dyn EngineReader>> {
        Ok(Box::new(MemoryReader {
            snapshot: Arc::clone(&self.committed.read()),
            analyzer: Arc::clone(&self.analyzer),
        }))
    }
}

/// Point-in-time reader over one [`Snapshot`].
#[derive(Debug)]
pub struct MemoryReader {
    snapshot: Arc<Snapshot>,
    analyzer: Arc<dyn Analyzer>,
}

impl EngineReader for MemoryReader {
    fn term_query(&self, field: &str, term: &str) -> Result<PostingIter<'_>> {
        let Some(term) = self.analyzer.normalize_term(term) else {
            return Ok(Box::new(std::iter::empty()));
        };
        match self
            .snapshot
            .postings
            .get(field)
            .and_then(|terms| terms.get(&term))
        {
            Some(ids) => Ok(Box::new(ids.iter().copied())),
            None => Ok(Box::new(std::iter::empty())),
        }
    }

    fn document(&self, id: EntityId) -> Result<Option<Document>> {
        Ok(self.snapshot.documents.get(&id).cloned())
    }

    fn num_docs(&self) -> usize {
        self.snapshot.documents.len()
    }

    fn generation(&self) -> u64 {
        self.snapshot.generation
    }
}
