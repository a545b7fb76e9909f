#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use insight::{
    Document, EngineReader, EntityId, IndexEngine, InsightError, InsightIndex, MemoryEngine,
    Result, TransactionEvent, Updater,
};

/// Memory engine that fails on demand.
#[derive(Debug, Default)]
pub struct FlakyEngine {
    inner: MemoryEngine,
    fail_commit: AtomicBool,
    fail_replace: AtomicBool,
    commits: AtomicUsize,
    rollbacks: AtomicUsize,
}

impl FlakyEngine {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn fail_commit(&self, fail: bool) {
        self.fail_commit.store(fail, Ordering::SeqCst);
    }

    pub fn fail_replace(&self, fail: bool) {
        self.fail_replace.store(fail, Ordering::SeqCst);
    }

    pub fn commits(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }

    pub fn rollbacks(&self) -> usize {
        self.rollbacks.load(Ordering::SeqCst)
    }

    pub fn pending_ops(&self) -> usize {
        self.inner.pending_ops()
    }
}

impl IndexEngine for FlakyEngine {
    fn add_or_replace_document(&self, doc: Document) -> Result<()> {
        if self.fail_replace.load(Ordering::SeqCst) {
            return Err(InsightError::engine(format!(
                "injected failure replacing document {}",
                doc.id
            )));
        }
        self.inner.add_or_replace_document(doc)
    }

    fn delete_document(&self, id: EntityId) -> Result<()> {
        self.inner.delete_document(id)
    }

    fn commit(&self) -> Result<()> {
        if self.fail_commit.load(Ordering::SeqCst) {
            return Err(InsightError::engine("injected commit failure"));
        }
        self.commits.fetch_add(1, Ordering::SeqCst);
        self.inner.commit()
    }

    fn rollback(&self) -> Result<()> {
        self.rollbacks.fetch_add(1, Ordering::SeqCst);
        self.inner.rollback()
    }

    fn open_reader(&self) -> Result<Box<dyn EngineReader>> {
        self.inner.open_reader()
    }
}

/// Minimal host store: hands out node ids and replays each transaction's
/// property notifications to an updater when the transaction closes.
pub struct Graph {
    next_id: EntityId,
    updater: Updater,
}

impl Graph {
    pub fn new(index: &InsightIndex) -> Self {
        Self {
            next_id: 0,
            updater: index.updater(),
        }
    }

    pub fn begin_tx(&mut self) -> Tx<'_> {
        Tx {
            graph: self,
            events: Vec::new(),
            success: false,
        }
    }
}

pub struct Tx<'a> {
    graph: &'a mut Graph,
    events: Vec<TransactionEvent>,
    success: bool,
}

impl Tx<'_> {
    pub fn create_node(&mut self) -> EntityId {
        let id = self.graph.next_id;
        self.graph.next_id += 1;
        id
    }

    pub fn set_property(&mut self, node: EntityId, key: &str, value: &str) {
        self.events.push(TransactionEvent::PropertyChanged {
            entity: node,
            key: key.to_string(),
            value: value.to_string(),
        });
    }

    pub fn remove_property(&mut self, node: EntityId, key: &str) {
        self.events.push(TransactionEvent::PropertyRemoved {
            entity: node,
            key: key.to_string(),
        });
    }

    pub fn delete_node(&mut self, node: EntityId) {
        self.events
            .push(TransactionEvent::EntityDeleted { entity: node });
    }

    pub fn success(&mut self) {
        self.success = true;
    }

    /// Deliver the notifications followed by the completion signal.
    pub fn close(self) -> Result<()> {
        let Tx {
            graph,
            events,
            success,
        } = self;
        for event in events {
            graph.updater.handle(event)?;
        }
        graph.updater.handle(TransactionEvent::Completed { success })?;
        Ok(())
    }
}

pub fn ids(result: insight::QueryResult<'_>) -> Vec<EntityId> {
    result.collect()
}
