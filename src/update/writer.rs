//! Applies one drained batch to the engine as a single commit.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::engine::{EngineReader, IndexEngine};
use crate::error::Result;
use crate::update::accumulator::Batch;
use crate::update::projection::{Mutation, needs_prior, project};

/// What one applied batch did to the index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyStats {
    /// Documents added or replaced.
    pub replaced: usize,
    /// Documents deleted.
    pub deleted: usize,
    /// Entities whose indexed state did not change.
    pub skipped: usize,
}

impl ApplyStats {
    /// Number of engine mutations issued.
    pub fn mutations(&self) -> usize {
        self.replaced + self.deleted
    }
}

/// Index writer adapter.
///
/// Every entry of a batch is staged in the engine and then made visible with
/// exactly one commit. If any mutation or the commit fails, staged work is
/// rolled back and the error is returned; the batch is never retried here.
///
/// Atomicity towards readers is as strong as the engine's commit. An engine
/// that cannot commit several documents atomically exposes partial batches.
#[derive(Debug)]
pub struct IndexWriter {
    engine: Arc<dyn IndexEngine>,
    write_lock: Mutex<()>,
}

impl IndexWriter {
    pub fn new(engine: Arc<dyn IndexEngine>) -> Self {
        Self {
            engine,
            write_lock: Mutex::new(()),
        }
    }

    /// Apply `batch` and commit it.
    pub fn apply(&self, batch: Batch) -> Result<ApplyStats> {
        let _guard = self.write_lock.lock();
        if batch.is_empty() {
            return Ok(ApplyStats::default());
        }

        let entities = batch.len();
        let prior = if batch.iter().any(|(_, delta)| needs_prior(delta)) {
            Some(self.engine.open_reader()?)
        } else {
            None
        };

        let mut stats = ApplyStats::default();
        let result = self
            .stage(batch, prior.as_deref(), &mut stats)
            .and_then(|()| self.engine.commit());
        drop(prior);

        match result {
            Ok(()) => {
                log::info!(
                    "committed index batch of {entities} entities: {} replaced, {} deleted, {} unchanged",
                    stats.replaced,
                    stats.deleted,
                    stats.skipped
                );
                Ok(stats)
            }
            Err(err) => {
                log::warn!("index batch of {entities} entities failed, rolling back: {err}");
                if let Err(rollback_err) = self.engine.rollback() {
                    log::warn!("rollback after failed batch also failed: {rollback_err}");
                }
                Err(err)
            }
        }
    }

    fn stage(
        &self,
        batch: Batch,
        prior: Option<&dyn EngineReader>,
        stats: &mut ApplyStats,
    ) -> Result<()> {
        for (entity, delta) in batch {
            let previous = match prior {
                Some(reader) if needs_prior(&delta) => reader.document(entity)?,
                _ => None,
            };

            match project(entity, &delta, previous.as_ref()) {
                Mutation::Replace(doc) => {
                    log::debug!("replacing document {entity} ({} fields)", doc.len());
                    self.engine.add_or_replace_document(doc)?;
                    stats.replaced += 1;
                }
                Mutation::Delete(id) => {
                    log::debug!("deleting document {id}");
                    self.engine.delete_document(id)?;
                    stats.deleted += 1;
                }
                Mutation::Skip => stats.skipped += 1,
            }
        }
        Ok(())
    }
}
