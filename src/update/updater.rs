//! Unit-of-work state machine driven by host transaction events.
//!
//! ```text
//! Idle ──observe──▶ Accumulating ──Completed(true)──▶ Committing ──▶ Idle
//!                         │
//!                         └──────Completed(false)───▶ Discarding ──▶ Idle
//! ```

use std::sync::Arc;

use crate::data::EntityId;
use crate::error::Result;
use crate::update::accumulator::{ChangeAccumulator, Phase};
use crate::update::event::{PropertyEvent, TransactionEvent};
use crate::update::writer::{ApplyStats, IndexWriter};

/// Subscriber side of the host's transaction notifications.
pub trait TransactionEventHandler {
    /// Handle one notification. `Completed` ends the unit of work.
    fn on_event(&mut self, event: TransactionEvent) -> Result<()>;
}

/// Keeps the index in step with the host's units of work.
///
/// Obtain one from [`InsightIndex::updater`](crate::InsightIndex::updater).
/// The updater owns its pending batch; events of one unit of work must be
/// delivered serially to the same updater.
#[derive(Debug)]
pub struct Updater {
    accumulator: ChangeAccumulator,
    writer: Arc<IndexWriter>,
}

impl Updater {
    pub(crate) fn new(accumulator: ChangeAccumulator, writer: Arc<IndexWriter>) -> Self {
        Self {
            accumulator,
            writer,
        }
    }

    pub fn phase(&self) -> Phase {
        self.accumulator.phase()
    }

    /// Number of entities with pending changes.
    pub fn pending(&self) -> usize {
        self.accumulator.len()
    }

    /// Record a property event of the current unit of work.
    ///
    /// Returns `Ok(false)` when the event does not affect the index.
    pub fn observe(&mut self, event: PropertyEvent) -> Result<bool> {
        self.accumulator.observe(event)
    }

    /// Dispatch one host notification.
    ///
    /// Returns the commit summary when the notification completed a unit of
    /// work successfully.
    pub fn handle(&mut self, event: TransactionEvent) -> Result<Option<ApplyStats>> {
        match event {
            TransactionEvent::Completed { success } => self.complete(success),
            other => {
                if let Some(event) = other.into_property_event() {
                    self.observe(event)?;
                }
                Ok(None)
            }
        }
    }

    /// End the current unit of work.
    ///
    /// On success the batch is applied and committed; on failure it is
    /// discarded untouched. Either way the updater returns to `Idle`, also
    /// when applying the batch fails.
    pub fn complete(&mut self, success: bool) -> Result<Option<ApplyStats>> {
        if !success {
            let dropped = self.accumulator.discard();
            log::debug!("unit of work aborted, discarded changes for {dropped} entities");
            return Ok(None);
        }

        let batch = match self.accumulator.drain_for_commit() {
            Ok(batch) => batch,
            Err(err) => {
                self.accumulator.discard();
                return Err(err);
            }
        };
        let result = self.writer.apply(batch);
        self.accumulator.reset();
        result.map(Some)
    }

    /// Start a scoped unit of work.
    ///
    /// The returned guard discards its changes when dropped without
    /// [`UnitOfWork::commit`].
    pub fn begin(&mut self) -> UnitOfWork<'_> {
        UnitOfWork {
            updater: self,
            finished: false,
        }
    }
}

impl TransactionEventHandler for Updater {
    fn on_event(&mut self, event: TransactionEvent) -> Result<()> {
        self.handle(event).map(|_| ())
    }
}

/// A unit of work bound to an [`Updater`].
#[derive(Debug)]
#[must_use = "a unit of work discards its changes unless committed"]
pub struct UnitOfWork<'a> {
    updater: &'a mut Updater,
    finished: bool,
}

impl UnitOfWork<'_> {
    pub fn observe(&mut self, event: PropertyEvent) -> Result<bool> {
        self.updater.observe(event)
    }

    pub fn set(
        &mut self,
        entity: EntityId,
        field: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<bool> {
        self.observe(PropertyEvent::set(entity, field, text))
    }

    pub fn unset(&mut self, entity: EntityId, field: impl Into<String>) -> Result<bool> {
        self.observe(PropertyEvent::unset(entity, field))
    }

    pub fn remove_entity(&mut self, entity: EntityId) -> Result<bool> {
        self.observe(PropertyEvent::removed(entity))
    }

    /// Apply and commit the changes of this unit of work.
    pub fn commit(mut self) -> Result<ApplyStats> {
        self.finished = true;
        self.updater
            .complete(true)
            .map(|stats| stats.unwrap_or_default())
    }

    /// Discard the changes of this unit of work.
    pub fn rollback(mut self) {
        self.finished = true;
        self.updater.accumulator.discard();
    }
}

impl Drop for UnitOfWork<'_> {
    fn drop(&mut self) {
        if !self.finished {
            let dropped = self.updater.accumulator.discard();
            log::debug!("unit of work dropped uncommitted, discarded {dropped} entities");
        }
    }
}
