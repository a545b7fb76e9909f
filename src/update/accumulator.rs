//! Per-transaction buffer of net field-level changes.
//!
//! The accumulator folds every [`PropertyEvent`] of one unit of work into a
//! [`Batch`] holding, per entity, only the terminal state of each touched
//! field. Nothing leaves the accumulator until [`ChangeAccumulator::drain_for_commit`].

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::sync::Arc;

use ahash::AHashMap;

use crate::catalog::FieldCatalog;
use crate::data::EntityId;
use crate::error::{InsightError, Result};
use crate::update::event::PropertyEvent;

/// Terminal state of one field within a unit of work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldChange {
    Set(String),
    Unset,
}

/// Net effect of a unit of work on one entity.
///
/// Once `removed` is set the field changes are empty and stay empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingDocumentDelta {
    changes: AHashMap<String, FieldChange>,
    removed: bool,
}

impl PendingDocumentDelta {
    pub fn is_removed(&self) -> bool {
        self.removed
    }

    /// True when the delta carries neither a removal nor a field change.
    pub fn is_empty(&self) -> bool {
        !self.removed && self.changes.is_empty()
    }

    /// Terminal change for `field`, if the field was touched.
    pub fn change(&self, field: &str) -> Option<&FieldChange> {
        self.changes.get(field)
    }

    /// Fields being set, with their final text.
    pub fn set_fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.changes.iter().filter_map(|(field, change)| match change {
            FieldChange::Set(text) => Some((field.as_str(), text.as_str())),
            FieldChange::Unset => None,
        })
    }

    /// Fields being removed.
    pub fn unset_fields(&self) -> impl Iterator<Item = &str> {
        self.changes
            .iter()
            .filter(|(_, change)| **change == FieldChange::Unset)
            .map(|(field, _)| field.as_str())
    }

    fn record(&mut self, field: String, change: FieldChange) {
        self.changes.insert(field, change);
    }

    fn mark_removed(&mut self) {
        self.removed = true;
        self.changes.clear();
    }
}

/// Every pending delta of one unit of work, ordered by entity id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Batch {
    entries: BTreeMap<EntityId, PendingDocumentDelta>,
}

impl Batch {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, entity: EntityId) -> Option<&PendingDocumentDelta> {
        self.entries.get(&entity)
    }

    /// Entries in ascending entity order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &PendingDocumentDelta)> {
        self.entries.iter().map(|(id, delta)| (*id, delta))
    }
}

impl IntoIterator for Batch {
    type Item = (EntityId, PendingDocumentDelta);
    type IntoIter = btree_map::IntoIter<EntityId, PendingDocumentDelta>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Lifecycle phase of a [`ChangeAccumulator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No unit of work in flight.
    Idle,
    /// Events of the current unit of work are being collected.
    Accumulating,
    /// The batch was handed off; only `reset` or `discard` is valid.
    Drained,
}

/// Collects the [`Batch`] of one unit of work.
#[derive(Debug)]
pub struct ChangeAccumulator {
    catalog: Arc<FieldCatalog>,
    batch: Batch,
    phase: Phase,
}

impl ChangeAccumulator {
    pub fn new(catalog: Arc<FieldCatalog>) -> Self {
        Self {
            catalog,
            batch: Batch::default(),
            phase: Phase::Idle,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Number of entities with a pending delta.
    pub fn len(&self) -> usize {
        self.batch.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batch.is_empty()
    }

    /// Fold one event into the batch.
    ///
    /// Returns `Ok(false)` when the event was filtered: its field is not in the
    /// catalog, or the entity was already removed in this unit of work.
    pub fn observe(&mut self, event: PropertyEvent) -> Result<bool> {
        if self.phase == Phase::Drained {
            return Err(InsightError::invalid_operation(
                "event observed after the batch was drained; reset the accumulator first",
            ));
        }
        self.phase = Phase::Accumulating;

        let (entity, field, change) = match event {
            PropertyEvent::EntityRemoved { entity } => {
                self.batch.entries.entry(entity).or_default().mark_removed();
                return Ok(true);
            }
            PropertyEvent::Set {
                entity,
                field,
                text,
            } => (entity, field, FieldChange::Set(text)),
            PropertyEvent::Unset { entity, field } => (entity, field, FieldChange::Unset),
        };

        if !self.catalog.contains(&field) {
            log::trace!("ignoring change to untracked field '{field}' on entity {entity}");
            return Ok(false);
        }

        let delta = self.batch.entries.entry(entity).or_default();
        if delta.is_removed() {
            log::trace!("ignoring change to '{field}' on entity {entity} removed earlier");
            return Ok(false);
        }
        delta.record(field, change);
        Ok(true)
    }

    /// Hand off the batch and leave the accumulator empty.
    ///
    /// Fails with [`InsightError::DoubleDrain`] if the batch of this unit of
    /// work was already drained.
    pub fn drain_for_commit(&mut self) -> Result<Batch> {
        if self.phase == Phase::Drained {
            return Err(InsightError::DoubleDrain);
        }
        self.phase = Phase::Drained;
        Ok(std::mem::take(&mut self.batch))
    }

    /// Drop every pending delta without producing effects.
    ///
    /// Returns the number of entities whose changes were dropped.
    pub fn discard(&mut self) -> usize {
        let dropped = self.batch.len();
        self.batch = Batch::default();
        self.phase = Phase::Idle;
        dropped
    }

    /// Return to `Idle` after a drained batch was handled.
    pub fn reset(&mut self) {
        self.discard();
    }
}
