//! Mapping from a pending delta to the engine call that reproduces it.
//!
//! Engine replacement is whole-document, so a partial change is merged
//! against the entity's prior document before it is written.

use crate::data::{Document, EntityId};
use crate::update::accumulator::PendingDocumentDelta;

/// Engine operation derived for one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// Write the full resulting document.
    Replace(Document),
    /// Remove the entity's document.
    Delete(EntityId),
    /// The indexed state does not change.
    Skip,
}

/// Derive the mutation for `entity` from its delta and its prior document.
///
/// `prior` is the committed document before this unit of work; it is only
/// consulted when the entity was not removed.
pub fn project(
    entity: EntityId,
    delta: &PendingDocumentDelta,
    prior: Option<&Document>,
) -> Mutation {
    if delta.is_removed() {
        return Mutation::Delete(entity);
    }
    if delta.is_empty() {
        return Mutation::Skip;
    }

    let mut next = prior
        .cloned()
        .unwrap_or_else(|| Document::new(entity));
    next.id = entity;

    for (field, text) in delta.set_fields() {
        next.set_text(field, text);
    }
    for field in delta.unset_fields() {
        next.remove(field);
    }

    if next.is_empty() {
        return match prior {
            Some(_) => Mutation::Delete(entity),
            None => Mutation::Skip,
        };
    }
    if prior == Some(&next) {
        return Mutation::Skip;
    }
    Mutation::Replace(next)
}

/// Whether a delta needs the prior document to be projected.
pub fn needs_prior(delta: &PendingDocumentDelta) -> bool {
    !delta.is_removed() && !delta.is_empty()
}
