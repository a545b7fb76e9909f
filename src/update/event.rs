//! Property events observed during a unit of work.

use crate::data::EntityId;

/// A change to one entity, as seen by the change accumulator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyEvent {
    /// A field was created or its value replaced.
    Set {
        entity: EntityId,
        field: String,
        text: String,
    },
    /// A field was removed while the entity persists.
    Unset { entity: EntityId, field: String },
    /// The entity and all its fields were removed.
    EntityRemoved { entity: EntityId },
}

impl PropertyEvent {
    pub fn set(entity: EntityId, field: impl Into<String>, text: impl Into<String>) -> Self {
        PropertyEvent::Set {
            entity,
            field: field.into(),
            text: text.into(),
        }
    }

    pub fn unset(entity: EntityId, field: impl Into<String>) -> Self {
        PropertyEvent::Unset {
            entity,
            field: field.into(),
        }
    }

    pub fn removed(entity: EntityId) -> Self {
        PropertyEvent::EntityRemoved { entity }
    }

    pub fn entity(&self) -> EntityId {
        match self {
            PropertyEvent::Set { entity, .. }
            | PropertyEvent::Unset { entity, .. }
            | PropertyEvent::EntityRemoved { entity } => *entity,
        }
    }

    /// The field touched, or `None` for entity removal.
    pub fn field(&self) -> Option<&str> {
        match self {
            PropertyEvent::Set { field, .. } | PropertyEvent::Unset { field, .. } => Some(field),
            PropertyEvent::EntityRemoved { .. } => None,
        }
    }
}

/// A notification delivered by the host store's transaction machinery.
///
/// Zero or more property notifications are followed by exactly one
/// `Completed` per unit of work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionEvent {
    PropertyCreated {
        entity: EntityId,
        key: String,
        value: String,
    },
    PropertyChanged {
        entity: EntityId,
        key: String,
        value: String,
    },
    PropertyRemoved {
        entity: EntityId,
        key: String,
    },
    EntityDeleted {
        entity: EntityId,
    },
    Completed {
        success: bool,
    },
}

impl TransactionEvent {
    /// The property event carried by this notification, if any.
    pub fn into_property_event(self) -> Option<PropertyEvent> {
        match self {
            TransactionEvent::PropertyCreated { entity, key, value }
            | TransactionEvent::PropertyChanged { entity, key, value } => {
                Some(PropertyEvent::Set {
                    entity,
                    field: key,
                    text: value,
                })
            }
            TransactionEvent::PropertyRemoved { entity, key } => {
                Some(PropertyEvent::Unset { entity, field: key })
            }
            TransactionEvent::EntityDeleted { entity } => {
                Some(PropertyEvent::EntityRemoved { entity })
            }
            TransactionEvent::Completed { .. } => None,
        }
    }
}
