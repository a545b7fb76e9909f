//! Transactional index maintenance.
//!
//! Property events of one unit of work flow through the
//! [`ChangeAccumulator`](accumulator::ChangeAccumulator) into a
//! [`Batch`](accumulator::Batch). On success the
//! [`IndexWriter`](writer::IndexWriter) projects each entry onto whole-document
//! engine calls and commits them once; on abort the batch is dropped.

pub mod accumulator;
pub mod event;
pub mod projection;
pub mod updater;
pub mod writer;

pub use accumulator::{Batch, ChangeAccumulator, FieldChange, PendingDocumentDelta, Phase};
pub use event::{PropertyEvent, TransactionEvent};
pub use projection::Mutation;
pub use updater::{TransactionEventHandler, UnitOfWork, Updater};
pub use writer::{ApplyStats, IndexWriter};
