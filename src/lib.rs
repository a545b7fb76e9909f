//! # Insight
//!
//! Transactional full-text indexing of graph node properties.
//!
//! An [`InsightIndex`] tracks a fixed, ordered set of property keys. Property
//! changes of one unit of work are accumulated by an [`Updater`] and reach the
//! index in a single commit when the unit of work succeeds; aborted units of
//! work leave no trace. An [`IndexReader`] answers queries whose terms bind to
//! the tracked fields by position, returning matching entity ids ascending and
//! without duplicates.
//!
//! ```
//! use insight::{IndexConfig, InsightIndex};
//!
//! let index = InsightIndex::open(IndexConfig::builder().add_field("prop").build())?;
//!
//! let mut updater = index.updater();
//! let mut uow = updater.begin();
//! uow.set(1, "prop", "Hello. Hello again.")?;
//! uow.set(2, "prop", "a zebra hybrid")?;
//! uow.commit()?;
//!
//! let reader = index.reader()?;
//! assert_eq!(reader.query(&["hello"])?.collect::<Vec<_>>(), vec![1]);
//! # Ok::<(), insight::InsightError>(())
//! ```

pub mod analysis;
pub mod catalog;
mod data;
pub mod engine;
mod error;
mod index;
pub mod search;
pub mod update;

pub use catalog::FieldCatalog;
pub use data::{Document, EntityId};
pub use engine::{EngineReader, IndexEngine, MemoryEngine};
pub use error::{InsightError, Result};
pub use index::InsightIndex;
pub use index::config::{IndexConfig, IndexConfigBuilder};
pub use search::{IndexReader, QueryResult};
pub use update::{
    ApplyStats, PropertyEvent, TransactionEvent, TransactionEventHandler, UnitOfWork, Updater,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
