//! The index handle wiring the core to an engine.

pub mod config;

use std::sync::Arc;

use crate::catalog::FieldCatalog;
use crate::engine::{IndexEngine, MemoryEngine};
use crate::error::Result;
use crate::search::reader::IndexReader;
use crate::update::accumulator::ChangeAccumulator;
use crate::update::updater::Updater;
use crate::update::writer::IndexWriter;

use self::config::IndexConfig;

/// A full-text index over a fixed set of entity properties.
///
/// The handle is cheap to share behind an `Arc`: updaters and readers each
/// hold their own state and only share the engine.
#[derive(Debug)]
pub struct InsightIndex {
    catalog: Arc<FieldCatalog>,
    engine: Arc<dyn IndexEngine>,
    writer: Arc<IndexWriter>,
}

impl InsightIndex {
    /// Open an index backed by the bundled [`MemoryEngine`].
    pub fn open(config: IndexConfig) -> Result<Self> {
        let catalog = config.catalog()?;
        let analyzer = config.analyzer.build();
        log::info!(
            "opening insight index over fields {:?} with {} analyzer",
            catalog.as_slice(),
            analyzer.name()
        );
        let engine = Arc::new(MemoryEngine::with_analyzer(analyzer));
        Ok(Self::with_engine(catalog, engine))
    }

    /// Wire the core to an existing engine.
    pub fn with_engine(catalog: FieldCatalog, engine: Arc<dyn IndexEngine>) -> Self {
        let writer = Arc::new(IndexWriter::new(Arc::clone(&engine)));
        Self {
            catalog: Arc::new(catalog),
            engine,
            writer,
        }
    }

    pub fn catalog(&self) -> &FieldCatalog {
        &self.catalog
    }

    pub fn engine(&self) -> &Arc<dyn IndexEngine> {
        &self.engine
    }

    /// A new updater for the host's transaction events.
    pub fn updater(&self) -> Updater {
        Updater::new(
            ChangeAccumulator::new(Arc::clone(&self.catalog)),
            Arc::clone(&self.writer),
        )
    }

    /// Open a reader on the latest committed state.
    pub fn reader(&self) -> Result<IndexReader> {
        Ok(IndexReader::new(
            Arc::clone(&self.catalog),
            self.engine.open_reader()?,
        ))
    }

    /// Run `f` with a fresh reader, releasing it afterwards on every path.
    pub fn with_reader<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&IndexReader) -> Result<T>,
    {
        let reader = self.reader()?;
        f(&reader)
    }
}
