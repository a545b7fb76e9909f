//! Multi-field queries over a point-in-time reader.

pub mod merge;
pub mod reader;

pub use merge::UnionMerger;
pub use reader::{IndexReader, QueryResult};
