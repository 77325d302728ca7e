//! Historical match data
//!
//! CSV loading, the shared encoded dataset, and burn dataset plumbing for training.

pub mod dataset;
pub mod historical;
pub mod loader;

pub use dataset::{StatBatch, StatBatcher, StatDataset, StatSample};
pub use historical::HistoricalData;
pub use loader::{load_matches, DataSummary};
