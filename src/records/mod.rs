//! Records Module
//!
//! Collaborators that hold result history and persisted predictions.

mod sink;
mod source;

pub use sink::{MemoryPredictionLog, PredictionSink};
pub use source::{MemoryResultStore, ResultSource, SeedResult};
