//! I/O layer for reading grains.
//! Provides the `GrainSource` trait, a JSON-lines file reader, and an
//! in-memory source.
pub mod grains;
pub use grains::{GrainSource, JsonLinesSource, VecSource};
