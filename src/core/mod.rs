//! Core processing building blocks: settings, the `Processor` seam, and the
//! staged pipeline (validation, failure threshold, audit). These are the
//! primitives consumed by the high-level `api` module.
pub mod processing;
pub mod processor;
pub mod settings;
