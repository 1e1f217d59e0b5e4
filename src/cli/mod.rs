//! Command Line Interface (CLI) layer for grainpipe.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the orchestration logic (`runner`) for the `process` and
//! `show-config` commands. It wires user-provided options to the library
//! functionality exposed via `grainpipe::api`.
//!
//! If you are embedding grainpipe into another application, prefer the
//! `grainpipe::api` module instead of calling the CLI code.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
