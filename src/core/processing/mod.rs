//! The default staged processor and its stages.
pub mod audit;
pub mod pipeline;
pub mod threshold;
pub mod validate;

pub use audit::{Auditor, CountAudit, NoAudit};
pub use pipeline::StagedProcessor;
pub use threshold::FailureTally;
pub use validate::{GrainValidator, RequiredFieldsValidator};
