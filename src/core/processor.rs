use crate::error::Result;
use crate::types::ProcessReport;

/// The pipeline's single operation.
///
/// Expected failures come back as [`crate::Error::Pipeline`]; anything else
/// is unanticipated. Implementations don't recover from their own errors,
/// the caller decides what a failure means.
pub trait Processor {
    fn process(&mut self) -> Result<ProcessReport>;
}

impl<P: Processor + ?Sized> Processor for Box<P> {
    fn process(&mut self) -> Result<ProcessReport> {
        (**self).process()
    }
}
