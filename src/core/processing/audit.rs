use crate::error::PipelineError;
use crate::types::ProcessReport;

/// A consistency check over a finished run.
pub trait Auditor {
    fn audit(&self, report: &ProcessReport) -> Result<(), PipelineError>;
}

/// Checks that every grain read is accounted for and that enough grains
/// were accepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct CountAudit {
    pub min_accepted: usize,
}

impl Auditor for CountAudit {
    fn audit(&self, report: &ProcessReport) -> Result<(), PipelineError> {
        if report.accepted + report.rejected != report.read {
            return Err(PipelineError::audit_failed(format!(
                "{} grains read but {} accepted and {} rejected",
                report.read, report.accepted, report.rejected
            )));
        }
        if report.rejected != report.rejections.len() {
            return Err(PipelineError::audit_failed(format!(
                "{} rejections counted but {} recorded",
                report.rejected,
                report.rejections.len()
            )));
        }
        if report.accepted < self.min_accepted {
            return Err(PipelineError::audit_failed(format!(
                "{} grains accepted, at least {} required",
                report.accepted, self.min_accepted
            )));
        }
        Ok(())
    }
}

/// Audit that always passes; used when auditing is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAudit;

impl Auditor for NoAudit {
    fn audit(&self, _report: &ProcessReport) -> Result<(), PipelineError> {
        Ok(())
    }
}

impl<A: Auditor + ?Sized> Auditor for Box<A> {
    fn audit(&self, report: &ProcessReport) -> Result<(), PipelineError> {
        (**self).audit(report)
    }
}
