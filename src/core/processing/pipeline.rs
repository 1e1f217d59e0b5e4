use tracing::{debug, info, instrument, warn};

use crate::core::processing::audit::Auditor;
use crate::core::processing::threshold::FailureTally;
use crate::core::processing::validate::GrainValidator;
use crate::core::processor::Processor;
use crate::core::settings::ThresholdSettings;
use crate::error::{Error, PipelineError, PipelineErrorKind, Result};
use crate::io::GrainSource;
use crate::types::{GrainRejection, ProcessReport};

/// Source → validate → threshold → audit.
///
/// Each rejected grain is recorded and logged at WARN. The failure tally is
/// checked after every grain, accepted or not; a breach aborts the run. Once the source is exhausted
/// the auditor runs over the finished report.
pub struct StagedProcessor<S, V, A> {
    source: S,
    validator: V,
    auditor: A,
    threshold: ThresholdSettings,
    strict: bool,
}

impl<S, V, A> StagedProcessor<S, V, A>
where
    S: GrainSource,
    V: GrainValidator,
    A: Auditor,
{
    pub fn new(source: S, validator: V, auditor: A, threshold: ThresholdSettings) -> Self {
        Self {
            source,
            validator,
            auditor,
            threshold,
            strict: false,
        }
    }

    /// In strict mode the first rejection is returned as a
    /// `GrainValidation` error instead of being counted.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    fn reject(
        &self,
        report: &mut ProcessReport,
        tally: &mut FailureTally,
        line: usize,
        reason: String,
    ) -> Result<()> {
        warn!(
            error_type = PipelineErrorKind::GrainValidation.error_type(),
            line,
            reason = %reason,
            "Grain rejected"
        );
        if self.strict {
            return Err(PipelineError::grain_validation(format!("line {line}: {reason}")).into());
        }

        report.record_rejected(GrainRejection { line, reason });
        tally.record_rejected();
        tally.check()?;
        Ok(())
    }
}

impl<S, V, A> Processor for StagedProcessor<S, V, A>
where
    S: GrainSource,
    V: GrainValidator,
    A: Auditor,
{
    #[instrument(name = "process", level = "debug", skip_all)]
    fn process(&mut self) -> Result<ProcessReport> {
        let mut report = ProcessReport::start();
        let mut tally = FailureTally::new(self.threshold.clone());

        while let Some(next) = self.source.next_grain() {
            match next {
                Ok(grain) => match self.validator.validate(&grain) {
                    Ok(()) => {
                        report.record_accepted();
                        tally.record_accepted();
                        // The ratio limit can trip on an accept once min_sample is reached
                        tally.check()?;
                    }
                    Err(reason) => self.reject(&mut report, &mut tally, grain.line, reason)?,
                },
                // Malformed grains count as rejections, other errors end the run
                Err(Error::Pipeline(e)) if e.kind() == PipelineErrorKind::GrainValidation => {
                    let line = self.source.line();
                    let reason = e.message().unwrap_or(e.error_type()).to_string();
                    self.reject(&mut report, &mut tally, line, reason)?;
                }
                Err(e) => return Err(e),
            }
        }

        debug!(read = report.read, rejected = report.rejected, "Source exhausted, auditing");
        self.auditor.audit(&report)?;

        report.finish();
        info!(
            read = report.read,
            accepted = report.accepted,
            rejected = report.rejected,
            "Processing complete"
        );
        Ok(report)
    }
}
