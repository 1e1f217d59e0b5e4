use crate::core::settings::ThresholdSettings;
use crate::error::PipelineError;

/// Running count of grains read and rejected, checked against the
/// configured failure limits.
#[derive(Debug, Clone)]
pub struct FailureTally {
    limits: ThresholdSettings,
    read: usize,
    rejected: usize,
}

impl FailureTally {
    pub fn new(limits: ThresholdSettings) -> Self {
        Self {
            limits,
            read: 0,
            rejected: 0,
        }
    }

    pub fn record_accepted(&mut self) {
        self.read += 1;
    }

    pub fn record_rejected(&mut self) {
        self.read += 1;
        self.rejected += 1;
    }

    pub fn read(&self) -> usize {
        self.read
    }

    pub fn rejected(&self) -> usize {
        self.rejected
    }

    /// Checks both limits. The ratio limit only applies once `min_sample`
    /// grains have been read.
    pub fn check(&self) -> Result<(), PipelineError> {
        if let Some(max) = self.limits.max_failures {
            if self.rejected > max {
                return Err(PipelineError::threshold_exceeded(format!(
                    "{} grains rejected, limit is {}",
                    self.rejected, max
                )));
            }
        }

        if let Some(max_ratio) = self.limits.max_failure_ratio {
            if self.read > 0 && self.read >= self.limits.min_sample {
                let ratio = self.rejected as f64 / self.read as f64;
                if ratio > max_ratio {
                    return Err(PipelineError::threshold_exceeded(format!(
                        "failure ratio {:.3} ({}/{}) exceeds limit {:.3}",
                        ratio, self.rejected, self.read, max_ratio
                    )));
                }
            }
        }

        Ok(())
    }
}
