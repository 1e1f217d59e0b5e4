use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, trace};

use crate::error::{PipelineError, Result};
use crate::types::Grain;

/// Yields grains one at a time.
///
/// A returned `Err` carrying a [`PipelineError`] of kind `GrainValidation`
/// means the grain itself was malformed; the processor counts it as a
/// rejection and keeps reading. Any other error ends the run.
pub trait GrainSource {
    fn next_grain(&mut self) -> Option<Result<Grain>>;

    /// 1-based position of the item most recently returned.
    fn line(&self) -> usize;
}

/// Reads one JSON object per line. Blank lines are skipped.
pub struct JsonLinesSource<R> {
    reader: R,
    line: usize,
    buf: String,
}

impl JsonLinesSource<BufReader<File>> {
    pub fn open(path: &Path) -> Result<Self> {
        debug!(input = %path.display(), "Opening grain file");
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> JsonLinesSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            buf: String::new(),
        }
    }
}

impl<R: BufRead> GrainSource for JsonLinesSource<R> {
    fn next_grain(&mut self) -> Option<Result<Grain>> {
        loop {
            self.buf.clear();
            match self.reader.read_line(&mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(e.into())),
            }
            self.line += 1;

            let text = self.buf.trim();
            if text.is_empty() {
                trace!(line = self.line, "Skipping blank line");
                continue;
            }

            let parsed = match serde_json::from_str::<serde_json::Value>(text) {
                Ok(serde_json::Value::Object(fields)) => Ok(Grain::new(self.line, fields)),
                Ok(_) => Err(PipelineError::grain_validation("expected a JSON object").into()),
                Err(e) => Err(PipelineError::grain_validation(e.to_string()).into()),
            };
            return Some(parsed);
        }
    }

    fn line(&self) -> usize {
        self.line
    }
}

/// In-memory source, mostly for embedding and tests
#[derive(Debug, Default)]
pub struct VecSource {
    grains: std::vec::IntoIter<Grain>,
    line: usize,
}

impl VecSource {
    pub fn new(grains: Vec<Grain>) -> Self {
        Self {
            grains: grains.into_iter(),
            line: 0,
        }
    }
}

impl GrainSource for VecSource {
    fn next_grain(&mut self) -> Option<Result<Grain>> {
        let grain = self.grains.next()?;
        self.line = grain.line;
        Some(Ok(grain))
    }

    fn line(&self) -> usize {
        self.line
    }
}
