//! High-level library API: build the default processor from [`Settings`]
//! and run it. Prefer these entrypoints over assembling the stages by hand
//! unless you need a custom source, validator or auditor.
use std::fs::File;
use std::io::BufReader;

use tracing::{debug, info};

use crate::core::processing::{
    Auditor, CountAudit, NoAudit, RequiredFieldsValidator, StagedProcessor,
};
use crate::core::processor::Processor;
use crate::core::settings::Settings;
use crate::error::Result;
use crate::io::JsonLinesSource;
use crate::types::ProcessReport;

/// The processor the CLI runs: a JSON-lines file, required-field
/// validation, and the count audit when enabled.
pub type DefaultProcessor = StagedProcessor<
    JsonLinesSource<BufReader<File>>,
    RequiredFieldsValidator,
    Box<dyn Auditor>,
>;

/// Build the default processor. Fails if the input file can't be opened.
pub fn build_processor(settings: &Settings) -> Result<DefaultProcessor> {
    let pipeline = &settings.pipeline;
    let source = JsonLinesSource::open(&settings.input_path())?;
    let validator = RequiredFieldsValidator::new(pipeline.required_fields.clone());

    let auditor: Box<dyn Auditor> = if settings.audit.enabled {
        Box::new(CountAudit {
            min_accepted: settings.audit.min_accepted,
        })
    } else {
        debug!("Audit disabled");
        Box::new(NoAudit)
    };

    Ok(
        StagedProcessor::new(source, validator, auditor, settings.threshold.clone())
            .strict(pipeline.strict),
    )
}

/// Build and run the default processor once
pub fn process_with_settings(settings: &Settings) -> Result<ProcessReport> {
    info!(input = %settings.input_path().display(), "Starting grain processing");
    let mut processor = build_processor(settings)?;
    processor.process()
}
