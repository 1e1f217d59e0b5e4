#![doc = r#"
grainpipe — a grain validation pipeline.

This crate reads grains (one JSON object per line), validates each one,
aborts when cumulative validation failures cross a configured threshold,
and audits the finished run. It powers the `grainpipe` CLI and can be
embedded in your own Rust applications.

Run the default processor from settings
---------------------------------------
```rust,no_run
use grainpipe::{process_with_settings, Settings};

fn main() -> grainpipe::Result<()> {
    let settings = Settings::load("grainpipe.toml")?;
    let report = process_with_settings(&settings)?;
    println!("{report}");
    Ok(())
}
```

Assemble the stages yourself
----------------------------
```rust
use grainpipe::core::processing::{CountAudit, RequiredFieldsValidator, StagedProcessor};
use grainpipe::core::settings::ThresholdSettings;
use grainpipe::io::VecSource;
use grainpipe::{Grain, Processor};

fn main() -> grainpipe::Result<()> {
    let mut fields = serde_json::Map::new();
    fields.insert("id".into(), serde_json::json!(1));

    let mut processor = StagedProcessor::new(
        VecSource::new(vec![Grain::new(1, fields)]),
        RequiredFieldsValidator::new(vec!["id".into()]),
        CountAudit { min_accepted: 1 },
        ThresholdSettings::default(),
    );
    let report = processor.process()?;
    assert_eq!(report.accepted, 1);
    Ok(())
}
```

Error handling
--------------
All public functions return `grainpipe::Result<T>`. Expected pipeline
failures arrive as `Error::Pipeline`; every other variant is an
unanticipated failure.

```rust,no_run
use grainpipe::{process_with_settings, Error, PipelineErrorKind, Settings};

fn main() {
    match process_with_settings(&Settings::default()) {
        Ok(report) => println!("{report}"),
        Err(Error::Pipeline(e)) if e.kind() == PipelineErrorKind::AuditFailed => {
            eprintln!("audit: {e}")
        }
        Err(Error::Pipeline(e)) => eprintln!("{}: {:?}", e.error_type(), e.message()),
        Err(other) => eprintln!("unexpected: {other}"),
    }
}
```

Useful modules
--------------
- [`api`] — high-level entry points.
- [`core`] — settings, the `Processor` trait and the staged pipeline.
- [`io`] — grain sources.
- [`logging`] — process-wide `tracing` setup and console reconfiguration.
- [`error`] — the pipeline failure taxonomy, crate-level `Error` and `Result`.
"#]

// Core modules (public)
pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod logging;
pub mod types;

// Curated public API surface
pub use core::processor::Processor;
pub use core::settings::Settings;
pub use error::{
    Error, PIPELINE_EXCEPTIONS, PipelineError, PipelineErrorKind, Result, is_pipeline_exception,
};
pub use types::{CommandMode, Grain, GrainRejection, LogFormat, LogLevelArg, ProcessReport};

pub use api::{DefaultProcessor, build_processor, process_with_settings};
