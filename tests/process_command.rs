use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use grainpipe::{PipelineErrorKind, Settings, process_with_settings};

fn write_fixture(dir: &Path, grains: &str, extra_settings: &str) -> std::path::PathBuf {
    let input = dir.join("grains.jsonl");
    fs::write(&input, grains).unwrap();

    let config = dir.join("grainpipe.toml");
    let settings = format!(
        "[pipeline]\ninput = {:?}\nrequired_fields = [\"id\", \"weight\"]\n\n{}",
        input.to_str().unwrap(),
        extra_settings
    );
    fs::write(&config, settings).unwrap();
    config
}

fn run_process(config: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_grainpipe"))
        .arg("--config")
        .arg(config)
        .arg("process")
        .output()
        .unwrap()
}

const GOOD: &str = "{\"id\": 1, \"weight\": 2.5}\n{\"id\": 2, \"weight\": 0.4}\n";
const MIXED: &str = "{\"id\": 1, \"weight\": 2.5}\n{\"id\": 2}\nnot json\n{\"weight\": 1}\n";

#[test]
fn process_succeeds_with_exit_zero() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_fixture(dir.path(), GOOD, "");

    let output = run_process(&config);
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("read=2 accepted=2 rejected=0"), "{stdout}");
}

#[test]
fn threshold_breach_exits_non_zero_with_label() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_fixture(dir.path(), MIXED, "[threshold]\nmax_failures = 1\n");

    let output = run_process(&config);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Validation Threshold Exceeded"), "{stderr}");
}

#[test]
fn audit_failure_exits_non_zero() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_fixture(dir.path(), MIXED, "[audit]\nmin_accepted = 2\n");

    let output = run_process(&config);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Audit Failed"), "{stderr}");
}

#[test]
fn relative_input_is_read_next_to_the_settings_file() {
    let dir = tempfile::tempdir().unwrap();
    let conf = dir.path().join("conf");
    fs::create_dir(&conf).unwrap();
    fs::write(conf.join("grains.jsonl"), GOOD).unwrap();
    let config = conf.join("grainpipe.toml");
    fs::write(
        &config,
        "[pipeline]\ninput = \"grains.jsonl\"\nrequired_fields = [\"id\"]\n",
    )
    .unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_grainpipe"))
        .current_dir(dir.path())
        .arg("--config")
        .arg(&config)
        .arg("process")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("read=2 accepted=2 rejected=0"), "{stdout}");
}

#[test]
fn missing_input_is_an_unexpected_failure() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("grainpipe.toml");
    fs::write(
        &config,
        format!(
            "[pipeline]\ninput = {:?}\n",
            dir.path().join("nope.jsonl").to_str().unwrap()
        ),
    )
    .unwrap();

    let output = run_process(&config);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn library_api_reports_rejections() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_fixture(dir.path(), MIXED, "");
    let settings = Settings::load(&config).unwrap();

    let report = process_with_settings(&settings).unwrap();
    assert_eq!((report.read, report.accepted, report.rejected), (4, 1, 3));
    let lines: Vec<_> = report.rejections.iter().map(|r| r.line).collect();
    assert_eq!(lines, vec![2, 3, 4]);
}

#[test]
fn library_api_strict_mode_raises_grain_validation() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_fixture(dir.path(), MIXED, "");
    let mut settings = Settings::load(&config).unwrap();
    settings.pipeline.strict = true;

    let err = process_with_settings(&settings).unwrap_err();
    assert_eq!(err.pipeline_kind(), Some(PipelineErrorKind::GrainValidation));
    assert!(grainpipe::is_pipeline_exception(&err));
}
