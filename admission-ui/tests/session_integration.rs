//! Integration tests that run the terminal front end against on-disk fixtures.
//!
//! These complement the unit tests inside terminal.rs and settings.rs (which
//! use inline literals) by exercising the read-from-disk path end-to-end.

use std::path::{Path, PathBuf};

use admission_core::FormEngine;
use admission_ui::{settings::Settings, terminal};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_load_fixture_settings() {
    let settings = Settings::load(&fixture("settings.toml")).expect("fixture settings should load");

    assert_eq!(settings.engine.delay_ms, 0);
    assert_eq!(settings.engine.entry_test_max, dec!(200));
    assert_eq!(settings.weights.entry_test, dec!(0.50));
    assert_eq!(settings.logging.level, "warn");
    assert!(!settings.logging.console);
    assert_eq!(settings.engine_config().validate(), Ok(()));
}

#[tokio::test]
async fn test_fixture_session_with_fixture_settings() {
    let settings = Settings::load(&fixture("settings.toml")).unwrap();
    let script = std::fs::read_to_string(fixture("session.txt")).unwrap();

    let view = terminal::TerminalView::new(Vec::new());
    let mut engine = FormEngine::new(settings.engine_config(), view).unwrap();
    terminal::run_session(&mut engine, script.as_bytes())
        .await
        .unwrap();

    // 90% * 0.25 + 80% * 0.25 + (150 / 200 = 75%) * 0.5
    let output = String::from_utf8(engine.into_view().into_writer()).unwrap();
    assert!(!output.contains("error:"), "comment line was not ignored: {output}");
    assert!(output.contains("Aggregate: 80.00%"));
    assert!(output.contains("entry test 75.00%"));
    assert!(output.contains("Calculate: ready"));
    // Lines after `quit` are never read.
    assert!(!output.contains("matricObtained: Obtained"));
}
