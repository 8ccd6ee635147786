// tests/manifest_loading.rs

mod common;
use crate::common::TestResult;

use std::io::Write;

use tempfile::NamedTempFile;
use shellstate::config::load_and_validate;
use shellstate::engine::{ResourceState, ResourceStatus};
use shellstate::errors::ShellstateError;
use shellstate::load_state;
use shellstate::types::{InputFormat, OutputFormat};

#[test]
fn manifest_with_two_resources_loads() -> TestResult {
    let mut file = NamedTempFile::new()?;
    write!(
        file,
        r#"
[resource.web]
apply = "deploy.sh"
check = "status.sh"
check_output_format = "json"

[resource.dns]
shell = "/bin/bash -c"
apply = "add-record.sh"
check = "dig.sh"
destroy = "remove-record.sh"
exit_code_force_new = 3
apply_input_format = "yaml"
apply_inputs = {{ zone = "example.com" }}
"#
    )?;

    let manifest = load_and_validate(file.path())?;

    let names: Vec<&str> = manifest.resources().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["dns", "web"]);

    let dns = manifest.get("dns")?;
    assert_eq!(dns.shell, vec!["/bin/bash", "-c"]);
    assert_eq!(dns.exit_code_force_new, 3);
    assert_eq!(dns.apply.input.format, InputFormat::Yaml);
    assert_eq!(dns.apply.input.values["zone"], "example.com");
    assert!(dns.destroy.is_some());

    let web = manifest.get("web")?;
    assert_eq!(web.check.output, OutputFormat::Json);
    assert!(web.destroy.is_none());
    Ok(())
}

#[test]
fn malformed_toml_returns_structured_error() -> TestResult {
    let mut file = NamedTempFile::new()?;
    write!(file, "[resource.web\napply = \"x\"\n")?;

    match load_and_validate(file.path()) {
        Err(ShellstateError::TomlError(_)) => Ok(()),
        Err(e) => panic!("Expected TomlError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn missing_manifest_is_an_io_error() {
    let result = load_and_validate("/definitely/not/here/Shellstate.toml");
    assert!(matches!(result, Err(ShellstateError::IoError(_))));
}

#[test]
fn state_document_round_trips_through_json() -> TestResult {
    let mut file = NamedTempFile::new()?;
    write!(
        file,
        r#"{{
  "id": "123",
  "status": "drifted",
  "exit_code": 1,
  "exit_code_force_new": 0,
  "last_exit_code": 1,
  "apply_outputs": {{ "a": "1" }},
  "check_outputs": null
}}"#
    )?;

    let state: ResourceState = load_state(file.path())?;

    assert_eq!(state.id.as_deref(), Some("123"));
    assert_eq!(state.status, ResourceStatus::Drifted);
    assert_eq!(state.exit_code, 1);
    assert_eq!(state.check_outputs, None);
    assert_eq!(state.apply_outputs.as_ref().map(|m| m["a"].as_str()), Some("1"));

    let json = serde_json::to_string(&state)?;
    let back: ResourceState = serde_json::from_str(&json)?;
    assert_eq!(back, state);
    Ok(())
}

#[test]
fn sparse_state_document_uses_defaults() -> TestResult {
    let mut file = NamedTempFile::new()?;
    write!(file, "{{}}")?;

    let state = load_state(file.path())?;
    assert_eq!(state, ResourceState::default());
    Ok(())
}
