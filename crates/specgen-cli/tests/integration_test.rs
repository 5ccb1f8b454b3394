//! End-to-end integration tests for the specgen CLI

mod test_utils;

use anyhow::Result;
use serde_json::Value as JsonValue;
use test_utils::*;

#[test]
fn test_generate_json_to_stdout() -> Result<()> {
    let (_guard, dir) = create_temp_dir()?;
    let manifest = create_valid_manifest(&dir)?;
    let config = create_config(&dir, &manifest)?;

    let output = run_specgen(&[
        "generate",
        "--config",
        config.to_str().unwrap(),
        "--format",
        "json",
    ])?;
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let metadata: JsonValue = serde_json::from_slice(&output.stdout)?;
    let pet = &metadata["controllers"][0];
    assert_eq!(pet["name"], "PetController");

    let get_params = &pet["methods"][0]["parameters"];
    assert_eq!(get_params[0]["in"], "path");
    assert_eq!(get_params[0]["type"]["typeName"], "integer");
    assert_eq!(get_params[0]["description"], "The pet identifier");
    assert_eq!(get_params[1]["name"], "select");
    assert_eq!(get_params[1]["parameterName"], "fields");
    assert_eq!(get_params[1]["required"], false);
    assert_eq!(get_params[1]["type"]["typeName"], "enum");

    let create_params = &pet["methods"][1]["parameters"];
    assert_eq!(create_params[0]["in"], "body");
    assert_eq!(create_params[1]["in"], "header");
    assert_eq!(create_params[1]["name"], "x-trace-id");
    assert_eq!(create_params[1]["validators"]["minLength"]["value"], 8);

    let upload = &metadata["controllers"][1]["methods"][0]["parameters"][0];
    assert_eq!(upload["in"], "formData");
    assert_eq!(upload["type"]["typeName"], "file");
    assert_eq!(upload["required"], true);
    Ok(())
}

#[test]
fn test_generate_yaml_to_file() -> Result<()> {
    let (_guard, dir) = create_temp_dir()?;
    let manifest = create_valid_manifest(&dir)?;
    let config = create_config(&dir, &manifest)?;
    let out = dir.join("metadata.yaml");

    let output = run_specgen(&[
        "generate",
        "--config",
        config.to_str().unwrap(),
        "--output",
        out.to_str().unwrap(),
    ])?;
    assert!(output.status.success());

    let written: serde_yaml::Value = serde_yaml::from_str(&std::fs::read_to_string(&out)?)?;
    assert_eq!(
        written["controllers"][1]["name"].as_str(),
        Some("UploadController")
    );
    Ok(())
}

#[test]
fn test_generate_without_alias_resolves_reference_and_fails() -> Result<()> {
    let (_guard, dir) = create_temp_dir()?;
    let manifest = create_valid_manifest(&dir)?;

    // Without the config, PetId is an unknown reference and can't be a path parameter
    let output = run_specgen(&["generate", "--declarations", manifest.to_str().unwrap()])?;
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("can't be passed as a path parameter"), "stderr: {stderr}");
    Ok(())
}

#[test]
fn test_check_reports_all_errors() -> Result<()> {
    let (_guard, dir) = create_temp_dir()?;
    let manifest = create_invalid_manifest(&dir)?;

    let output = run_specgen(&["check", "--declarations", manifest.to_str().unwrap()])?;
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Body can't support get method"), "stderr: {stderr}");
    assert!(stderr.contains("Parameter 'id' can't match in path: '/pets/{petId}'"));
    assert!(stderr.contains("2 of 2 parameters failed classification"));
    Ok(())
}

#[test]
fn test_check_passes_clean_manifest() -> Result<()> {
    let (_guard, dir) = create_temp_dir()?;
    let manifest = create_valid_manifest(&dir)?;
    let config = create_config(&dir, &manifest)?;

    let output = run_specgen(&["check", "--config", config.to_str().unwrap()])?;
    assert!(output.status.success());
    Ok(())
}

#[test]
fn test_missing_inputs_is_an_error() -> Result<()> {
    let output = run_specgen(&["generate"])?;
    assert!(!output.status.success());
    Ok(())
}
