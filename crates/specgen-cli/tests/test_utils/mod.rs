//! Test utilities for specgen CLI integration tests

// Internal imports (std, crate)
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

// External imports (alphabetized)
use tempfile::TempDir;

/// Creates a temporary directory for test inputs and outputs
pub fn create_temp_dir() -> anyhow::Result<(TempDir, PathBuf)> {
    let temp_dir = tempfile::tempdir()?;
    let temp_path = temp_dir.path().to_path_buf();
    Ok((temp_dir, temp_path))
}

/// Writes a declaration manifest whose parameters all classify cleanly
pub fn create_valid_manifest(dir: &Path) -> anyhow::Result<PathBuf> {
    let path = dir.join("declarations.yaml");
    let content = r#"
controllers:
  - name: PetController
    methods:
      - name: getPet
        method: get
        path: /pets/{petId}
        parameters:
          - name: petId
            type: PetId
            doc: The pet identifier
          - name: fields
            type: "'name' | 'tag'"
            optional: true
            markers:
              - name: Query
                arguments: [select]
      - name: createPet
        method: post
        path: /pets
        parameters:
          - name: pet
            type: NewPet
            markers: [Body]
          - name: traceId
            type: string
            markers:
              - name: header
                arguments: [x-trace-id]
              - name: MinLength
                arguments: [8]
  - name: UploadController
    methods:
      - name: upload
        method: post
        path: /upload
        parameters:
          - name: avatar
            markers: [UploadedFile]
"#;
    fs::write(&path, content)?;
    Ok(path)
}

/// Writes a declaration manifest containing two classification errors
pub fn create_invalid_manifest(dir: &Path) -> anyhow::Result<PathBuf> {
    let path = dir.join("broken.json");
    let content = serde_json::json!({
        "controllers": [{
            "name": "PetController",
            "methods": [
                {
                    "name": "listPets",
                    "method": "get",
                    "path": "/pets",
                    "parameters": [{"name": "filter", "type": "Filter", "markers": ["Body"]}]
                },
                {
                    "name": "getPet",
                    "method": "get",
                    "path": "/pets/{petId}",
                    "parameters": [{"name": "id", "type": "string"}]
                }
            ]
        }]
    });
    fs::write(&path, serde_json::to_string_pretty(&content)?)?;
    Ok(path)
}

/// Writes a config file pointing at `declarations` with a `PetId` alias
pub fn create_config(dir: &Path, declarations: &Path) -> anyhow::Result<PathBuf> {
    let path = dir.join("specgen.yaml");
    let content = format!(
        "project_name: pet-store\ndeclarations_path: {}\nformat: yaml\ntype_aliases:\n  PetId: integer\n",
        declarations.display()
    );
    fs::write(&path, content)?;
    Ok(path)
}

/// Runs the built `specgen` binary
pub fn run_specgen(args: &[&str]) -> anyhow::Result<Output> {
    let output = Command::new(env!("CARGO_BIN_EXE_specgen"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()?;
    Ok(output)
}
