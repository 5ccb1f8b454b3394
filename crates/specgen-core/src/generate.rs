//! Batch generation over a declaration manifest.
//!
//! Walks every controller method in a [`Manifest`] and runs the
//! [`ParameterGenerator`] on each parameter, keeping the controller/method
//! nesting in the output.

use serde::{Deserialize, Serialize};

use crate::generator::ParameterGenerator;
use crate::manifest::{Manifest, MethodEntry};
use crate::types::ParameterDescriptor;
use crate::Error;

/// Generated metadata for a whole manifest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratedMetadata {
    pub controllers: Vec<ControllerMetadata>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerMetadata {
    pub name: String,
    pub methods: Vec<MethodMetadata>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodMetadata {
    pub name: String,
    pub method: String,
    pub path: String,
    pub parameters: Vec<ParameterDescriptor>,
}

/// Generates descriptors for every parameter, stopping at the first error.
pub fn generate_all(
    manifest: &Manifest,
    generator: &ParameterGenerator,
) -> crate::Result<GeneratedMetadata> {
    let mut controllers = Vec::with_capacity(manifest.controllers.len());
    for controller in &manifest.controllers {
        let mut methods = Vec::with_capacity(controller.methods.len());
        for method in &controller.methods {
            methods.push(generate_method(&controller.name, method, generator)?);
        }
        controllers.push(ControllerMetadata {
            name: controller.name.clone(),
            methods,
        });
    }
    log::info!(
        "generated metadata for {} parameters in {} controllers",
        manifest.parameter_count(),
        controllers.len()
    );
    Ok(GeneratedMetadata { controllers })
}

/// Runs every parameter and returns all errors, in manifest order.
pub fn check_all(manifest: &Manifest, generator: &ParameterGenerator) -> Vec<Error> {
    let mut errors = Vec::new();
    for controller in &manifest.controllers {
        for method in &controller.methods {
            for declaration in method.declarations(&controller.name) {
                if let Err(e) = generator.generate(&declaration, &method.method, &method.path) {
                    errors.push(e);
                }
            }
        }
    }
    errors
}

fn generate_method(
    controller: &str,
    method: &MethodEntry,
    generator: &ParameterGenerator,
) -> crate::Result<MethodMetadata> {
    let parameters = method
        .declarations(controller)
        .iter()
        .map(|declaration| generator.generate(declaration, &method.method, &method.path))
        .collect::<crate::Result<Vec<_>>>()?;

    Ok(MethodMetadata {
        name: method.name.clone(),
        method: method.method.clone(),
        path: method.path.clone(),
        parameters,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::ParameterLocation;

    const MANIFEST: &str = r#"
controllers:
  - name: PetController
    methods:
      - name: getPet
        method: get
        path: /pets/{petId}
        parameters:
          - name: petId
            type: integer
          - name: verbose
            type: boolean
            optional: true
            markers: [Query]
      - name: updatePet
        method: get
        path: /pets/{petId}
        parameters:
          - name: pet
            type: Pet
            markers: [Body]
          - name: petId
            type: integer
            markers:
              - name: Path
                arguments: [id]
"#;

    fn manifest() -> Manifest {
        Manifest::parse_content(MANIFEST).unwrap()
    }

    #[test]
    fn test_generate_all_stops_at_first_error() {
        let err = generate_all(&manifest(), &ParameterGenerator::default()).unwrap_err();
        assert!(err.to_string().contains("Body can't support get method"));
    }

    #[test]
    fn test_generate_all_keeps_nesting() {
        let mut manifest = manifest();
        manifest.controllers[0].methods.truncate(1);

        let metadata = generate_all(&manifest, &ParameterGenerator::default()).unwrap();
        let method = &metadata.controllers[0].methods[0];
        assert_eq!(metadata.controllers[0].name, "PetController");
        assert_eq!(method.path, "/pets/{petId}");
        assert_eq!(method.parameters.len(), 2);
        assert_eq!(method.parameters[0].in_, ParameterLocation::Path);
        assert_eq!(method.parameters[1].in_, ParameterLocation::Query);
        assert!(!method.parameters[1].required);
    }

    #[test]
    fn test_check_all_reports_every_error_in_order() {
        let errors = check_all(&manifest(), &ParameterGenerator::default());
        assert_eq!(errors.len(), 2);
        assert!(errors[0].to_string().contains("Body can't support get method"));
        assert!(errors[1].to_string().contains("can't match in path"));
        let diag = errors[1].as_generate_metadata().unwrap();
        assert_eq!(diag.location, "PetController.updatePet");
        assert_eq!(diag.parameter_name, "petId");
    }

    #[test]
    fn test_empty_manifest() {
        let manifest = Manifest::default();
        assert!(check_all(&manifest, &ParameterGenerator::default()).is_empty());
        assert_eq!(
            generate_all(&manifest, &ParameterGenerator::default()).unwrap(),
            GeneratedMetadata::default()
        );
    }
}
