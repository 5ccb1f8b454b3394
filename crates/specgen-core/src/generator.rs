//! Per-parameter classification.
//!
//! [`ParameterGenerator`] turns one [`ParameterDeclaration`] into a
//! [`ParameterDescriptor`]: it picks the binding from the parameter's marker,
//! checks the binding against the HTTP method, the path template and the
//! resolved type, and fills in naming, requiredness, documentation and
//! validators. Every rule violation is reported as a
//! [`GenerateMetadataError`].
//!
//! # Examples
//!
//! ```
//! use specgen_core::declaration::{EnclosingScope, Marker, ParameterDeclaration};
//! use specgen_core::ParameterGenerator;
//!
//! let parameter = ParameterDeclaration::new("petId", EnclosingScope::new("PetController", "getPet"))
//!     .typed("integer")
//!     .marker(Marker::new("Path"));
//!
//! let descriptor = ParameterGenerator::default()
//!     .generate(&parameter, "get", "/pets/{petId}")
//!     .unwrap();
//! assert_eq!(descriptor.name, "petId");
//! assert!(descriptor.required);
//! ```

use crate::binding::Binding;
use crate::declaration::{display_parts_to_string, ParameterDeclaration};
use crate::docs::{DeclarationDocs, DocumentationSource};
use crate::error::GenerateMetadataError;
use crate::resolver::{BuiltinTypeResolver, TypeResolver};
use crate::types::{ParameterDescriptor, TypeDescriptor};
use crate::validators::{MarkerValidators, ValidatorExtractor};
use crate::{Error, Result};

const METHODS_SUPPORTING_BODY: [&str; 3] = ["post", "put", "patch"];

/// Builds parameter descriptors using injected collaborators.
///
/// Holds no mutable state; a single instance can classify every parameter of
/// every route, from any thread.
pub struct ParameterGenerator {
    type_resolver: Box<dyn TypeResolver>,
    validators: Box<dyn ValidatorExtractor>,
    docs: Box<dyn DocumentationSource>,
}

impl Default for ParameterGenerator {
    fn default() -> Self {
        Self::new(BuiltinTypeResolver::new(), MarkerValidators, DeclarationDocs)
    }
}

impl std::fmt::Debug for ParameterGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParameterGenerator").finish_non_exhaustive()
    }
}

impl ParameterGenerator {
    pub fn new(
        type_resolver: impl TypeResolver + 'static,
        validators: impl ValidatorExtractor + 'static,
        docs: impl DocumentationSource + 'static,
    ) -> Self {
        Self {
            type_resolver: Box::new(type_resolver),
            validators: Box::new(validators),
            docs: Box::new(docs),
        }
    }

    pub fn with_type_resolver(mut self, type_resolver: impl TypeResolver + 'static) -> Self {
        self.type_resolver = Box::new(type_resolver);
        self
    }

    pub fn with_validators(mut self, validators: impl ValidatorExtractor + 'static) -> Self {
        self.validators = Box::new(validators);
        self
    }

    pub fn with_docs(mut self, docs: impl DocumentationSource + 'static) -> Self {
        self.docs = Box::new(docs);
        self
    }

    /// Classifies `parameter` of a route served at `path` for `method`.
    pub fn generate(
        &self,
        parameter: &ParameterDeclaration,
        method: &str,
        path: &str,
    ) -> Result<ParameterDescriptor> {
        let binding = parameter
            .find_marker(is_binding_marker)
            .and_then(|m| Binding::from_marker_name(&m.name))
            .unwrap_or(Binding::Path);
        let override_name = parameter.marker_text_argument(is_binding_marker);

        let descriptor = match binding {
            Binding::Request => self.request_parameter(parameter),
            Binding::Body => self.body_parameter(parameter, method),
            Binding::BodyProp => self.body_prop_parameter(parameter, method, override_name),
            Binding::Header | Binding::Query => {
                self.plain_parameter(parameter, binding, override_name)
            }
            Binding::Path => self.path_parameter(parameter, path, override_name),
            Binding::UploadedFile | Binding::UploadedFiles | Binding::FormField => {
                self.form_data_parameter(parameter, binding, override_name)
            }
        }?;

        log::debug!(
            "{}: parameter '{}' bound to {} as '{}'",
            parameter.location(),
            descriptor.parameter_name,
            descriptor.in_.as_str(),
            descriptor.name
        );
        Ok(descriptor)
    }

    fn request_parameter(&self, parameter: &ParameterDeclaration) -> Result<ParameterDescriptor> {
        Ok(self.descriptor(
            parameter,
            Binding::Request,
            &parameter.name,
            !parameter.optional,
            TypeDescriptor::named("object"),
        ))
    }

    fn body_parameter(
        &self,
        parameter: &ParameterDeclaration,
        method: &str,
    ) -> Result<ParameterDescriptor> {
        let type_ = self.validated_type(parameter)?;
        if !supports_body(method) {
            return Err(GenerateMetadataError::new(
                parameter,
                format!("Body can't support {method} method"),
            )
            .into());
        }

        Ok(self.descriptor(
            parameter,
            Binding::Body,
            &parameter.name,
            !parameter.optional,
            type_,
        ))
    }

    fn body_prop_parameter(
        &self,
        parameter: &ParameterDeclaration,
        method: &str,
        override_name: Option<&str>,
    ) -> Result<ParameterDescriptor> {
        let type_ = self.validated_type(parameter)?;
        if !supports_body(method) {
            return Err(GenerateMetadataError::new(
                parameter,
                format!("Body can't support '{}' method.", parameter.location()),
            )
            .into());
        }

        Ok(self.descriptor(
            parameter,
            Binding::BodyProp,
            override_name.unwrap_or(&parameter.name),
            !parameter.optional,
            type_,
        ))
    }

    /// Header and query parameters.
    fn plain_parameter(
        &self,
        parameter: &ParameterDeclaration,
        binding: Binding,
        override_name: Option<&str>,
    ) -> Result<ParameterDescriptor> {
        let type_ = self.validated_type(parameter)?;
        if !type_.is_supported_parameter_type() {
            return Err(GenerateMetadataError::new(
                parameter,
                format!(
                    "Parameter '{}' can't be passed as a {} parameter in '{}'.",
                    parameter.name,
                    binding.location().as_str(),
                    parameter.location()
                ),
            )
            .into());
        }

        Ok(self.descriptor(
            parameter,
            binding,
            override_name.unwrap_or(&parameter.name),
            !parameter.optional,
            type_,
        ))
    }

    fn path_parameter(
        &self,
        parameter: &ParameterDeclaration,
        path: &str,
        override_name: Option<&str>,
    ) -> Result<ParameterDescriptor> {
        let type_ = self.validated_type(parameter)?;
        let path_name = override_name.unwrap_or(&parameter.name);

        if !type_.is_supported_parameter_type() {
            return Err(GenerateMetadataError::new(
                parameter,
                format!(
                    "Parameter '{}:{}' can't be passed as a path parameter in '{}'.",
                    parameter.name,
                    type_.type_name,
                    parameter.location()
                ),
            )
            .into());
        }
        if !path.contains(&format!("{{{path_name}}}")) {
            return Err(GenerateMetadataError::new(
                parameter,
                format!(
                    "Parameter '{}' can't match in path: '{path}'",
                    parameter.name
                ),
            )
            .into());
        }

        Ok(self.descriptor(parameter, Binding::Path, path_name, true, type_))
    }

    /// Uploaded file(s) and form fields, which carry fixed types.
    fn form_data_parameter(
        &self,
        parameter: &ParameterDeclaration,
        binding: Binding,
        override_name: Option<&str>,
    ) -> Result<ParameterDescriptor> {
        let (type_name, kind) = match binding {
            Binding::UploadedFile => ("file", "an uploaded file parameter"),
            Binding::UploadedFiles => ("file[]", "an uploaded files parameter"),
            _ => ("string", "form field parameter"),
        };
        let type_ = TypeDescriptor::named(type_name);

        if !type_.is_supported_parameter_type() {
            return Err(GenerateMetadataError::new(
                parameter,
                format!(
                    "Parameter '{}:{}' can't be passed as {} in '{}'.",
                    parameter.name,
                    type_.type_name,
                    kind,
                    parameter.location()
                ),
            )
            .into());
        }

        Ok(self.descriptor(
            parameter,
            binding,
            override_name.unwrap_or(&parameter.name),
            true,
            type_,
        ))
    }

    fn descriptor(
        &self,
        parameter: &ParameterDeclaration,
        binding: Binding,
        name: &str,
        required: bool,
        type_: TypeDescriptor,
    ) -> ParameterDescriptor {
        ParameterDescriptor {
            description: self.description(parameter),
            in_: binding.location(),
            name: name.to_string(),
            required,
            type_,
            parameter_name: parameter.name.clone(),
            validators: self.validators.validators(parameter, &parameter.name),
        }
    }

    fn validated_type(&self, parameter: &ParameterDeclaration) -> Result<TypeDescriptor> {
        let Some(type_expr) = parameter.type_expr.as_deref() else {
            return Err(GenerateMetadataError::new(
                parameter,
                format!(
                    "Parameter {} doesn't have a valid type assigned in '{}'.",
                    parameter.name,
                    parameter.location()
                ),
            )
            .into());
        };

        self.type_resolver.resolve(type_expr).map_err(|e| match e {
            Error::TypeResolution(msg) => Error::type_resolution(format!(
                "{msg} (parameter '{}' in '{}')",
                parameter.name,
                parameter.location()
            )),
            other => other,
        })
    }

    fn description(&self, parameter: &ParameterDeclaration) -> String {
        match self.docs.documentation_comment(parameter) {
            Ok(parts) if !parts.is_empty() => display_parts_to_string(&parts),
            Ok(_) => String::new(),
            Err(e) => {
                log::warn!(
                    "no documentation for parameter '{}' in '{}': {e}",
                    parameter.name,
                    parameter.location()
                );
                String::new()
            }
        }
    }
}

/// Whether `name` selects a binding, compared case-insensitively.
fn is_binding_marker(name: &str) -> bool {
    Binding::from_marker_name(name).is_some()
}

fn supports_body(method: &str) -> bool {
    METHODS_SUPPORTING_BODY
        .iter()
        .any(|m| m.eq_ignore_ascii_case(method))
}
