//! specgen Core Library
//!
//! This library extracts OpenAPI parameter metadata from annotated controller
//! method signatures. Each parameter is classified into a request binding,
//! checked against its route and resolved into a [`ParameterDescriptor`].

pub mod binding;
pub mod config;
pub mod declaration;
pub mod docs;
pub mod error;
pub mod generate;
pub mod generator;
pub mod manifest;
pub mod resolver;
pub mod types;
pub mod validators;

pub use crate::{
    binding::{Binding, ParameterLocation},
    config::{Config, OutputFormat},
    declaration::{Marker, ParameterDeclaration},
    error::{Error, GenerateMetadataError, Result},
    generate::{check_all, generate_all, GeneratedMetadata},
    generator::ParameterGenerator,
    manifest::Manifest,
    types::{ParameterDescriptor, TypeDescriptor},
};
