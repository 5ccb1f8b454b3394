//! Documentation comment lookup.

use crate::declaration::{DisplayPart, ParameterDeclaration};
use crate::Result;

/// Source of documentation comments for parameter declarations.
///
/// Takes the place of a global type-checker: the generator asks the injected
/// source for the comment attached to a parameter's identifier.
pub trait DocumentationSource: Send + Sync {
    /// Comment parts attached to `declaration`, empty when undocumented.
    fn documentation_comment(&self, declaration: &ParameterDeclaration) -> Result<Vec<DisplayPart>>;
}

/// Reads the comment the parser already attached to the declaration.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclarationDocs;

impl DocumentationSource for DeclarationDocs {
    fn documentation_comment(&self, declaration: &ParameterDeclaration) -> Result<Vec<DisplayPart>> {
        Ok(declaration.documentation.clone())
    }
}
