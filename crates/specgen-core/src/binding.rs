//! Request bindings a parameter can be drawn from.

use serde::{Deserialize, Serialize};

/// Where in the request a parameter is bound, chosen from its marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Binding {
    Request,
    Body,
    BodyProp,
    Header,
    Query,
    Path,
    UploadedFile,
    UploadedFiles,
    FormField,
}

impl Binding {
    /// Candidate bindings in lookup order.
    pub const ALL: [Binding; 9] = [
        Binding::Header,
        Binding::Query,
        Binding::Path,
        Binding::Body,
        Binding::BodyProp,
        Binding::Request,
        Binding::UploadedFile,
        Binding::UploadedFiles,
        Binding::FormField,
    ];

    /// Canonical marker name for this binding.
    pub fn marker_name(self) -> &'static str {
        match self {
            Binding::Request => "Request",
            Binding::Body => "Body",
            Binding::BodyProp => "BodyProp",
            Binding::Header => "Header",
            Binding::Query => "Query",
            Binding::Path => "Path",
            Binding::UploadedFile => "UploadedFile",
            Binding::UploadedFiles => "UploadedFiles",
            Binding::FormField => "FormField",
        }
    }

    /// Maps a marker name to its binding, ignoring case.
    pub fn from_marker_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|b| b.marker_name().eq_ignore_ascii_case(name))
    }

    /// The `in` value this binding serializes to.
    pub fn location(self) -> ParameterLocation {
        match self {
            Binding::Request => ParameterLocation::Request,
            Binding::Body => ParameterLocation::Body,
            Binding::BodyProp => ParameterLocation::BodyProp,
            Binding::Header => ParameterLocation::Header,
            Binding::Query => ParameterLocation::Query,
            Binding::Path => ParameterLocation::Path,
            Binding::UploadedFile | Binding::UploadedFiles | Binding::FormField => {
                ParameterLocation::FormData
            }
        }
    }
}

/// Parameter location as written to the descriptor's `in` field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterLocation {
    #[serde(rename = "request")]
    Request,
    #[serde(rename = "body")]
    Body,
    #[serde(rename = "body-prop")]
    BodyProp,
    #[serde(rename = "header")]
    Header,
    #[serde(rename = "query")]
    Query,
    #[serde(rename = "path")]
    Path,
    #[serde(rename = "formData")]
    FormData,
}

impl ParameterLocation {
    pub fn as_str(self) -> &'static str {
        match self {
            ParameterLocation::Request => "request",
            ParameterLocation::Body => "body",
            ParameterLocation::BodyProp => "body-prop",
            ParameterLocation::Header => "header",
            ParameterLocation::Query => "query",
            ParameterLocation::Path => "path",
            ParameterLocation::FormData => "formData",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_marker_name_ignores_case() {
        assert_eq!(Binding::from_marker_name("Query"), Some(Binding::Query));
        assert_eq!(Binding::from_marker_name("query"), Some(Binding::Query));
        assert_eq!(Binding::from_marker_name("QUERY"), Some(Binding::Query));
        assert_eq!(Binding::from_marker_name("bodyprop"), Some(Binding::BodyProp));
        assert_eq!(Binding::from_marker_name("Deprecated"), None);
    }

    #[test]
    fn test_from_marker_name_distinguishes_file_and_files() {
        assert_eq!(
            Binding::from_marker_name("UploadedFile"),
            Some(Binding::UploadedFile)
        );
        assert_eq!(
            Binding::from_marker_name("uploadedfiles"),
            Some(Binding::UploadedFiles)
        );
    }

    #[test]
    fn test_form_bindings_share_form_data_location() {
        for binding in [Binding::UploadedFile, Binding::UploadedFiles, Binding::FormField] {
            assert_eq!(binding.location(), ParameterLocation::FormData);
        }
        assert_eq!(Binding::BodyProp.location(), ParameterLocation::BodyProp);
    }

    #[test]
    fn test_location_serde_matches_as_str() {
        for binding in Binding::ALL {
            let location = binding.location();
            let json = serde_json::to_string(&location).unwrap();
            assert_eq!(json, format!("\"{}\"", location.as_str()));
        }
    }
}
