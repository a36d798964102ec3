//! Static descriptions of API operations.
//!
//! Every resource module declares its operations as `const` [`Operation`]
//! values. The request engine in [`crate::request`] is driven entirely by
//! these tables, so the façades only translate typed arguments into
//! [`crate::params::RequestParams`].

use crate::auth::CredentialScheme;

/// HTTP verbs used by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn to_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Patch => reqwest::Method::PATCH,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Whether an operation carries a JSON body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    None,
    Required,
    Optional,
}

/// What a successful response decodes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// A JSON object or array
    Json,
    /// No body is read (e.g. 204 on delete)
    Void,
}

/// Schemes the generated client tries for every authenticated operation
pub const DEFAULT_SECURITY: &[CredentialScheme] = &[
    CredentialScheme::PersonalAccessToken,
    CredentialScheme::OrganizationAccessToken,
];

/// One API call: method, templated path, parameters and response shape.
#[derive(Debug, Clone, Copy)]
pub struct Operation {
    /// Method name reported in errors, e.g. `"get"`
    pub name: &'static str,
    /// Resource the operation belongs to, e.g. `"meters"`
    pub resource: &'static str,
    pub method: HttpMethod,
    /// Path with `{param}` placeholders, e.g. `/v1/meters/{id}`
    pub path: &'static str,
    /// Query parameters that must be present
    pub required_query: &'static [&'static str],
    pub body: BodyKind,
    pub response: ResponseShape,
    /// Credential schemes, in the order they are tried
    pub security: &'static [CredentialScheme],
}

impl Operation {
    /// Placeholder names in the path template, in order of appearance
    pub fn path_params(&self) -> impl Iterator<Item = &'static str> {
        let path: &'static str = self.path;
        path.split('{')
            .skip(1)
            .filter_map(|segment| segment.split_once('}').map(|(name, _)| name))
    }

    /// `resource.name`, used in log lines
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.resource, self.name)
    }
}
