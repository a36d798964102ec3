//! Turns an [`Operation`] and its [`RequestParams`] into a ready-to-send
//! request. Nothing here touches the network.

use crate::{
    auth::{apply_bearer, resolve_bearer, CredentialPolicy, CredentialProvider},
    error::{PolarError, PolarResult},
    operation::{BodyKind, Operation},
    params::RequestParams,
};
use futures_util::future::AbortRegistration;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use url::Url;

/// Caller-supplied options for a single call
#[derive(Debug, Default)]
pub struct RequestOptions {
    pub(crate) headers: HeaderMap,
    pub(crate) abort: Option<AbortRegistration>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a custom header; repeating a name sends every value.
    /// `Content-Type` and `Authorization` computed for the operation take
    /// precedence over headers set here.
    pub fn header(mut self, name: &str, value: &str) -> PolarResult<Self> {
        let name = HeaderName::try_from(name)
            .map_err(|e| PolarError::invalid_param(format!("invalid header name: {}", e)))?;
        let value = HeaderValue::try_from(value)
            .map_err(|e| PolarError::invalid_param(format!("invalid header value: {}", e)))?;
        self.headers.append(name, value);
        Ok(self)
    }

    /// Merge a whole header map
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Abort the in-flight request when the paired `AbortHandle` fires
    pub fn abort_registration(mut self, registration: AbortRegistration) -> Self {
        self.abort = Some(registration);
        self
    }
}

/// A fully built request: method, URL, headers and serialized body
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub operation: Operation,
    pub method: reqwest::Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

/// Check required parameters before anything else happens
pub fn validate(op: &Operation, params: &RequestParams) -> PolarResult<()> {
    for name in op.path_params() {
        match params.path_value(name) {
            None => return Err(PolarError::missing_param(name, op.name)),
            // URL parsing resolves dot segments even when percent-encoded
            Some("." | "..") => {
                return Err(PolarError::invalid_param(format!(
                    "path parameter \"{}\" of {}() cannot be \".\" or \"..\"",
                    name, op.name
                )))
            }
            Some(_) => {}
        }
    }

    for name in op.required_query {
        if !params.has_query(name) {
            return Err(PolarError::missing_param(*name, op.name));
        }
    }

    if op.body == BodyKind::Required && params.body.is_none() {
        return Err(PolarError::missing_param("body", op.name));
    }

    Ok(())
}

/// Substitute every `{placeholder}` with its percent-encoded value
pub fn render_path(op: &Operation, params: &RequestParams) -> PolarResult<String> {
    let mut rendered = String::with_capacity(op.path.len());
    let mut rest: &'static str = op.path;

    while let Some(start) = rest.find('{') {
        let end = rest[start..]
            .find('}')
            .map(|offset| start + offset)
            .ok_or_else(|| PolarError::invalid_param(format!("unterminated placeholder in {}", op.path)))?;
        let name = &rest[start + 1..end];
        let value = params
            .path_value(name)
            .ok_or_else(|| PolarError::missing_param(name, op.name))?;

        rendered.push_str(&rest[..start]);
        rendered.push_str(&urlencoding::encode(value));
        rest = &rest[end + 1..];
    }
    rendered.push_str(rest);

    Ok(rendered)
}

/// Join the base URL (which may carry a path prefix) with a rendered path
pub fn build_url(base_url: &Url, path: &str, params: &RequestParams) -> PolarResult<Url> {
    let base = base_url.as_str().trim_end_matches('/');
    let mut url = Url::parse(&format!("{}{}", base, path))?;

    let pairs = params.query_pairs();
    if !pairs.is_empty() {
        let mut query = url.query_pairs_mut();
        for (key, value) in &pairs {
            query.append_pair(key, value);
        }
    }

    Ok(url)
}

/// Build the request for `op`.
///
/// Validation runs first, so a missing parameter never reaches the
/// credential provider or the network.
pub async fn prepare(
    op: &Operation,
    params: &RequestParams,
    base_url: &Url,
    default_headers: &HeaderMap,
    options: &RequestOptions,
    provider: &dyn CredentialProvider,
    policy: CredentialPolicy,
) -> PolarResult<PreparedRequest> {
    validate(op, params)?;

    let path = render_path(op, params)?;
    let url = build_url(base_url, &path, params)?;

    // Caller values replace defaults of the same name, keeping every value
    let mut headers = default_headers.clone();
    headers.extend(options.headers.clone());

    let body = match (&op.body, &params.body) {
        (BodyKind::None, _) | (_, None) => {
            headers.remove(CONTENT_TYPE);
            None
        }
        (_, Some(value)) => {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            Some(serde_json::to_vec(value)?)
        }
    };

    if let Some(token) = resolve_bearer(provider, op.security, policy).await? {
        apply_bearer(&mut headers, &token)?;
    }

    Ok(PreparedRequest {
        operation: *op,
        method: op.method.to_reqwest(),
        url,
        headers,
        body,
    })
}
