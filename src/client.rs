use crate::{
    apis::{
        DiscountsApi, IntegrationsGithubApi, MetersApi, OrganizationAccessTokensApi,
        OrganizationsApi, PersonalAccessTokensApi,
    },
    auth::{CredentialPolicy, CredentialProvider, NoCredentials},
    error::{PolarError, PolarResult, ResponseError},
    operation::{Operation, ResponseShape},
    params::RequestParams,
    request::{self, PreparedRequest, RequestOptions},
};
use bytes::Bytes;
use futures_util::future::Abortable;
use log::{debug, warn};
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue},
    Client, RequestBuilder, StatusCode,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use url::Url;

const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Hosted API environments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Production,
    Sandbox,
}

impl Environment {
    pub fn base_url(&self) -> &'static str {
        match self {
            Self::Production => "https://api.polar.sh",
            Self::Sandbox => "https://sandbox-api.polar.sh",
        }
    }
}

/// Builder for [`PolarClient`]
pub struct ClientBuilder {
    base_url: Option<String>,
    environment: Environment,
    credentials: Arc<dyn CredentialProvider>,
    policy: CredentialPolicy,
    default_headers: HeaderMap,
    user_agent: String,
    client: Option<Client>,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            environment: Environment::default(),
            credentials: Arc::new(NoCredentials),
            policy: CredentialPolicy::default(),
            default_headers: HeaderMap::new(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            client: None,
        }
    }
}

impl ClientBuilder {
    /// Use one of the hosted environments. Ignored when `base_url` is set.
    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Explicit base URL; may carry a path prefix
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn credentials(mut self, provider: impl CredentialProvider + 'static) -> Self {
        self.credentials = Arc::new(provider);
        self
    }

    /// Share an already-constructed provider
    pub fn shared_credentials(mut self, provider: Arc<dyn CredentialProvider>) -> Self {
        self.credentials = provider;
        self
    }

    pub fn credential_policy(mut self, policy: CredentialPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Header sent with every request
    pub fn default_header(mut self, name: &str, value: &str) -> PolarResult<Self> {
        let name = HeaderName::try_from(name)
            .map_err(|e| PolarError::invalid_param(format!("invalid header name: {}", e)))?;
        let value = HeaderValue::try_from(value)
            .map_err(|e| PolarError::invalid_param(format!("invalid header value: {}", e)))?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// Ignored when a custom `reqwest::Client` is supplied
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn http_client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    pub fn build(self) -> PolarResult<PolarClient> {
        let base_url = Url::parse(
            self.base_url
                .as_deref()
                .unwrap_or_else(|| self.environment.base_url()),
        )?;

        let client = match self.client {
            Some(client) => client,
            None => Client::builder().user_agent(self.user_agent).build()?,
        };

        Ok(PolarClient {
            client,
            base_url,
            credentials: self.credentials,
            policy: self.policy,
            default_headers: self.default_headers,
        })
    }
}

/// Main Polar API client.
///
/// Construct once at startup and clone freely; clones share the connection
/// pool and the credential provider. Tokens are looked up on every call.
#[derive(Clone)]
pub struct PolarClient {
    client: Client,
    base_url: Url,
    credentials: Arc<dyn CredentialProvider>,
    policy: CredentialPolicy,
    default_headers: HeaderMap,
}

impl PolarClient {
    /// Create a new client with a credential provider
    pub fn new(
        base_url: impl AsRef<str>,
        credentials: impl CredentialProvider + 'static,
    ) -> PolarResult<Self> {
        Self::builder()
            .base_url(base_url.as_ref())
            .credentials(credentials)
            .build()
    }

    /// Create a new client with custom reqwest client
    pub fn with_client(
        client: Client,
        base_url: impl AsRef<str>,
        credentials: impl CredentialProvider + 'static,
    ) -> PolarResult<Self> {
        Self::builder()
            .http_client(client)
            .base_url(base_url.as_ref())
            .credentials(credentials)
            .build()
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn credential_policy(&self) -> CredentialPolicy {
        self.policy
    }

    /// Get Discounts API
    pub fn discounts(&self) -> DiscountsApi<'_> {
        DiscountsApi::new(self)
    }

    /// Get Meters API
    pub fn meters(&self) -> MetersApi<'_> {
        MetersApi::new(self)
    }

    /// Get Organizations API
    pub fn organizations(&self) -> OrganizationsApi<'_> {
        OrganizationsApi::new(self)
    }

    /// Get Organization Access Tokens API
    pub fn organization_access_tokens(&self) -> OrganizationAccessTokensApi<'_> {
        OrganizationAccessTokensApi::new(self)
    }

    /// Get Personal Access Tokens API
    pub fn personal_access_tokens(&self) -> PersonalAccessTokensApi<'_> {
        PersonalAccessTokensApi::new(self)
    }

    /// Get GitHub integration API
    pub fn integrations_github(&self) -> IntegrationsGithubApi<'_> {
        IntegrationsGithubApi::new(self)
    }

    /// Build the request for `op` without sending it
    pub async fn prepare(
        &self,
        op: &Operation,
        params: &RequestParams,
        options: &RequestOptions,
    ) -> PolarResult<PreparedRequest> {
        request::prepare(
            op,
            params,
            &self.base_url,
            &self.default_headers,
            options,
            self.credentials.as_ref(),
            self.policy,
        )
        .await
    }

    /// Send one request and return the buffered envelope.
    ///
    /// Any non-2xx status becomes [`PolarError::Response`]; the client never
    /// retries. An abort registration in `options` covers the whole exchange,
    /// body read included.
    pub async fn send(
        &self,
        op: &Operation,
        params: RequestParams,
        options: RequestOptions,
    ) -> PolarResult<ApiResponse> {
        let prepared = self.prepare(op, &params, &options).await?;
        debug!("HTTP {} {}", prepared.method, prepared.url);

        let mut req = self
            .client
            .request(prepared.method, prepared.url)
            .headers(prepared.headers);
        if let Some(body) = prepared.body {
            req = req.body(body);
        }

        let exchange = Self::exchange(op, req);
        match options.abort {
            Some(registration) => Abortable::new(exchange, registration)
                .await
                .map_err(|_| PolarError::Aborted)?,
            None => exchange.await,
        }
    }

    /// Send and decode according to the operation's response shape
    pub async fn execute<T>(
        &self,
        op: &Operation,
        params: RequestParams,
        options: RequestOptions,
    ) -> PolarResult<T>
    where
        T: DeserializeOwned,
    {
        self.send(op, params, options).await?.value()
    }

    /// Send, classify the status and read the body
    async fn exchange(op: &Operation, req: RequestBuilder) -> PolarResult<ApiResponse> {
        let response = req.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        debug!("{} -> {}", op.qualified_name(), status);

        if !status.is_success() {
            let body = match response.bytes().await {
                Ok(body) => body,
                Err(err) => {
                    warn!("Failed to read {} error body: {}", op.qualified_name(), err);
                    Bytes::new()
                }
            };
            return Err(ResponseError::new(op.name, status, headers, body).into());
        }

        let body = match op.response {
            ResponseShape::Json => response.bytes().await?,
            ResponseShape::Void => Bytes::new(),
        };

        Ok(ApiResponse {
            operation: *op,
            status,
            headers,
            body,
        })
    }
}

/// A successful response with its body already read
#[derive(Debug, Clone)]
pub struct ApiResponse {
    operation: Operation,
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl ApiResponse {
    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Raw body; always empty for void operations
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Decode the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> PolarResult<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Decode per the declared shape; void operations decode from `null`
    pub fn value<T: DeserializeOwned>(&self) -> PolarResult<T> {
        match self.operation.response {
            ResponseShape::Json => self.json(),
            ResponseShape::Void => Ok(serde_json::from_value(serde_json::Value::Null)?),
        }
    }

    pub fn into_body(self) -> Bytes {
        self.body
    }
}
