use crate::{
    client::PolarClient,
    error::PolarResult,
    models::{
        ListResource, OrganizationAccessToken, OrganizationAccessTokenCreate,
        OrganizationAccessTokenCreateResponse, OrganizationAccessTokenUpdate,
    },
    operation::{BodyKind, HttpMethod, Operation, ResponseShape, DEFAULT_SECURITY},
    params::RequestParams,
    request::RequestOptions,
};
use log::{debug, info};

pub const CREATE: Operation = Operation {
    name: "create",
    resource: "organization_access_tokens",
    method: HttpMethod::Post,
    path: "/v1/organization-access-tokens/",
    required_query: &[],
    body: BodyKind::Required,
    response: ResponseShape::Json,
    security: DEFAULT_SECURITY,
};

pub const DELETE: Operation = Operation {
    name: "delete",
    resource: "organization_access_tokens",
    method: HttpMethod::Delete,
    path: "/v1/organization-access-tokens/{id}",
    required_query: &[],
    body: BodyKind::None,
    response: ResponseShape::Void,
    security: DEFAULT_SECURITY,
};

pub const LIST: Operation = Operation {
    name: "list",
    resource: "organization_access_tokens",
    method: HttpMethod::Get,
    path: "/v1/organization-access-tokens/",
    required_query: &[],
    body: BodyKind::None,
    response: ResponseShape::Json,
    security: DEFAULT_SECURITY,
};

pub const UPDATE: Operation = Operation {
    name: "update",
    resource: "organization_access_tokens",
    method: HttpMethod::Patch,
    path: "/v1/organization-access-tokens/{id}",
    required_query: &[],
    body: BodyKind::Required,
    response: ResponseShape::Json,
    security: DEFAULT_SECURITY,
};

pub const OPERATIONS: &[Operation] = &[CREATE, DELETE, LIST, UPDATE];

#[derive(Debug, Clone, Default)]
pub struct OrganizationAccessTokenListRequest {
    pub organization_id: Option<Vec<String>>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Default)]
pub struct OrganizationAccessTokenDeleteRequest {
    pub id: String,
}

#[derive(Debug, Clone)]
pub struct OrganizationAccessTokenUpdateRequest {
    pub id: String,
    pub body: OrganizationAccessTokenUpdate,
}

/// Organization access token API operations
pub struct OrganizationAccessTokensApi<'a> {
    client: &'a PolarClient,
    options: RequestOptions,
}

impl<'a> OrganizationAccessTokensApi<'a> {
    pub fn new(client: &'a PolarClient) -> Self {
        Self {
            client,
            options: RequestOptions::default(),
        }
    }

    /// Send the call with extra headers or an abort handle
    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    /// Create a token. The secret is only returned here.
    ///
    /// # Arguments
    /// * `body` - Comment, scopes and optional expiry
    pub async fn create(
        self,
        body: &OrganizationAccessTokenCreate,
    ) -> PolarResult<OrganizationAccessTokenCreateResponse> {
        info!("Creating organization access token: {}", body.comment);
        let params = RequestParams::new().body(body)?;
        debug!("HTTP POST /v1/organization-access-tokens/");

        self.client.execute(&CREATE, params, self.options).await
    }

    /// Revoke a token
    ///
    /// # Arguments
    /// * `request` - Token ID
    pub async fn delete(self, request: OrganizationAccessTokenDeleteRequest) -> PolarResult<()> {
        info!("Deleting organization access token: {}", request.id);
        let params = RequestParams::new().path("id", &request.id);
        debug!("HTTP DELETE /v1/organization-access-tokens/{}", request.id);

        self.client.execute(&DELETE, params, self.options).await
    }

    /// List organization access tokens
    pub async fn list(
        self,
        request: OrganizationAccessTokenListRequest,
    ) -> PolarResult<ListResource<OrganizationAccessToken>> {
        debug!("HTTP GET /v1/organization-access-tokens/ with {:?}", request);
        let params = RequestParams::new()
            .query("organization_id", request.organization_id)
            .query("page", request.page)
            .query("limit", request.limit);

        self.client.execute(&LIST, params, self.options).await
    }

    /// Update the comment or scopes of a token
    ///
    /// # Arguments
    /// * `request` - Token ID and the fields to change
    pub async fn update(
        self,
        request: OrganizationAccessTokenUpdateRequest,
    ) -> PolarResult<OrganizationAccessToken> {
        info!("Updating organization access token: {}", request.id);
        debug!("HTTP PATCH /v1/organization-access-tokens/{}", request.id);
        let params = RequestParams::new()
            .path("id", &request.id)
            .body(&request.body)?;

        self.client.execute(&UPDATE, params, self.options).await
    }
}
