use crate::{
    client::PolarClient,
    error::PolarResult,
    models::{ListResource, PersonalAccessToken},
    operation::{BodyKind, HttpMethod, Operation, ResponseShape, DEFAULT_SECURITY},
    params::RequestParams,
    request::RequestOptions,
};
use log::{debug, info};

pub const LIST: Operation = Operation {
    name: "list",
    resource: "personal_access_tokens",
    method: HttpMethod::Get,
    path: "/v1/personal_access_tokens",
    required_query: &[],
    body: BodyKind::None,
    response: ResponseShape::Json,
    security: DEFAULT_SECURITY,
};

pub const DELETE: Operation = Operation {
    name: "delete",
    resource: "personal_access_tokens",
    method: HttpMethod::Delete,
    path: "/v1/personal_access_tokens/{id}",
    required_query: &[],
    body: BodyKind::None,
    response: ResponseShape::Void,
    security: DEFAULT_SECURITY,
};

pub const OPERATIONS: &[Operation] = &[LIST, DELETE];

#[derive(Debug, Clone, Default)]
pub struct PersonalAccessTokenListRequest {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Default)]
pub struct PersonalAccessTokenDeleteRequest {
    pub id: String,
}

/// Personal access token API operations
pub struct PersonalAccessTokensApi<'a> {
    client: &'a PolarClient,
    options: RequestOptions,
}

impl<'a> PersonalAccessTokensApi<'a> {
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

    /// List personal access tokens of the authenticated user
    pub async fn list(
        self,
        request: PersonalAccessTokenListRequest,
    ) -> PolarResult<ListResource<PersonalAccessToken>> {
        debug!("HTTP GET /v1/personal_access_tokens with {:?}", request);
        let params = RequestParams::new()
            .query("page", request.page)
            .query("limit", request.limit);

        self.client.execute(&LIST, params, self.options).await
    }

    /// Revoke a personal access token
    ///
    /// # Arguments
    /// * `request` - Token ID
    pub async fn delete(self, request: PersonalAccessTokenDeleteRequest) -> PolarResult<()> {
        info!("Deleting personal access token: {}", request.id);
        let params = RequestParams::new().path("id", &request.id);
        debug!("HTTP DELETE /v1/personal_access_tokens/{}", request.id);

        self.client.execute(&DELETE, params, self.options).await
    }
}
