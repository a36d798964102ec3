use crate::{
    client::PolarClient,
    error::PolarResult,
    models::{
        Account, ListResource, Organization, OrganizationBadgeSettingsRead,
        OrganizationBadgeSettingsUpdate, OrganizationCreate, OrganizationMember,
        OrganizationSortProperty, OrganizationUpdate,
    },
    operation::{BodyKind, HttpMethod, Operation, ResponseShape, DEFAULT_SECURITY},
    params::RequestParams,
    request::RequestOptions,
};
use log::{debug, info};

pub const CREATE: Operation = Operation {
    name: "create",
    resource: "organizations",
    method: HttpMethod::Post,
    path: "/v1/organizations/",
    required_query: &[],
    body: BodyKind::Required,
    response: ResponseShape::Json,
    security: DEFAULT_SECURITY,
};

pub const GET: Operation = Operation {
    name: "get",
    resource: "organizations",
    method: HttpMethod::Get,
    path: "/v1/organizations/{id}",
    required_query: &[],
    body: BodyKind::None,
    response: ResponseShape::Json,
    security: DEFAULT_SECURITY,
};

pub const LIST: Operation = Operation {
    name: "list",
    resource: "organizations",
    method: HttpMethod::Get,
    path: "/v1/organizations/",
    required_query: &[],
    body: BodyKind::None,
    response: ResponseShape::Json,
    security: DEFAULT_SECURITY,
};

pub const UPDATE: Operation = Operation {
    name: "update",
    resource: "organizations",
    method: HttpMethod::Patch,
    path: "/v1/organizations/{id}",
    required_query: &[],
    body: BodyKind::Required,
    response: ResponseShape::Json,
    security: DEFAULT_SECURITY,
};

pub const MEMBERS: Operation = Operation {
    name: "members",
    resource: "organizations",
    method: HttpMethod::Get,
    path: "/v1/organizations/{id}/members",
    required_query: &[],
    body: BodyKind::None,
    response: ResponseShape::Json,
    security: DEFAULT_SECURITY,
};

pub const GET_ACCOUNT: Operation = Operation {
    name: "get_account",
    resource: "organizations",
    method: HttpMethod::Get,
    path: "/v1/organizations/{id}/account",
    required_query: &[],
    body: BodyKind::None,
    response: ResponseShape::Json,
    security: DEFAULT_SECURITY,
};

pub const GET_BADGE_SETTINGS: Operation = Operation {
    name: "get_badge_settings",
    resource: "organizations",
    method: HttpMethod::Get,
    path: "/v1/organizations/{id}/badge_settings",
    required_query: &[],
    body: BodyKind::None,
    response: ResponseShape::Json,
    security: DEFAULT_SECURITY,
};

pub const UPDATE_BADGE_SETTINGS: Operation = Operation {
    name: "update_badge_settings",
    resource: "organizations",
    method: HttpMethod::Post,
    path: "/v1/organizations/{id}/badge_settings",
    required_query: &[],
    body: BodyKind::Required,
    response: ResponseShape::Json,
    security: DEFAULT_SECURITY,
};

pub const OPERATIONS: &[Operation] = &[
    CREATE,
    GET,
    LIST,
    UPDATE,
    MEMBERS,
    GET_ACCOUNT,
    GET_BADGE_SETTINGS,
    UPDATE_BADGE_SETTINGS,
];

/// Path-only request shared by the `{id}` lookups
#[derive(Debug, Clone, Default)]
pub struct OrganizationIdRequest {
    pub id: String,
}

impl OrganizationIdRequest {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

#[derive(Debug, Clone, Default)]
pub struct OrganizationListRequest {
    pub slug: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub sorting: Option<Vec<OrganizationSortProperty>>,
}

#[derive(Debug, Clone)]
pub struct OrganizationUpdateRequest {
    pub id: String,
    pub body: OrganizationUpdate,
}

#[derive(Debug, Clone)]
pub struct OrganizationBadgeSettingsUpdateRequest {
    pub id: String,
    pub body: OrganizationBadgeSettingsUpdate,
}

/// Organization API operations
pub struct OrganizationsApi<'a> {
    client: &'a PolarClient,
    options: RequestOptions,
}

impl<'a> OrganizationsApi<'a> {
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

    /// Create an organization
    ///
    /// # Arguments
    /// * `body` - Name, slug and optional profile fields
    pub async fn create(self, body: &OrganizationCreate) -> PolarResult<Organization> {
        info!("Creating organization: {}", body.slug);
        let params = RequestParams::new().body(body)?;
        debug!("HTTP POST /v1/organizations/");
        debug!("Request body: {:?}", body);

        self.client.execute(&CREATE, params, self.options).await
    }

    /// Get an organization by ID
    ///
    /// # Arguments
    /// * `request` - Organization ID
    pub async fn get(self, request: OrganizationIdRequest) -> PolarResult<Organization> {
        let params = RequestParams::new().path("id", &request.id);
        debug!("HTTP GET /v1/organizations/{}", request.id);

        self.client.execute(&GET, params, self.options).await
    }

    /// List organizations visible to the credentials
    pub async fn list(
        self,
        request: OrganizationListRequest,
    ) -> PolarResult<ListResource<Organization>> {
        debug!("HTTP GET /v1/organizations/ with {:?}", request);
        let params = RequestParams::new()
            .query("slug", request.slug)
            .query("page", request.page)
            .query("limit", request.limit)
            .query("sorting", request.sorting);

        self.client.execute(&LIST, params, self.options).await
    }

    /// Update an organization
    ///
    /// # Arguments
    /// * `request` - Organization ID and the fields to change
    pub async fn update(self, request: OrganizationUpdateRequest) -> PolarResult<Organization> {
        info!("Updating organization: {}", request.id);
        debug!("HTTP PATCH /v1/organizations/{}", request.id);
        let params = RequestParams::new()
            .path("id", &request.id)
            .body(&request.body)?;

        self.client.execute(&UPDATE, params, self.options).await
    }

    /// List members of an organization
    pub async fn members(
        self,
        request: OrganizationIdRequest,
    ) -> PolarResult<ListResource<OrganizationMember>> {
        let params = RequestParams::new().path("id", &request.id);
        debug!("HTTP GET /v1/organizations/{}/members", request.id);

        self.client.execute(&MEMBERS, params, self.options).await
    }

    /// Get the payout account of an organization
    ///
    /// # Arguments
    /// * `request` - Organization ID
    pub async fn get_account(self, request: OrganizationIdRequest) -> PolarResult<Account> {
        let params = RequestParams::new().path("id", &request.id);
        debug!("HTTP GET /v1/organizations/{}/account", request.id);

        self.client.execute(&GET_ACCOUNT, params, self.options).await
    }

    /// Get the repository badge settings of an organization
    ///
    /// # Arguments
    /// * `request` - Organization ID
    pub async fn get_badge_settings(
        self,
        request: OrganizationIdRequest,
    ) -> PolarResult<OrganizationBadgeSettingsRead> {
        let params = RequestParams::new().path("id", &request.id);
        debug!("HTTP GET /v1/organizations/{}/badge_settings", request.id);

        self.client.execute(&GET_BADGE_SETTINGS, params, self.options).await
    }

    /// Update badge settings for the organization and its repositories
    ///
    /// # Arguments
    /// * `request` - Organization ID and the new badge settings
    pub async fn update_badge_settings(
        self,
        request: OrganizationBadgeSettingsUpdateRequest,
    ) -> PolarResult<Organization> {
        info!("Updating badge settings of organization: {}", request.id);
        debug!("HTTP POST /v1/organizations/{}/badge_settings", request.id);
        let params = RequestParams::new()
            .path("id", &request.id)
            .body(&request.body)?;

        self.client.execute(&UPDATE_BADGE_SETTINGS, params, self.options).await
    }
}
