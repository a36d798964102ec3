use crate::{
    client::PolarClient,
    error::PolarResult,
    models::{Discount, DiscountCreate, DiscountSortProperty, DiscountUpdate, ListResource},
    operation::{BodyKind, HttpMethod, Operation, ResponseShape, DEFAULT_SECURITY},
    params::RequestParams,
    request::RequestOptions,
};
use log::{debug, info};

pub const CREATE: Operation = Operation {
    name: "create",
    resource: "discounts",
    method: HttpMethod::Post,
    path: "/v1/discounts/",
    required_query: &[],
    body: BodyKind::Required,
    response: ResponseShape::Json,
    security: DEFAULT_SECURITY,
};

pub const DELETE: Operation = Operation {
    name: "delete",
    resource: "discounts",
    method: HttpMethod::Delete,
    path: "/v1/discounts/{id}",
    required_query: &[],
    body: BodyKind::None,
    response: ResponseShape::Void,
    security: DEFAULT_SECURITY,
};

pub const GET: Operation = Operation {
    name: "get",
    resource: "discounts",
    method: HttpMethod::Get,
    path: "/v1/discounts/{id}",
    required_query: &[],
    body: BodyKind::None,
    response: ResponseShape::Json,
    security: DEFAULT_SECURITY,
};

pub const LIST: Operation = Operation {
    name: "list",
    resource: "discounts",
    method: HttpMethod::Get,
    path: "/v1/discounts/",
    required_query: &[],
    body: BodyKind::None,
    response: ResponseShape::Json,
    security: DEFAULT_SECURITY,
};

pub const UPDATE: Operation = Operation {
    name: "update",
    resource: "discounts",
    method: HttpMethod::Patch,
    path: "/v1/discounts/{id}",
    required_query: &[],
    body: BodyKind::Required,
    response: ResponseShape::Json,
    security: DEFAULT_SECURITY,
};

pub const OPERATIONS: &[Operation] = &[CREATE, DELETE, GET, LIST, UPDATE];

#[derive(Debug, Clone, Default)]
pub struct DiscountGetRequest {
    pub id: String,
}

#[derive(Debug, Clone, Default)]
pub struct DiscountDeleteRequest {
    pub id: String,
}

/// Filters for listing discounts
#[derive(Debug, Clone, Default)]
pub struct DiscountListRequest {
    /// One or more organization IDs
    pub organization_id: Option<Vec<String>>,
    /// Filter by name
    pub query: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub sorting: Option<Vec<DiscountSortProperty>>,
}

#[derive(Debug, Clone)]
pub struct DiscountUpdateRequest {
    pub id: String,
    pub body: DiscountUpdate,
}

/// Discount API operations
pub struct DiscountsApi<'a> {
    client: &'a PolarClient,
    options: RequestOptions,
}

impl<'a> DiscountsApi<'a> {
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

    /// Create a discount
    ///
    /// # Arguments
    /// * `body` - Discount definition (fixed or percentage, duration, limits)
    pub async fn create(self, body: &DiscountCreate) -> PolarResult<Discount> {
        info!("Creating discount: {}", body.name);
        let params = RequestParams::new().body(body)?;
        debug!("HTTP POST /v1/discounts/");
        debug!("Request body: {:?}", body);

        self.client.execute(&CREATE, params, self.options).await
    }

    /// Delete a discount
    ///
    /// # Arguments
    /// * `request` - ID of the discount to delete
    pub async fn delete(self, request: DiscountDeleteRequest) -> PolarResult<()> {
        info!("Deleting discount: {}", request.id);
        let params = RequestParams::new().path("id", &request.id);
        debug!("HTTP DELETE /v1/discounts/{}", request.id);

        self.client.execute(&DELETE, params, self.options).await
    }

    /// Get a discount by ID
    ///
    /// # Arguments
    /// * `request` - Discount ID
    pub async fn get(self, request: DiscountGetRequest) -> PolarResult<Discount> {
        let params = RequestParams::new().path("id", &request.id);
        debug!("HTTP GET /v1/discounts/{}", request.id);

        self.client.execute(&GET, params, self.options).await
    }

    /// List discounts
    ///
    /// # Arguments
    /// * `request` - Organization and name filters, paging and sort order.
    ///   Unset filters are left out of the query string.
    pub async fn list(self, request: DiscountListRequest) -> PolarResult<ListResource<Discount>> {
        debug!("HTTP GET /v1/discounts/ with {:?}", request);
        let params = RequestParams::new()
            .query("organization_id", request.organization_id)
            .query("query", request.query)
            .query("page", request.page)
            .query("limit", request.limit)
            .query("sorting", request.sorting);

        self.client.execute(&LIST, params, self.options).await
    }

    /// Update a discount
    ///
    /// # Arguments
    /// * `request` - Discount ID and the fields to change
    pub async fn update(self, request: DiscountUpdateRequest) -> PolarResult<Discount> {
        info!("Updating discount: {}", request.id);
        debug!("HTTP PATCH /v1/discounts/{}", request.id);
        let params = RequestParams::new()
            .path("id", &request.id)
            .body(&request.body)?;

        self.client.execute(&UPDATE, params, self.options).await
    }
}
