use crate::{
    client::PolarClient,
    error::PolarResult,
    models::{
        Event, ListResource, MetadataValue, Meter, MeterCreate, MeterQuantities, MeterSortProperty,
        MeterUpdate, TimeInterval,
    },
    operation::{BodyKind, HttpMethod, Operation, ResponseShape, DEFAULT_SECURITY},
    params::RequestParams,
    request::RequestOptions,
};
use chrono::{DateTime, Utc};
use log::{debug, info};
use std::collections::BTreeMap;

pub const CREATE: Operation = Operation {
    name: "create",
    resource: "meters",
    method: HttpMethod::Post,
    path: "/v1/meters/",
    required_query: &[],
    body: BodyKind::Required,
    response: ResponseShape::Json,
    security: DEFAULT_SECURITY,
};

pub const EVENTS: Operation = Operation {
    name: "events",
    resource: "meters",
    method: HttpMethod::Get,
    path: "/v1/meters/{id}/events",
    required_query: &[],
    body: BodyKind::None,
    response: ResponseShape::Json,
    security: DEFAULT_SECURITY,
};

pub const GET: Operation = Operation {
    name: "get",
    resource: "meters",
    method: HttpMethod::Get,
    path: "/v1/meters/{id}",
    required_query: &[],
    body: BodyKind::None,
    response: ResponseShape::Json,
    security: DEFAULT_SECURITY,
};

pub const LIST: Operation = Operation {
    name: "list",
    resource: "meters",
    method: HttpMethod::Get,
    path: "/v1/meters/",
    required_query: &[],
    body: BodyKind::None,
    response: ResponseShape::Json,
    security: DEFAULT_SECURITY,
};

pub const QUANTITIES: Operation = Operation {
    name: "quantities",
    resource: "meters",
    method: HttpMethod::Get,
    path: "/v1/meters/{id}/quantities",
    required_query: &["start_timestamp", "end_timestamp", "interval"],
    body: BodyKind::None,
    response: ResponseShape::Json,
    security: DEFAULT_SECURITY,
};

pub const UPDATE: Operation = Operation {
    name: "update",
    resource: "meters",
    method: HttpMethod::Patch,
    path: "/v1/meters/{id}",
    required_query: &[],
    body: BodyKind::Required,
    response: ResponseShape::Json,
    security: DEFAULT_SECURITY,
};

pub const OPERATIONS: &[Operation] = &[CREATE, EVENTS, GET, LIST, QUANTITIES, UPDATE];

#[derive(Debug, Clone, Default)]
pub struct MeterGetRequest {
    pub id: String,
}

/// Events matched by a meter, paginated
#[derive(Debug, Clone, Default)]
pub struct MeterEventsRequest {
    pub id: String,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// Filters for listing meters
#[derive(Debug, Clone, Default)]
pub struct MeterListRequest {
    pub organization_id: Option<Vec<String>>,
    pub query: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub sorting: Option<Vec<MeterSortProperty>>,
    /// Sent as `metadata[key]=value`, repeated per value
    pub metadata: Option<BTreeMap<String, Vec<MetadataValue>>>,
}

/// Aggregated quantities over `[start_timestamp, end_timestamp]`
#[derive(Debug, Clone)]
pub struct MeterQuantitiesRequest {
    pub id: String,
    pub start_timestamp: DateTime<Utc>,
    pub end_timestamp: DateTime<Utc>,
    pub interval: TimeInterval,
    pub customer_id: Option<Vec<String>>,
    pub external_customer_id: Option<Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct MeterUpdateRequest {
    pub id: String,
    pub body: MeterUpdate,
}

/// Meter API operations
pub struct MetersApi<'a> {
    client: &'a PolarClient,
    options: RequestOptions,
}

impl<'a> MetersApi<'a> {
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

    /// Create a meter
    ///
    /// # Arguments
    /// * `body` - Meter name, event filter and aggregation
    pub async fn create(self, body: &MeterCreate) -> PolarResult<Meter> {
        info!("Creating meter: {}", body.name);
        let params = RequestParams::new().body(body)?;
        debug!("HTTP POST /v1/meters/");
        debug!("Request body: {:?}", body);

        self.client.execute(&CREATE, params, self.options).await
    }

    /// Get events matching the filter of a meter
    ///
    /// # Arguments
    /// * `request` - Meter ID with optional `page` and `limit`
    pub async fn events(self, request: MeterEventsRequest) -> PolarResult<ListResource<Event>> {
        debug!("HTTP GET /v1/meters/{}/events", request.id);
        let params = RequestParams::new()
            .path("id", &request.id)
            .query("page", request.page)
            .query("limit", request.limit);

        self.client.execute(&EVENTS, params, self.options).await
    }

    /// Get a meter by ID
    pub async fn get(self, request: MeterGetRequest) -> PolarResult<Meter> {
        let params = RequestParams::new().path("id", &request.id);
        debug!("HTTP GET /v1/meters/{}", request.id);

        self.client.execute(&GET, params, self.options).await
    }

    /// List meters
    ///
    /// # Arguments
    /// * `request` - Filters; `metadata` entries are sent as
    ///   `metadata[key]=value`, once per value
    pub async fn list(self, request: MeterListRequest) -> PolarResult<ListResource<Meter>> {
        debug!("HTTP GET /v1/meters/ with {:?}", request);
        let params = RequestParams::new()
            .query("organization_id", request.organization_id)
            .query("query", request.query)
            .query("page", request.page)
            .query("limit", request.limit)
            .query("sorting", request.sorting)
            .query("metadata", request.metadata);

        self.client.execute(&LIST, params, self.options).await
    }

    /// Get quantities of a meter over a time period
    ///
    /// # Arguments
    /// * `request` - Meter ID, the required `[start, end]` window and bucket
    ///   interval, and optional customer filters
    pub async fn quantities(self, request: MeterQuantitiesRequest) -> PolarResult<MeterQuantities> {
        debug!(
            "Meter {} quantities from {} to {} per {}",
            request.id,
            request.start_timestamp,
            request.end_timestamp,
            request.interval.as_str()
        );
        let params = RequestParams::new()
            .path("id", &request.id)
            .query("start_timestamp", request.start_timestamp)
            .query("end_timestamp", request.end_timestamp)
            .query("interval", request.interval)
            .query("customer_id", request.customer_id)
            .query("external_customer_id", request.external_customer_id);

        self.client.execute(&QUANTITIES, params, self.options).await
    }

    /// Update a meter
    ///
    /// # Arguments
    /// * `request` - Meter ID and the fields to change
    pub async fn update(self, request: MeterUpdateRequest) -> PolarResult<Meter> {
        info!("Updating meter: {}", request.id);
        debug!("HTTP PATCH /v1/meters/{}", request.id);
        let params = RequestParams::new()
            .path("id", &request.id)
            .body(&request.body)?;

        self.client.execute(&UPDATE, params, self.options).await
    }
}
