use crate::{
    client::PolarClient,
    error::{PolarError, PolarResult},
    models::{OrganizationBillingPlan, OrganizationCheckPermissionsInput},
    operation::{BodyKind, HttpMethod, Operation, ResponseShape, DEFAULT_SECURITY},
    params::RequestParams,
    request::RequestOptions,
};
use log::debug;

pub const CHECK_ORGANIZATION_PERMISSIONS: Operation = Operation {
    name: "check_organization_permissions",
    resource: "integrations_github",
    method: HttpMethod::Post,
    path: "/v1/integrations/github/organizations/{id}/check-permissions",
    required_query: &[],
    body: BodyKind::Required,
    response: ResponseShape::Void,
    security: DEFAULT_SECURITY,
};

pub const GET_ORGANIZATION_BILLING_PLAN: Operation = Operation {
    name: "get_organization_billing_plan",
    resource: "integrations_github",
    method: HttpMethod::Get,
    path: "/v1/integrations/github/organizations/{id}/billing",
    required_query: &[],
    body: BodyKind::None,
    response: ResponseShape::Json,
    security: DEFAULT_SECURITY,
};

pub const OPERATIONS: &[Operation] = &[
    CHECK_ORGANIZATION_PERMISSIONS,
    GET_ORGANIZATION_BILLING_PLAN,
];

#[derive(Debug, Clone, Default)]
pub struct CheckOrganizationPermissionsRequest {
    pub id: String,
    pub body: OrganizationCheckPermissionsInput,
}

#[derive(Debug, Clone, Default)]
pub struct OrganizationBillingPlanRequest {
    pub id: String,
}

/// GitHub integration API operations
pub struct IntegrationsGithubApi<'a> {
    client: &'a PolarClient,
    options: RequestOptions,
}

impl<'a> IntegrationsGithubApi<'a> {
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

    /// Succeeds when the installation holds the permissions, 403 otherwise
    ///
    /// # Arguments
    /// * `request` - Organization ID and the app permissions to check
    pub async fn check_organization_permissions(
        self,
        request: CheckOrganizationPermissionsRequest,
    ) -> PolarResult<()> {
        debug!(
            "HTTP POST /v1/integrations/github/organizations/{}/check-permissions",
            request.id
        );
        let params = RequestParams::new()
            .path("id", &request.id)
            .body(&request.body)?;

        self.client
            .execute(&CHECK_ORGANIZATION_PERMISSIONS, params, self.options)
            .await
    }

    /// Like [`Self::check_organization_permissions`], with 403 reported as
    /// `Ok(false)`. Every other failure is returned unchanged.
    pub async fn has_organization_permissions(
        self,
        request: CheckOrganizationPermissionsRequest,
    ) -> PolarResult<bool> {
        match self.check_organization_permissions(request).await {
            Ok(()) => Ok(true),
            Err(err @ PolarError::Response(_)) if err.is_forbidden() => {
                debug!("permission check denied: {}", err);
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    /// Get the GitHub billing plan of an organization
    ///
    /// # Arguments
    /// * `request` - Organization ID
    pub async fn get_organization_billing_plan(
        self,
        request: OrganizationBillingPlanRequest,
    ) -> PolarResult<OrganizationBillingPlan> {
        let params = RequestParams::new().path("id", &request.id);
        debug!("HTTP GET /v1/integrations/github/organizations/{}/billing", request.id);

        self.client
            .execute(&GET_ORGANIZATION_BILLING_PLAN, params, self.options)
            .await
    }
}
