use polar_client::integrations_github::{
    CheckOrganizationPermissionsRequest, OrganizationBillingPlanRequest,
};
use polar_client::{
    AppPermissions, GithubBillingPlan, OrganizationCheckPermissionsInput, PermissionLevel,
    PolarClient, StaticToken,
};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_test_client(server: &MockServer) -> PolarClient {
    PolarClient::new(server.uri(), StaticToken::new("polar_pat_test"))
        .expect("Failed to create client")
}

fn permissions_request(id: &str) -> CheckOrganizationPermissionsRequest {
    CheckOrganizationPermissionsRequest {
        id: id.to_string(),
        body: OrganizationCheckPermissionsInput {
            permissions: AppPermissions {
                administration: Some(PermissionLevel::Read),
                issues: Some(PermissionLevel::Write),
                ..Default::default()
            },
        },
    }
}

#[tokio::test]
async fn test_permission_check_granted() {
    let _ = env_logger::try_init();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/integrations/github/organizations/org_1/check-permissions"))
        .and(body_json(json!({
            "permissions": { "administration": "read", "issues": "write" }
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let granted = client
        .integrations_github()
        .has_organization_permissions(permissions_request("org_1"))
        .await
        .expect("Permission check failed");

    assert!(granted);
}

#[tokio::test]
async fn test_permission_check_forbidden_is_false() {
    let _ = env_logger::try_init();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/integrations/github/organizations/org_1/check-permissions"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({ "detail": "Missing permissions" })))
        .expect(2)
        .mount(&server)
        .await;

    let client = create_test_client(&server);

    let granted = client
        .integrations_github()
        .has_organization_permissions(permissions_request("org_1"))
        .await
        .expect("403 should map to false");
    assert!(!granted);

    let err = client
        .integrations_github()
        .check_organization_permissions(permissions_request("org_1"))
        .await
        .expect_err("The raw call still reports 403");
    assert!(err.is_forbidden());
}

#[tokio::test]
async fn test_permission_check_other_errors_propagate() {
    let _ = env_logger::try_init();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/integrations/github/organizations/org_1/check-permissions"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let err = client
        .integrations_github()
        .has_organization_permissions(permissions_request("org_1"))
        .await
        .expect_err("500 must not be swallowed");

    assert_eq!(err.status().map(|s| s.as_u16()), Some(500));
}

#[tokio::test]
async fn test_billing_plan() {
    let _ = env_logger::try_init();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/integrations/github/organizations/org_1/billing"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "organization_id": "org_1",
            "plan": "team",
            "is_free": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let plan = client
        .integrations_github()
        .get_organization_billing_plan(OrganizationBillingPlanRequest { id: "org_1".to_string() })
        .await
        .expect("Failed to get billing plan");

    assert_eq!(plan.plan, GithubBillingPlan::Team);
    assert!(!plan.is_free);
}
