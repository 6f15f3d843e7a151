//! Integration tests for the WorkOS organizations client using wiremock.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use terraform_provider_workos::error::{ApiError, ProviderError};
use terraform_provider_workos::workos::{
    CreateOrganizationOpts, DeleteOrganizationOpts, GetOrganizationOpts, ListOrder,
    ListOrganizationsOpts, OrganizationsApi, OrganizationsClient, UpdateOrganizationOpts,
};

// =============================================================================
// Test Helpers
// =============================================================================

fn client(server: &MockServer) -> OrganizationsClient {
    OrganizationsClient::new("sk_test_123")
        .unwrap()
        .with_endpoint(&server.uri())
}

fn organization_body(name: &str, domains: &[(&str, &str)]) -> serde_json::Value {
    json!({
        "object": "organization",
        "id": "org_01EHZNVPK3SFK441A1RGBFSHRT",
        "name": name,
        "allow_profiles_outside_organization": false,
        "domains": domains
            .iter()
            .map(|(id, domain)| json!({ "object": "organization_domain", "id": id, "domain": domain }))
            .collect::<Vec<_>>(),
        "created_at": "2021-06-25T19:07:33.155Z",
        "updated_at": "2021-06-25T19:07:33.155Z"
    })
}

// =============================================================================
// CRUD Tests
// =============================================================================

#[tokio::test]
async fn test_create_organization() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/organizations"))
        .and(header("authorization", "Bearer sk_test_123"))
        .and(body_json(json!({
            "name": "Acme",
            "allow_profiles_outside_organization": false,
            "domains": ["acme.com"]
        })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(organization_body("Acme", &[("org_domain_1", "acme.com")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let organization = client(&server)
        .create_organization(&CreateOrganizationOpts {
            name: String::from("Acme"),
            allow_profiles_outside_organization: false,
            domains: vec![String::from("acme.com")],
        })
        .await
        .unwrap();

    assert_eq!(organization.id, "org_01EHZNVPK3SFK441A1RGBFSHRT");
    assert_eq!(organization.domains[0].domain, "acme.com");
    assert_eq!(organization.domains[0].id, "org_domain_1");
}

#[tokio::test]
async fn test_get_organization() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/organizations/org_01EHZNVPK3SFK441A1RGBFSHRT"))
        .respond_with(ResponseTemplate::new(200).set_body_json(organization_body("Acme", &[])))
        .mount(&server)
        .await;

    let organization = client(&server)
        .get_organization(&GetOrganizationOpts {
            organization: String::from("org_01EHZNVPK3SFK441A1RGBFSHRT"),
        })
        .await
        .unwrap();

    assert_eq!(organization.name, "Acme");
    assert!(organization.domains.is_empty());
}

#[tokio::test]
async fn test_get_organization_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/organizations/org_404"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "Organization not found: 'org_404'."
        })))
        .mount(&server)
        .await;

    let error = client(&server)
        .get_organization(&GetOrganizationOpts {
            organization: String::from("org_404"),
        })
        .await
        .unwrap_err();

    assert!(error.is_not_found());
    assert!(error.to_string().contains("Organization not found"));
}

#[tokio::test]
async fn test_update_organization() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/organizations/org_01EHZNVPK3SFK441A1RGBFSHRT"))
        .and(body_json(json!({
            "name": "Acme Inc",
            "allow_profiles_outside_organization": true,
            "domains": ["acme.com", "acme.io"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(organization_body(
            "Acme Inc",
            &[("org_domain_1", "acme.com"), ("org_domain_2", "acme.io")],
        )))
        .expect(1)
        .mount(&server)
        .await;

    let organization = client(&server)
        .update_organization(&UpdateOrganizationOpts {
            organization: String::from("org_01EHZNVPK3SFK441A1RGBFSHRT"),
            name: String::from("Acme Inc"),
            allow_profiles_outside_organization: true,
            domains: vec![String::from("acme.com"), String::from("acme.io")],
        })
        .await
        .unwrap();

    assert_eq!(organization.name, "Acme Inc");
    assert_eq!(organization.domains.len(), 2);
}

#[tokio::test]
async fn test_delete_organization_accepts_empty_202() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/organizations/org_1"))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    let result = client(&server)
        .delete_organization(&DeleteOrganizationOpts {
            organization: String::from("org_1"),
        })
        .await;

    assert!(result.is_ok(), "Delete should succeed: {:?}", result.err());
}

// =============================================================================
// List Tests
// =============================================================================

#[tokio::test]
async fn test_list_organizations_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/organizations"))
        .and(query_param("domains[]", "acme.com"))
        .and(query_param("limit", "5"))
        .and(query_param("after", "org_cursor"))
        .and(query_param("order", "desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "data": [organization_body("Acme", &[("org_domain_1", "acme.com")])],
            "list_metadata": { "before": null, "after": "org_next" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = client(&server)
        .list_organizations(&ListOrganizationsOpts {
            domains: vec![String::from("acme.com")],
            limit: Some(5),
            before: None,
            after: Some(String::from("org_cursor")),
            order: Some(ListOrder::Desc),
        })
        .await
        .unwrap();

    assert_eq!(page.data.len(), 1);
    assert_eq!(page.list_metadata.after.as_deref(), Some("org_next"));
}

// =============================================================================
// Error Tests
// =============================================================================

#[tokio::test]
async fn test_unauthorized() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/organizations"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Could not authorize the request. Maybe your API key is invalid?"
        })))
        .mount(&server)
        .await;

    let error = client(&server)
        .list_organizations(&ListOrganizationsOpts::default())
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        ProviderError::Api(ApiError::AuthenticationFailed { .. })
    ));
}

#[tokio::test]
async fn test_unprocessable_entity_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/organizations"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "code": "invalid_request_parameters",
            "message": "Domains acme.com are already in use by another organization."
        })))
        .mount(&server)
        .await;

    let error = client(&server)
        .create_organization(&CreateOrganizationOpts {
            name: String::from("Acme"),
            allow_profiles_outside_organization: false,
            domains: vec![String::from("acme.com")],
        })
        .await
        .unwrap_err();

    match error {
        ProviderError::Api(ApiError::RequestFailed { status, message }) => {
            assert_eq!(status, 422);
            assert!(message.contains("already in use"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_invalid_response_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/organizations/org_1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let error = client(&server)
        .get_organization(&GetOrganizationOpts {
            organization: String::from("org_1"),
        })
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        ProviderError::Api(ApiError::InvalidResponse { .. })
    ));
}

#[tokio::test]
async fn test_network_error() {
    let client = OrganizationsClient::new("sk_test_123")
        .unwrap()
        .with_endpoint("http://127.0.0.1:1");

    let error = client
        .get_organization(&GetOrganizationOpts {
            organization: String::from("org_1"),
        })
        .await
        .unwrap_err();

    assert!(matches!(error, ProviderError::Api(ApiError::NetworkError { .. })));
}
