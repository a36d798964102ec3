use crate::{
    apis::{self, discounts, meters},
    auth::{CredentialPolicy, CredentialProvider, CredentialScheme, FnProvider, NoCredentials, StaticToken},
    error::PolarError,
    params::RequestParams,
    request::{prepare, PreparedRequest, RequestOptions},
    PolarResult,
};
use reqwest::header::{HeaderMap, AUTHORIZATION, CONTENT_TYPE};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use url::Url;

fn base() -> Url {
    Url::parse("https://api.example.test").unwrap()
}

async fn build(
    op: &crate::Operation,
    params: RequestParams,
    provider: &dyn CredentialProvider,
) -> PolarResult<PreparedRequest> {
    prepare(
        op,
        &params,
        &base(),
        &HeaderMap::new(),
        &RequestOptions::default(),
        provider,
        CredentialPolicy::FirstMatch,
    )
    .await
}

/// Provider that records which schemes were asked for
fn recording_provider(
    answer: Option<(CredentialScheme, &'static str)>,
) -> (impl CredentialProvider, Arc<Mutex<Vec<CredentialScheme>>>) {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let seen = calls.clone();
    let provider = FnProvider::new(move |scheme| {
        seen.lock().unwrap().push(scheme);
        let token = match answer {
            Some((only, token)) if only == scheme => Some(token.to_string()),
            _ => None,
        };
        async move { Ok(token) }
    });
    (provider, calls)
}

#[tokio::test]
async fn list_builds_expected_url_and_bearer() {
    let params = RequestParams::new()
        .query("organization_id", "org_1")
        .query("page", 2u32)
        .query("limit", 10u32);

    let req = build(&discounts::LIST, params, &StaticToken::new("tok")).await.unwrap();

    assert_eq!(req.method, reqwest::Method::GET);
    assert_eq!(req.url.path(), "/v1/discounts/");
    assert_eq!(req.url.query(), Some("organization_id=org_1&page=2&limit=10"));
    assert_eq!(req.headers.get(AUTHORIZATION).unwrap(), "Bearer tok");
    assert!(req.headers.get(CONTENT_TYPE).is_none());
    assert!(req.body.is_none());
}

#[tokio::test]
async fn missing_path_parameter_fails_before_credentials() {
    let (provider, calls) = recording_provider(Some((CredentialScheme::PersonalAccessToken, "t")));

    let err = build(&meters::GET, RequestParams::new(), &provider).await.unwrap_err();

    match err {
        PolarError::MissingParameter { parameter, operation } => {
            assert_eq!(parameter, "id");
            assert_eq!(operation, "get");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn missing_required_body_is_reported() {
    let err = build(&discounts::CREATE, RequestParams::new(), &NoCredentials)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        PolarError::MissingParameter { parameter: "body", operation: "create" }
    ));
}

#[tokio::test]
async fn missing_required_query_is_reported() {
    let params = RequestParams::new()
        .path("id", "m_1")
        .query("start_timestamp", "2024-01-01T00:00:00Z")
        .query("end_timestamp", None::<String>);

    let err = build(&meters::QUANTITIES, params, &NoCredentials).await.unwrap_err();

    assert!(matches!(
        err,
        PolarError::MissingParameter { parameter: "end_timestamp", .. }
    ));
}

#[tokio::test]
async fn null_query_values_never_reach_the_url() {
    let params = RequestParams::new()
        .query("organization_id", None::<Vec<String>>)
        .query("query", None::<String>)
        .query("limit", 5u32);

    let req = build(&meters::LIST, params, &NoCredentials).await.unwrap();

    assert_eq!(req.url.query(), Some("limit=5"));
    assert!(!req.url.as_str().contains("query="));
    assert!(!req.url.as_str().contains("organization_id"));
}

#[tokio::test]
async fn no_query_string_without_parameters() {
    let req = build(&meters::LIST, RequestParams::new(), &NoCredentials).await.unwrap();
    assert_eq!(req.url.query(), None);
    assert_eq!(req.url.as_str(), "https://api.example.test/v1/meters/");
}

#[tokio::test]
async fn array_query_values_repeat_the_key() {
    let params = RequestParams::new().query("sorting", vec!["-created_at", "name", "code"]);

    let req = build(&discounts::LIST, params, &NoCredentials).await.unwrap();

    let values: Vec<String> = req
        .url
        .query_pairs()
        .filter(|(k, _)| k == "sorting")
        .map(|(_, v)| v.into_owned())
        .collect();
    assert_eq!(values, vec!["-created_at", "name", "code"]);
    assert!(!req.url.as_str().contains("%2C"));
}

#[tokio::test]
async fn reserved_characters_in_path_round_trip() {
    let id = "a/b?c d#e";
    let params = RequestParams::new().path("id", id);

    let req = build(&meters::GET, params, &NoCredentials).await.unwrap();

    assert!(!req.url.as_str().contains('{'));
    assert_eq!(req.url.query(), None);
    let segment = req.url.path_segments().unwrap().last().unwrap().to_string();
    assert_eq!(urlencoding::decode(&segment).unwrap(), id);
}

#[tokio::test]
async fn dot_segment_path_values_are_rejected_before_credentials() {
    for id in [".", ".."] {
        let (provider, calls) = recording_provider(None);

        let err = build(&discounts::DELETE, RequestParams::new().path("id", id), &provider)
            .await
            .unwrap_err();

        assert!(matches!(err, PolarError::InvalidParameter(_)), "{id:?} gave {err}");
        assert!(calls.lock().unwrap().is_empty());
    }

    let req = build(&discounts::DELETE, RequestParams::new().path("id", "..."), &NoCredentials)
        .await
        .unwrap();
    assert_eq!(req.url.path(), "/v1/discounts/...");
}

#[tokio::test]
async fn second_scheme_supplies_the_token() {
    let (provider, calls) =
        recording_provider(Some((CredentialScheme::OrganizationAccessToken, "oat_secret")));

    let req = build(&meters::GET, RequestParams::new().path("id", "m_1"), &provider)
        .await
        .unwrap();

    assert_eq!(req.headers.get(AUTHORIZATION).unwrap(), "Bearer oat_secret");
    assert_eq!(
        *calls.lock().unwrap(),
        vec![
            CredentialScheme::PersonalAccessToken,
            CredentialScheme::OrganizationAccessToken
        ]
    );
}

#[tokio::test]
async fn no_token_means_no_authorization_header() {
    let req = build(&meters::GET, RequestParams::new().path("id", "m_1"), &NoCredentials)
        .await
        .unwrap();
    assert!(req.headers.get(AUTHORIZATION).is_none());
}

#[tokio::test]
async fn body_sets_exactly_one_content_type() {
    let mut defaults = HeaderMap::new();
    defaults.insert(CONTENT_TYPE, "text/plain".parse().unwrap());
    let params = RequestParams::new()
        .path("id", "d_1")
        .body(&serde_json::json!({ "name": "Spring" }))
        .unwrap();

    let req = prepare(
        &discounts::UPDATE,
        &params,
        &base(),
        &defaults,
        &RequestOptions::default(),
        &NoCredentials,
        CredentialPolicy::FirstMatch,
    )
    .await
    .unwrap();

    let content_types: Vec<_> = req.headers.get_all(CONTENT_TYPE).iter().collect();
    assert_eq!(content_types, vec!["application/json"]);
    assert_eq!(req.method, reqwest::Method::PATCH);
    assert_eq!(req.body.as_deref(), Some(br#"{"name":"Spring"}"#.as_slice()));
}

#[tokio::test]
async fn caller_headers_are_layered_under_computed_ones() {
    let options = RequestOptions::new()
        .header("X-Request-Id", "req-42")
        .unwrap()
        .header("Authorization", "Bearer caller")
        .unwrap();

    let req = prepare(
        &discounts::GET,
        &RequestParams::new().path("id", "d_1"),
        &base(),
        &HeaderMap::new(),
        &options,
        &StaticToken::new("resolved"),
        CredentialPolicy::FirstMatch,
    )
    .await
    .unwrap();

    assert_eq!(req.headers.get("x-request-id").unwrap(), "req-42");
    assert_eq!(req.headers.get(AUTHORIZATION).unwrap(), "Bearer resolved");
}

#[tokio::test]
async fn caller_header_keeps_every_value() {
    let mut defaults = HeaderMap::new();
    defaults.insert("x-tag", "default".parse().unwrap());
    defaults.insert("x-client", "sdk".parse().unwrap());

    let mut extra = HeaderMap::new();
    extra.append("x-tag", "alpha".parse().unwrap());
    extra.append("x-tag", "beta".parse().unwrap());
    let options = RequestOptions::new()
        .headers(extra)
        .header("Accept-Language", "en")
        .unwrap()
        .header("Accept-Language", "sv")
        .unwrap();

    let req = prepare(
        &discounts::GET,
        &RequestParams::new().path("id", "d_1"),
        &base(),
        &defaults,
        &options,
        &NoCredentials,
        CredentialPolicy::FirstMatch,
    )
    .await
    .unwrap();

    let tags: Vec<_> = req.headers.get_all("x-tag").iter().collect();
    assert_eq!(tags, vec!["alpha", "beta"]);
    let languages: Vec<_> = req.headers.get_all("accept-language").iter().collect();
    assert_eq!(languages, vec!["en", "sv"]);
    assert_eq!(req.headers.get("x-client").unwrap(), "sdk");
}

#[tokio::test]
async fn base_url_path_prefix_is_kept() {
    let prefixed = Url::parse("https://gateway.example.test/polar/").unwrap();

    let req = prepare(
        &discounts::GET,
        &RequestParams::new().path("id", "d_1"),
        &prefixed,
        &HeaderMap::new(),
        &RequestOptions::default(),
        &NoCredentials,
        CredentialPolicy::FirstMatch,
    )
    .await
    .unwrap();

    assert_eq!(req.url.as_str(), "https://gateway.example.test/polar/v1/discounts/d_1");
}

#[test]
fn operation_tables_are_well_formed() {
    let mut seen = HashSet::new();

    for op in apis::all_operations() {
        assert!(op.path.starts_with("/v1/"), "{} has unversioned path", op.qualified_name());
        assert_eq!(
            op.path.matches('{').count(),
            op.path.matches('}').count(),
            "{} has unbalanced placeholders",
            op.qualified_name()
        );
        assert!(!op.security.is_empty());
        assert!(seen.insert(op.qualified_name()), "duplicate {}", op.qualified_name());
    }

    assert_eq!(seen.len(), 27);
}
