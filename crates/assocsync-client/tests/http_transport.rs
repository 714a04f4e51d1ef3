use std::sync::Arc;

use assocsync_client::{Credentials, HttpTransport};
use assocsync_core::{AssociationError, AssociationTransport, Reconciler, TransportError};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

const INSTANCE: &str = "aaaaaaaa-bbbb-cccc-dddd-111111111111";
const ARN: &str = "arn:aws:lambda:us-west-2:123456789012:function:ivr-router";

fn list_path() -> String {
    format!("/instance/{INSTANCE}/lambda-functions")
}

fn item_path() -> String {
    format!("/instance/{INSTANCE}/lambda-function")
}

#[tokio::test]
async fn associate_sends_function_arn_with_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(item_path()))
        .and(header("authorization", "Bearer t0ken"))
        .and(body_json(json!({ "FunctionArn": ARN })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let transport = HttpTransport::new(&server.uri())
        .unwrap()
        .with_credentials(Credentials::bearer("t0ken"));
    transport.associate(INSTANCE, ARN).await.unwrap();
}

#[tokio::test]
async fn disassociate_passes_arn_as_query_and_maps_404() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(item_path()))
        .and(query_param("functionArn", ARN))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({ "Message": "Function is not associated" })),
        )
        .mount(&server)
        .await;

    let transport = HttpTransport::new(&server.uri()).unwrap();
    let err = transport.disassociate(INSTANCE, ARN).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(
        err,
        TransportError::ResourceNotFound {
            message: "Function is not associated".to_string()
        }
    );
}

#[tokio::test]
async fn list_follows_next_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(list_path()))
        .and(query_param("maxResults", "25"))
        .and(query_param_is_missing("nextToken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "LambdaFunctions": ["arn:aws:lambda:us-west-2:123456789012:function:a"],
            "NextToken": "page-2"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(list_path()))
        .and(query_param("nextToken", "page-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "LambdaFunctions": [ARN]
        })))
        .mount(&server)
        .await;

    let transport = HttpTransport::new(&server.uri()).unwrap();

    let first = transport.list_associations(INSTANCE, None, 25).await.unwrap();
    assert_eq!(first.next_token.as_deref(), Some("page-2"));

    let second = transport
        .list_associations(INSTANCE, Some("page-2"), 25)
        .await
        .unwrap();
    assert_eq!(second.function_arns, vec![ARN.to_string()]);
    assert_eq!(second.next_token, None);
}

#[tokio::test]
async fn error_statuses_are_classified() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(item_path()))
        .respond_with(
            ResponseTemplate::new(429).set_body_json(json!({ "Message": "Rate exceeded" })),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(list_path()))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .mount(&server)
        .await;

    let transport = HttpTransport::new(&server.uri()).unwrap();

    let err = transport.associate(INSTANCE, ARN).await.unwrap_err();
    assert!(matches!(err, TransportError::Throttled { ref message } if message == "Rate exceeded"));
    assert!(err.is_retryable());

    let err = transport.list_associations(INSTANCE, None, 25).await.unwrap_err();
    assert!(matches!(err, TransportError::Unauthorized { .. }));
}

#[tokio::test]
async fn malformed_list_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(list_path()))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let transport = HttpTransport::new(&server.uri()).unwrap();
    let err = transport.list_associations(INSTANCE, None, 25).await.unwrap_err();
    assert!(matches!(err, TransportError::Decode { .. }));
}

#[tokio::test]
async fn reconciler_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(item_path()))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(list_path()))
        .and(query_param_is_missing("nextToken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "LambdaFunctions": ["arn:aws:lambda:us-west-2:123456789012:function:other"],
            "NextToken": "n1"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(list_path()))
        .and(query_param("nextToken", "n1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "LambdaFunctions": [ARN],
            "NextToken": ""
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(item_path()))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let transport = Arc::new(HttpTransport::new(&server.uri()).unwrap());
    let reconciler = Reconciler::new(transport);

    let created = reconciler.create(INSTANCE, ARN).await.unwrap();
    assert_eq!(created.function_arn, ARN);

    // remote reports the association already gone; delete still succeeds
    reconciler.delete(&created.id().unwrap()).await.unwrap();
}

#[tokio::test]
async fn reconciler_read_reports_not_found_after_full_scan() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(list_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "LambdaFunctions": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reconciler = Reconciler::new(Arc::new(HttpTransport::new(&server.uri()).unwrap()));
    let err = reconciler
        .read(&format!("{INSTANCE},{ARN}"))
        .await
        .unwrap_err();
    assert!(matches!(err, AssociationError::NotFound { .. }));
}
