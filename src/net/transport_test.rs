use super::*;
use mockito::Matcher;
use serde_json::json;

fn request(method: Method, url: String, body: RequestBody) -> HttpRequest {
    HttpRequest { method, url, headers: Vec::new(), body }
}

#[test]
fn http_response_success_range() {
    assert!(HttpResponse::new(200, "").is_success());
    assert!(HttpResponse::new(204, "").is_success());
    assert!(!HttpResponse::new(199, "").is_success());
    assert!(!HttpResponse::new(301, "").is_success());
    assert!(!HttpResponse::new(401, "").is_success());
}

#[test]
fn http_request_header_lookup_ignores_case() {
    let mut req = request(Method::GET, "http://x".into(), RequestBody::Empty);
    req.headers.push(("Authorization".into(), "Bearer t".into()));
    assert_eq!(req.header("authorization"), Some("Bearer t"));
    assert_eq!(req.header("content-type"), None);
}

// =============================================================
// ReqwestTransport against a local mock server
// =============================================================

#[tokio::test]
async fn reqwest_transport_sends_form_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/auth/login")
        .match_header("content-type", "application/x-www-form-urlencoded")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("username".into(), "ana@example.test".into()),
            Matcher::UrlEncoded("password".into(), "p&ss word".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"access_token":"abc"}"#)
        .create_async()
        .await;

    let transport = ReqwestTransport::new().unwrap();
    let response = transport
        .send(request(
            Method::POST,
            format!("{}/auth/login", server.url()),
            RequestBody::Form(vec![
                ("username".into(), "ana@example.test".into()),
                ("password".into(), "p&ss word".into()),
            ]),
        ))
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.body, r#"{"access_token":"abc"}"#);
    mock.assert_async().await;
}

#[tokio::test]
async fn reqwest_transport_sends_json_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/auth/register")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({ "email": "ana@example.test", "password": "pw" })))
        .with_status(201)
        .create_async()
        .await;

    let transport = ReqwestTransport::new().unwrap();
    let response = transport
        .send(request(
            Method::POST,
            format!("{}/auth/register", server.url()),
            RequestBody::Json(json!({ "email": "ana@example.test", "password": "pw" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status, 201);
    mock.assert_async().await;
}

#[tokio::test]
async fn reqwest_transport_forwards_headers() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/properties")
        .match_header("authorization", "Bearer tok")
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let transport = ReqwestTransport::new().unwrap();
    let mut req = request(Method::GET, format!("{}/properties", server.url()), RequestBody::Empty);
    req.headers.push(("Authorization".into(), "Bearer tok".into()));
    let response = transport.send(req).await.unwrap();

    assert_eq!(response.body, "[]");
    mock.assert_async().await;
}

#[tokio::test]
async fn reqwest_transport_returns_error_statuses_as_responses() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/auth/login")
        .with_status(401)
        .with_body(r#"{"detail":"invalid credentials"}"#)
        .create_async()
        .await;

    let transport = ReqwestTransport::new().unwrap();
    let response = transport
        .send(request(Method::POST, format!("{}/auth/login", server.url()), RequestBody::Empty))
        .await
        .unwrap();

    assert_eq!(response.status, 401);
    assert!(!response.is_success());
    assert_eq!(response.body, r#"{"detail":"invalid credentials"}"#);
}

#[tokio::test]
async fn reqwest_transport_connection_failure_is_transport_error() {
    let transport = ReqwestTransport::new().unwrap();
    let result = transport
        .send(request(Method::GET, "http://127.0.0.1:1/properties".into(), RequestBody::Empty))
        .await;
    assert!(result.is_err());
}
