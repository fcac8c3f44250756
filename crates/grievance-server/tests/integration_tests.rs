//! Integration tests for the grievance server
//!
//! These drive the full intake and retrieval flows through the axum
//! application with a mock LLM provider.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use grievance_domain::traits::LlmProvider;
use grievance_domain::Complaint;
use grievance_extractor::ComplaintExtractor;
use grievance_llm::MockProvider;
use grievance_server::handlers::{create_router, AppState, ErrorDetail, RetrievalResponse};
use grievance_server::responder::RetrievalResponder;
use grievance_store::SqliteStore;
use std::sync::{Arc, Mutex};
use tower::ServiceExt; // for oneshot

/// Helper to create an application over a mock provider
fn create_test_app(provider: MockProvider) -> Router {
    let provider: Arc<dyn LlmProvider> = Arc::new(provider);
    let state = AppState {
        store: Arc::new(Mutex::new(SqliteStore::new(":memory:").unwrap())),
        extractor: Arc::new(ComplaintExtractor::new(Arc::clone(&provider))),
        responder: Arc::new(RetrievalResponder::new(provider)),
    };
    create_router(state)
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_root_banner() {
    let app = create_test_app(MockProvider::default());

    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = body_json(response).await;
    assert!(body["message"].as_str().unwrap().contains("Grievance"));
}

#[tokio::test]
async fn test_collect_complaint_via_llm_extraction() {
    let mut provider = MockProvider::new("unrelated");
    provider.add_response(
        "My internet bill is wrong",
        r#"{"name": "Asha Rao", "mobile_number": "9876543210", "complaint_text": "My internet bill is wrong", "category": "billing", "priority": "medium"}"#,
    );
    let app = create_test_app(provider);

    let request = post_json(
        "/collect-complaint",
        r#"{"message": "My name is Asha Rao, mobile number 9876543210. My internet bill is wrong."}"#,
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let complaint: Complaint = body_json(response).await;
    assert!(complaint.id.as_str().starts_with("GRV-"));
    assert_eq!(complaint.name, "Asha Rao");
    assert_eq!(complaint.phone_number, "9876543210");
    assert_eq!(complaint.category.as_str(), "billing");
    assert_eq!(complaint.priority.as_str(), "medium");
    assert_eq!(complaint.status, "pending");
    assert_eq!(complaint.created_at, complaint.updated_at);
}

#[tokio::test]
async fn test_collect_complaint_falls_back_on_malformed_llm_output() {
    // Provider never returns JSON; the regex fallback must still produce a
    // stored complaint from the same message
    let app = create_test_app(MockProvider::new("I cannot help with that."));

    let request = post_json(
        "/collect-complaint",
        r#"{"message": "My name is Asha Rao, mobile number 9876543210. My internet bill is wrong."}"#,
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let complaint: Complaint = body_json(response).await;
    assert_eq!(complaint.name, "Asha Rao");
    assert_eq!(complaint.phone_number, "9876543210");
    assert_eq!(complaint.category.as_str(), "billing");
    assert!(complaint.text.contains("internet bill is wrong"));
    assert!(!complaint.text.contains("Asha"));
    assert!(!complaint.text.contains("9876543210"));
}

#[tokio::test]
async fn test_collect_complaint_missing_fields_lists_all() {
    let app = create_test_app(MockProvider::new("not json"));

    // No name, no phone
    let request = post_json("/collect-complaint", r#"{"message": "my bill is wrong"}"#);
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorDetail = body_json(response).await;
    assert!(error.detail.starts_with("Incomplete complaint data. Missing:"));
    assert!(error.detail.contains("name"));
    assert!(error.detail.contains("mobile number"));
}

#[tokio::test]
async fn test_retrieve_complaints_by_phone() {
    let mut provider = MockProvider::new("not json");
    // Registration order matters: retrieval prompts embed stored complaint
    // text, so the query fragment must be checked first
    provider.add_response("User Query:", "There is one complaint on file for that number.");
    provider.add_response(
        "the app keeps crashing",
        r#"{"name": "John Doe", "mobile_number": "9876543210", "complaint_text": "the app keeps crashing", "category": "technical", "priority": "high"}"#,
    );
    let app = create_test_app(provider);

    let response = app
        .clone()
        .oneshot(post_json(
            "/collect-complaint",
            r#"{"message": "the app keeps crashing"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(post_json(
            "/retrieve-complaints",
            r#"{"message": "status of 9876543210"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let retrieval: RetrievalResponse = body_json(response).await;
    assert_eq!(retrieval.query, "status of 9876543210");
    assert_eq!(
        retrieval.response,
        "There is one complaint on file for that number."
    );
    assert_eq!(retrieval.complaints_found, 1);
    assert_eq!(retrieval.complaints[0].phone_number, "9876543210");
}

#[tokio::test]
async fn test_retrieve_complaints_empty_store() {
    let mut provider = MockProvider::new("not json");
    provider.add_response("User Query:", "No complaints are on file yet.");
    let app = create_test_app(provider);

    let response = app
        .oneshot(post_json(
            "/retrieve-complaints",
            r#"{"message": "what happened lately"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let retrieval: RetrievalResponse = body_json(response).await;
    assert_eq!(retrieval.complaints_found, 0);
    assert!(retrieval.complaints.is_empty());
    assert_eq!(retrieval.response, "No complaints are on file yet.");
}

#[tokio::test]
async fn test_get_all_complaints_newest_first() {
    let mut provider = MockProvider::new("not json");
    provider.add_response(
        "first problem",
        r#"{"name": "A", "mobile_number": "1111111111", "complaint_text": "first problem"}"#,
    );
    provider.add_response(
        "second problem",
        r#"{"name": "B", "mobile_number": "2222222222", "complaint_text": "second problem"}"#,
    );
    let app = create_test_app(provider);

    for message in [r#"{"message": "first problem"}"#, r#"{"message": "second problem"}"#] {
        let response = app
            .clone()
            .oneshot(post_json("/collect-complaint", message))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let request = Request::builder()
        .uri("/complaints")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let complaints: Vec<Complaint> = body_json(response).await;
    assert_eq!(complaints.len(), 2);
    assert_eq!(complaints[0].name, "B");
    assert_eq!(complaints[1].name, "A");
}

#[tokio::test]
async fn test_llm_unavailable_surfaces_as_server_error() {
    let provider = MockProvider::default();
    provider.fail_all();
    let app = create_test_app(provider);

    let response = app
        .oneshot(post_json(
            "/collect-complaint",
            r#"{"message": "anything at all"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let error: ErrorDetail = body_json(response).await;
    assert!(error.detail.contains("Communication error"));
}
