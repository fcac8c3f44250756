//! HTTP request handlers for the grievance service.
//!
//! Implements the intake and retrieval endpoints using axum. Every failure
//! mode is converted into an [`AppError`]; nothing propagates unhandled
//! past the handler boundary.

use crate::responder::RetrievalResponder;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router as AxumRouter,
};
use grievance_domain::traits::{ComplaintStore, LlmError};
use grievance_domain::{Complaint, ValidationError};
use grievance_extractor::{query, ComplaintExtractor};
use grievance_store::{SqliteStore, StoreError};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{error, info};

/// Shared application state
///
/// All collaborators are constructor-injected so tests can swap in a mock
/// provider; there are no process globals.
#[derive(Clone)]
pub struct AppState {
    /// Complaint persistence, locked per statement
    pub store: Arc<Mutex<SqliteStore>>,
    /// LLM-backed field extraction with regex fallback
    pub extractor: Arc<ComplaintExtractor>,
    /// Natural-language retrieval answers
    pub responder: Arc<RetrievalResponder>,
}

/// Free-text request body shared by intake and retrieval
#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    /// The user's message or query
    pub message: String,
}

/// Root endpoint response
#[derive(Debug, Serialize, Deserialize)]
pub struct RootResponse {
    /// Service banner
    pub message: String,
}

/// Retrieval endpoint response
#[derive(Debug, Serialize, Deserialize)]
pub struct RetrievalResponse {
    /// The original user query
    pub query: String,
    /// The LLM-generated answer
    pub response: String,
    /// Number of complaints found
    pub complaints_found: usize,
    /// The matching complaints
    pub complaints: Vec<Complaint>,
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Human-readable error detail
    pub detail: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Required complaint fields are missing after extraction
    Validation(ValidationError),
    /// The inference service failed
    Llm(LlmError),
    /// The store failed
    Store(StoreError),
    /// Anything else caught at the handler boundary
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            AppError::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            AppError::Llm(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            AppError::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        if status.is_server_error() {
            error!(%status, detail, "Request failed");
        }

        (status, Json(ErrorDetail { detail })).into_response()
    }
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        AppError::Validation(e)
    }
}

impl From<LlmError> for AppError {
    fn from(e: LlmError) -> Self {
        AppError::Llm(e)
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Store(e)
    }
}

/// Lock the store for one statement
///
/// The guard must never be held across an await into the LLM.
fn lock_store(state: &AppState) -> Result<MutexGuard<'_, SqliteStore>, AppError> {
    state
        .store
        .lock()
        .map_err(|e| AppError::Internal(format!("Store lock error: {}", e)))
}

/// GET / - Service banner
async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "LLM-Powered Grievance Management System API".to_string(),
    })
}

/// POST /collect-complaint - Extract complaint fields from a message and
/// store them
async fn collect_complaint(
    State(state): State<AppState>,
    Json(request): Json<MessageRequest>,
) -> Result<Json<Complaint>, AppError> {
    info!(message = %request.message, "Processing complaint collection request");

    let fields = state.extractor.extract(&request.message).await?;
    let complete = fields.into_complete()?;

    let complaint = lock_store(&state)?.create(complete)?;
    info!(id = %complaint.id, "Complaint stored successfully");

    Ok(Json(complaint))
}

/// POST /retrieve-complaints - Answer a free-text query over stored
/// complaints
async fn retrieve_complaints(
    State(state): State<AppState>,
    Json(request): Json<MessageRequest>,
) -> Result<Json<RetrievalResponse>, AppError> {
    info!(message = %request.message, "Processing complaint retrieval request");

    let filter = query::extract_criteria(&request.message);
    let matches = lock_store(&state)?.find(&filter)?;
    info!(found = matches.len(), ?filter, "Complaints matched query");

    let answer = state.responder.answer(&request.message, &matches).await?;

    Ok(Json(RetrievalResponse {
        query: request.message,
        response: answer,
        complaints_found: matches.len(),
        complaints: matches,
    }))
}

/// GET /complaints - All complaints, newest first
async fn get_all_complaints(
    State(state): State<AppState>,
) -> Result<Json<Vec<Complaint>>, AppError> {
    let complaints = lock_store(&state)?.list_all()?;
    info!(count = complaints.len(), "Retrieved all complaints");
    Ok(Json(complaints))
}

/// Create the axum router with all routes
pub fn create_router(state: AppState) -> AxumRouter {
    AxumRouter::new()
        .route("/", get(root))
        .route("/collect-complaint", post(collect_complaint))
        .route("/retrieve-complaints", post(retrieve_complaints))
        .route("/complaints", get(get_all_complaints))
        .with_state(state)
}
