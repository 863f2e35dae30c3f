//! HTTP surface for the engine.

use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

use crate::engine::{ChatReply, IntelEngine, ReportClassification};

/// Bind address used when none is configured.
pub const DEFAULT_ADDR: &str = "0.0.0.0:5000";

type AppState = Arc<IntelEngine>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRequest {
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    pub version: String,
}

pub fn router(engine: Arc<IntelEngine>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/predict", post(predict))
        .route("/chat", post(chat))
        .with_state(engine)
}

/// Serves on `addr` until the process exits.
pub async fn serve(engine: Arc<IntelEngine>, addr: &str) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    serve_on(engine, listener).await
}

/// Serves on an already bound listener.
pub async fn serve_on(engine: Arc<IntelEngine>, listener: TcpListener) -> Result<()> {
    info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(engine)).await?;
    Ok(())
}

async fn home() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "Tactical AI Assistant Active".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn predict(
    State(engine): State<AppState>,
    Json(req): Json<ReportRequest>,
) -> Json<ReportClassification> {
    let result = engine.classify_report(&req.description);
    debug!("POST /predict -> {}/{}", result.category, result.severity);
    Json(result)
}

async fn chat(State(engine): State<AppState>, Json(req): Json<ChatRequest>) -> Json<ChatReply> {
    let reply = engine.respond_to_chat(&req.message);
    debug!("POST /chat -> {} ({:.3})", reply.emotion, reply.confidence);
    Json(reply)
}
