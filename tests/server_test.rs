use std::net::SocketAddr;
use std::sync::Arc;

use serde_json::{json, Value};
use tokio::net::TcpListener;
use triage::server::{self, StatusResponse};
use triage::{ChatReply, EngineConfig, IntelEngine, ReportClassification};

async fn spawn_server() -> SocketAddr {
    let engine = Arc::new(IntelEngine::new(EngineConfig::default()).unwrap());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(server::serve_on(engine, listener));
    addr
}

#[tokio::test]
async fn test_status() -> Result<(), Box<dyn std::error::Error>> {
    let addr = spawn_server().await;
    let status: StatusResponse = reqwest::get(format!("http://{}/", addr)).await?.json().await?;
    assert_eq!(status.status, "Tactical AI Assistant Active");
    assert_eq!(status.version, env!("CARGO_PKG_VERSION"));
    Ok(())
}

#[tokio::test]
async fn test_predict() -> Result<(), Box<dyn std::error::Error>> {
    let addr = spawn_server().await;
    let result: ReportClassification = reqwest::Client::new()
        .post(format!("http://{}/predict", addr))
        .json(&json!({ "description": "no water supply in our residential block for 3 days" }))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(result.category, "Water");
    assert_eq!(result.severity, "CRITICAL");
    Ok(())
}

#[tokio::test]
async fn test_chat() -> Result<(), Box<dyn std::error::Error>> {
    let addr = spawn_server().await;
    let body: Value = reqwest::Client::new()
        .post(format!("http://{}/chat", addr))
        .json(&json!({ "message": "thank you for the help i want to contribute" }))
        .send()
        .await?
        .json()
        .await?;
    assert!(body.get("reply").and_then(Value::as_str).is_some());
    let reply: ChatReply = serde_json::from_value(body)?;
    assert_eq!(reply.emotion, "HELPFUL");
    assert!(reply.confidence > 0.4);
    Ok(())
}

#[tokio::test]
async fn test_malformed_body_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let addr = spawn_server().await;
    let response = reqwest::Client::new()
        .post(format!("http://{}/chat", addr))
        .json(&json!({ "text": 42 }))
        .send()
        .await?;
    assert!(response.status().is_client_error());
    Ok(())
}
