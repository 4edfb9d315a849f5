#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Method, Request, StatusCode},
    routing::post,
};
use http_body_util::BodyExt;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use studyenglish::core::config::AppConfig;
use studyenglish::{AppState, build_app};

pub const HELLO: &str = r#"{"choices":[{"message":{"content":"hello"}}]}"#;

/// What the mock vendor saw and how it answers.
#[derive(Clone)]
pub struct MockVendor {
    pub url: String,
    hits: Arc<AtomicUsize>,
    last: Arc<Mutex<Option<(HeaderMap, Value)>>>,
}

impl MockVendor {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn last_headers(&self) -> HeaderMap {
        self.last.lock().unwrap().as_ref().unwrap().0.clone()
    }

    pub fn last_body(&self) -> Value {
        self.last.lock().unwrap().as_ref().unwrap().1.clone()
    }
}

#[derive(Clone)]
struct VendorState {
    status: StatusCode,
    body: &'static str,
    hits: Arc<AtomicUsize>,
    last: Arc<Mutex<Option<(HeaderMap, Value)>>>,
}

async fn completions(
    State(state): State<VendorState>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    state.hits.fetch_add(1, Ordering::SeqCst);
    let json = serde_json::from_str(&body).unwrap_or(Value::Null);
    *state.last.lock().unwrap() = Some((headers, json));
    (state.status, state.body.to_string())
}

/// Spawns a chat-completions endpoint answering every call with `status` and `body`.
pub async fn spawn_vendor(status: StatusCode, body: &'static str) -> MockVendor {
    let hits = Arc::new(AtomicUsize::new(0));
    let last = Arc::new(Mutex::new(None));
    let app = Router::new()
        .route("/v1/chat/completions", post(completions))
        .with_state(VendorState {
            status,
            body,
            hits: hits.clone(),
            last: last.clone(),
        });

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockVendor {
        url: format!("http://{addr}/v1/chat/completions"),
        hits,
        last,
    }
}

pub fn config_for(endpoint: &str) -> AppConfig {
    let vars: HashMap<&str, String> = HashMap::from([
        ("AI_SILICONFLOW_API_KEY", "sk-test".to_string()),
        ("AI_SILICONFLOW_ENDPOINT", endpoint.to_string()),
        ("AI_TIMEOUT_SECS", "5".to_string()),
    ]);
    AppConfig::from_lookup(|key| vars.get(key).cloned()).unwrap()
}

pub fn app_for(vendor: &MockVendor) -> Router {
    build_app(AppState::from_config(&config_for(&vendor.url)).unwrap())
}

pub fn json_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn form_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
