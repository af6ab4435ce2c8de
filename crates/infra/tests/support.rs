//! Shared helpers for infra integration tests.
//!
//! Include with `#[path = "support.rs"] mod support;`.

#![allow(dead_code)]

use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration;

use greenloop_common::{RetryConfig, RetryNotifier};
use greenloop_infra::{ApiClient, ApiClientConfig, MemoryTokenStore, TokenStoreAuth};
use parking_lot::Mutex;
use serde_json::{json, Value};
use wiremock::MockServer;

pub const TOKEN: &str = "test-token";

/// Retry settings fast enough for tests: `max_retries` with a 5ms delay.
pub fn fast_retry(max_retries: u32) -> RetryConfig {
    RetryConfig::builder()
        .max_retries(max_retries)
        .delay(Duration::from_millis(5))
        .build()
        .expect("valid retry config")
}

/// API client pointed at `server`, signed in with [`TOKEN`].
pub fn signed_in_client(server: &MockServer) -> Arc<ApiClient> {
    client_with(server, Some(TOKEN), fast_retry(2))
}

/// API client pointed at `server` with no stored token.
pub fn signed_out_client(server: &MockServer) -> Arc<ApiClient> {
    client_with(server, None, fast_retry(2))
}

pub fn client_with(server: &MockServer, token: Option<&str>, retry: RetryConfig) -> Arc<ApiClient> {
    Arc::new(build_client(server, token, retry))
}

pub fn build_client(server: &MockServer, token: Option<&str>, retry: RetryConfig) -> ApiClient {
    let store = match token {
        Some(token) => MemoryTokenStore::with_token(token),
        None => MemoryTokenStore::new(),
    };
    let mut config = ApiClientConfig::new(server.uri());
    config.retry = retry;
    ApiClient::new(config, Arc::new(TokenStoreAuth::new(Arc::new(store))))
        .expect("api client should build")
}

pub fn ok(data: Value) -> Value {
    json!({ "success": true, "data": data })
}

pub fn fail(message: &str) -> Value {
    json!({ "success": false, "message": message })
}

/// A flat listing row as the backend returns it.
pub fn listing_row(id: &str, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": "Barely used",
        "category": "furniture",
        "condition": "good",
        "location": "Manchester",
        "price": "25.00",
        "is_negotiable": true,
        "eco_score": 70,
        "eco_attributes": "second-hand,local",
        "image_url": format!("https://cdn.greenloop.test/{id}.jpg"),
        "created_at": "2024-05-01T10:00:00Z",
        "seller_id": "s-1",
        "seller_username": "alex",
        "seller_rating": 4.2,
        "seller_verified": true
    })
}

pub fn message_row(id: &str, conversation_id: &str, text: &str) -> Value {
    json!({
        "id": id,
        "conversation_id": conversation_id,
        "text": text,
        "sender_id": "me",
        "timestamp": "2024-08-01T09:30:00Z"
    })
}

pub fn conversation_row(id: &str, buyer_id: &str, seller_id: &str, last: Option<&str>) -> Value {
    json!({
        "id": id,
        "listing_id": "l-1",
        "buyer_id": buyer_id,
        "seller_id": seller_id,
        "participant_name": "Jo",
        "last_message": last.map(|_| "earlier message"),
        "last_message_time": last,
        "unread_count": 1
    })
}

/// Notifier recording every retry and give-up event.
#[derive(Default)]
pub struct RecordingNotifier {
    pub retries: Mutex<Vec<u32>>,
    pub give_ups: Mutex<Vec<u32>>,
}

impl RetryNotifier for RecordingNotifier {
    fn on_retry(&self, attempt: u32, _error: &dyn Display, _delay: Duration) {
        self.retries.lock().push(attempt);
    }

    fn on_give_up(&self, attempts: u32, _error: &dyn Display) {
        self.give_ups.lock().push(attempts);
    }
}
