//! Shared fixtures for the route tests

#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use crud_rest_gateway::{
    base_req::BaseReq,
    config::GatewayConfig,
    crypto::{ADDR_LEN, AccAddress},
    msgs::CrudMsg,
    server,
    tx::{StdTxBuilder, TxBuilder, TxResponse},
};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

pub const PREFIX: &str = "bluzelle";

/// Delegates to the real builder but remembers every call.
#[derive(Default)]
pub struct RecordingBuilder {
    inner: StdTxBuilder,
    calls: Mutex<Vec<(BaseReq, Vec<CrudMsg>)>>,
}

impl RecordingBuilder {
    pub fn calls(&self) -> Vec<(BaseReq, Vec<CrudMsg>)> {
        self.calls.lock().unwrap().clone()
    }
}

impl TxBuilder for RecordingBuilder {
    fn generate(&self, base: &BaseReq, msgs: Vec<CrudMsg>) -> Result<TxResponse, String> {
        self.calls.lock().unwrap().push((base.clone(), msgs.clone()));
        self.inner.generate(base, msgs)
    }
}

pub fn test_config() -> GatewayConfig {
    GatewayConfig::parse(r#"listen = "127.0.0.1:0""#).expect("test config parses")
}

pub fn test_app() -> (Router, Arc<RecordingBuilder>) {
    let builder = Arc::new(RecordingBuilder::default());
    let state = server::app_state(test_config(), builder.clone());
    (server::router(state), builder)
}

pub fn owner() -> AccAddress {
    let mut bytes = [0u8; ADDR_LEN];
    for (i, b) in bytes.iter_mut().enumerate() {
        *b = 0xa0 + i as u8;
    }
    AccAddress::new(bytes, PREFIX).unwrap()
}

pub fn owner_bech32() -> String {
    owner().to_bech32().to_owned()
}

/// Same address with its last checksum character changed.
pub fn owner_bad_checksum() -> String {
    let mut s = owner_bech32();
    let last = s.pop().unwrap();
    s.push(if last == 'q' { 'p' } else { 'q' });
    s
}

pub fn base_req() -> Value {
    serde_json::json!({ "from": owner_bech32(), "chain_id": "test" })
}

pub async fn post_json(app: Router, path: &str, body: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::post(path)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_owned()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}
