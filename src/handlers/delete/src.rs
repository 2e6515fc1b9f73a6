use crate::{
    config::GatewayAppState,
    error::RestError,
    handlers::pipeline,
    tx::TxResponse,
};
use super::models::DeleteReq;
use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
};

pub async fn delete_handler(
    State(state): State<GatewayAppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<TxResponse>, RestError> {
    pipeline::handle::<DeleteReq>(&state, body)
}
