use crate::{
    config::GatewayAppState,
    error::RestError,
    handlers::pipeline,
    tx::TxResponse,
};
use super::models::UpdateReq;
use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
};

pub async fn update_handler(
    State(state): State<GatewayAppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<TxResponse>, RestError> {
    pipeline::handle::<UpdateReq>(&state, body)
}
