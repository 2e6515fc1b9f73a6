use crate::{
    base_req::BaseReq,
    config::GatewayAppState,
    crypto::AccAddress,
    error::RestError,
    msgs::{CrudMsg, MsgKind},
    tx::TxResponse,
};
use axum::{
    Json,
    body::Bytes,
    extract::rejection::BytesRejection,
};
use serde::de::DeserializeOwned;
use tracing::{info, info_span, warn};
use uuid::Uuid;

/// A request body for one of the four operations.
pub trait CrudRequest: DeserializeOwned {
    const KIND: MsgKind;

    fn take_base_req(&mut self) -> BaseReq;
    fn owner(&self) -> &str;
    fn into_msg(self, owner: AccAddress) -> CrudMsg;
}

pub fn decode<R: DeserializeOwned>(body: &[u8]) -> Result<R, RestError> {
    serde_json::from_slice(body).map_err(|e| RestError::Decode(e.to_string()))
}

// every step returns early; the builder only sees fully validated input
pub fn generate_tx<R: CrudRequest>(
    state: &GatewayAppState,
    body: &[u8],
) -> Result<TxResponse, RestError> {
    let mut req: R = decode(body)?;

    let base = req.take_base_req().sanitize();
    base.validate_basic().map_err(RestError::BaseRequestInvalid)?;

    let owner = AccAddress::from_bech32(req.owner(), &state.cfg.bech32_prefix)?;

    let msg = req.into_msg(owner);
    msg.validate_basic().map_err(RestError::MessageValidation)?;

    tracing::debug!(
        uuid  = msg.uuid(),
        key   = msg.key(),
        owner = %msg.owner().to_hex(),
        "message built"
    );

    state.builder
        .generate(&base, vec![msg])
        .map_err(RestError::TxBuild)
}

pub fn handle<R: CrudRequest>(
    state: &GatewayAppState,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<TxResponse>, RestError> {
    let span = info_span!("crud_tx", op = %R::KIND, request_id = %Uuid::new_v4());
    let _enter = span.enter();

    let result = body
        .map_err(|e| RestError::Decode(e.body_text()))
        .and_then(|bytes| generate_tx::<R>(state, &bytes));

    match result {
        Ok(resp) => {
            match &resp {
                TxResponse::Unsigned(tx) => info!(gas = tx.value.fee.gas, "unsigned tx generated"),
                TxResponse::GasEstimate { gas_estimate } => info!(gas_estimate, "gas simulated"),
            }
            Ok(Json(resp))
        }
        Err(e) => {
            warn!(code = e.code(), error = %e, "request rejected");
            Err(e)
        }
    }
}
