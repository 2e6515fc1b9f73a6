use crate::crypto::AddressError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Everything that can stop a tx-generation request. All of them are the
/// caller's fault, so all of them are a 400.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RestError {
    #[error("failed to parse request: {0}")]
    Decode(String),

    #[error("{0}")]
    BaseRequestInvalid(String),

    #[error(transparent)]
    AddressDecode(#[from] AddressError),

    #[error("invalid message: {0}")]
    MessageValidation(String),

    #[error("failed to build transaction: {0}")]
    TxBuild(String),
}

impl RestError {
    pub fn code(&self) -> &'static str {
        match self {
            RestError::Decode(_)             => "DECODE_ERROR",
            RestError::BaseRequestInvalid(_) => "BASE_REQUEST_INVALID",
            RestError::AddressDecode(_)      => "ADDRESS_DECODE_ERROR",
            RestError::MessageValidation(_)  => "MESSAGE_VALIDATION_ERROR",
            RestError::TxBuild(_)            => "TX_BUILD_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let body = json!({ "error": self.to_string(), "code": self.code() });
        (self.status(), Json(body)).into_response()
    }
}
