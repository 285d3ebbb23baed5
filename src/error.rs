use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error("transaction requires sender, receiver and amount")]
    MissingFields,

    #[error("no nodes provided")]
    NoNodesProvided,

    #[error("invalid node address: {0:?}")]
    InvalidAddress(String),

    #[error("malformed request body: {0}")]
    MalformedBody(String),

    #[error("mining failed: {0}")]
    Mining(String),
}

impl ResponseError for NodeError {
    fn status_code(&self) -> StatusCode {
        match self {
            NodeError::MissingFields
            | NodeError::NoNodesProvided
            | NodeError::InvalidAddress(_)
            | NodeError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            NodeError::Mining(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}
