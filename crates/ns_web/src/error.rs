use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ns_core::Error;
use serde_json::json;
use tracing::{error, warn};

/// Maps pipeline errors and extractor rejections onto `{"error": ...}` payloads.
#[derive(Debug)]
pub enum ApiError {
    Pipeline(Error),
    /// Request could not be decoded; keeps the extractor's status code.
    Rejected { status: StatusCode, message: String },
}

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        Self::Pipeline(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Pipeline(Error::EmptyInput(_) | Error::Config(_)) => StatusCode::BAD_REQUEST,
            Self::Pipeline(Error::NoArticles | Error::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Pipeline(
                Error::Provider(_) | Error::Http(_) | Error::Speech(_) | Error::Translation(_),
            ) => StatusCode::BAD_GATEWAY,
            Self::Pipeline(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Rejected { status, .. } => *status,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Pipeline(e) => e.to_string(),
            Self::Rejected { message, .. } => message.clone(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();
        if status.is_server_error() {
            error!("❌ {}", message);
        } else if let Self::Rejected { .. } = self {
            warn!("⚠️ Rejected request: {}", message);
        }
        (status, Json(json!({ "error": message }))).into_response()
    }
}
