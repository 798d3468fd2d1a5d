use rocket::{http::Status, serde::json::Json};
use serde::{Deserialize, Serialize};

/// A successful response: the endpoint-specific fields, flagged with `success: true`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Success<T> {
    pub success: bool,
    #[serde(flatten)]
    pub body: T,
}

impl<T> Success<T> {
    pub fn json(body: T) -> Json<Self> {
        Json(Self {
            success: true,
            body,
        })
    }
}

/// The body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: u16,
    pub message: String,
}

impl ErrorBody {
    pub fn for_status(status: Status) -> Self {
        let message = match status.code {
            400 => "bad request".to_string(),
            404 => "resource not found".to_string(),
            405 => "method not allowed".to_string(),
            422 => "unprocessable".to_string(),
            500 => "internal server error".to_string(),
            _ => status
                .reason()
                .map(str::to_lowercase)
                .unwrap_or_else(|| "internal server error".to_string()),
        };
        Self {
            success: false,
            error: status.code,
            message,
        }
    }
}
