use actix_web::http::header;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // 400 BAD REQUEST
    InvalidBody,
    MalformedEvent,

    // 405 METHOD NOT ALLOWED
    MethodNotAllowed,

    // 500 SERVER ERRORS
    ForwardFailed,
}

impl ErrorCode {
    pub fn message(&self) -> &'static str {
        match self {
            ErrorCode::InvalidBody => "Failed to read request body",
            ErrorCode::MalformedEvent => "Failed to decode event payload",

            ErrorCode::MethodNotAllowed => "Only POST is supported",

            ErrorCode::ForwardFailed => "Failed to send POST request",
        }
    }

    pub fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            ErrorCode::InvalidBody |
            ErrorCode::MalformedEvent => StatusCode::BAD_REQUEST,

            ErrorCode::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,

            ErrorCode::ForwardFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    ApiError(ErrorCode, Option<String>),
}

impl AppError {
    pub fn new(code: ErrorCode) -> Self {
        AppError::ApiError(code, None)
    }

    pub fn with_detail(code: ErrorCode, detail: String) -> Self {
        AppError::ApiError(code, Some(detail))
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::ApiError(code, _) => *code,
        }
    }
}

#[derive(serde::Serialize)]
struct ErrorResponse {
    code: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

impl ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        self.code().status_code()
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::ApiError(code, detail) => {
                let response = ErrorResponse {
                    code: format!("{:?}", code),
                    message: code.message().to_string(),
                    detail: detail.clone(),
                };

                let mut builder = HttpResponse::build(code.status_code());
                if *code == ErrorCode::MethodNotAllowed {
                    builder.insert_header((header::ALLOW, "POST"));
                }
                builder.json(response)
            }
        }
    }
}

/// Failures of the decode, render and forward pipeline. All are terminal for the request.
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("failed to unmarshal alert payload: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("failed to marshal notification: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("failed to send POST request: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned non-200 status code: {}", .0.as_u16())]
    Remote(reqwest::StatusCode),
}

impl RelayError {
    pub fn kind(&self) -> &'static str {
        match self {
            RelayError::Decode(_) => "decode",
            RelayError::Encode(_) => "encode",
            RelayError::Transport(_) => "transport",
            RelayError::Remote(_) => "remote",
        }
    }
}

// The caller only learns that the relay failed; the cause stays in the server log.
impl From<RelayError> for AppError {
    fn from(_: RelayError) -> Self {
        AppError::new(ErrorCode::ForwardFailed)
    }
}
