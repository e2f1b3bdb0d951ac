use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::env;
use std::fmt;
use std::num::ParseIntError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Unexpected,
    InvalidRequest,
    RideNotFound,
    DriverNotFound,
    InvalidStatus,
    InvalidTransition,
    InvalidState,
}

impl ErrorKind {
    pub fn code(&self) -> i32 {
        match self {
            Self::Config => 1,
            Self::Unexpected => 5,
            Self::InvalidRequest => 100,
            Self::RideNotFound => 101,
            Self::InvalidStatus => 102,
            Self::InvalidTransition => 103,
            Self::InvalidState => 104,
            Self::DriverNotFound => 105,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Error {
    pub kind: ErrorKind,
    pub message: String,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.kind.code())
    }
}

impl std::error::Error for Error {}

impl From<env::VarError> for Error {
    fn from(err: env::VarError) -> Self {
        Error::config_error(format!("environment variable error: {}", err))
    }
}

impl From<ParseIntError> for Error {
    fn from(_: ParseIntError) -> Self {
        Error::config_error("invalid numeric configuration value")
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let code = self.code();

        let (status, error_message) = match self.kind {
            ErrorKind::Config | ErrorKind::Unexpected => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
            ErrorKind::RideNotFound | ErrorKind::DriverNotFound => {
                (StatusCode::NOT_FOUND, self.message)
            }
            _ => (StatusCode::BAD_REQUEST, self.message),
        };

        let body = Json(json!({
            "code": code,
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl Error {
    fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn code(&self) -> i32 {
        self.kind.code()
    }

    pub fn invalid_request_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidRequest, message)
    }

    pub fn ride_not_found_error() -> Self {
        Self::new(ErrorKind::RideNotFound, "ride not found")
    }

    pub fn driver_not_found_error() -> Self {
        Self::new(ErrorKind::DriverNotFound, "driver not found")
    }

    pub fn invalid_status_error(status: &str) -> Self {
        Self::new(ErrorKind::InvalidStatus, format!("invalid status: {}", status))
    }

    pub fn invalid_transition_error() -> Self {
        Self::new(ErrorKind::InvalidTransition, "invalid status transition")
    }

    pub fn invalid_state_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidState, message)
    }

    pub fn config_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config, message)
    }

    pub fn unexpected_error() -> Self {
        Self::new(ErrorKind::Unexpected, "unexpected error")
    }

    pub fn is_invalid_request_error(&self) -> bool {
        self.kind == ErrorKind::InvalidRequest
    }

    pub fn is_ride_not_found_error(&self) -> bool {
        self.kind == ErrorKind::RideNotFound
    }

    pub fn is_driver_not_found_error(&self) -> bool {
        self.kind == ErrorKind::DriverNotFound
    }

    pub fn is_invalid_status_error(&self) -> bool {
        self.kind == ErrorKind::InvalidStatus
    }

    pub fn is_invalid_transition_error(&self) -> bool {
        self.kind == ErrorKind::InvalidTransition
    }

    pub fn is_invalid_state_error(&self) -> bool {
        self.kind == ErrorKind::InvalidState
    }
}

#[test]
fn internal_errors_hide_their_message() {
    let response = Error::config_error("RIDESHARE_PORT is not a number").into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let response = Error::unexpected_error().into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn domain_errors_map_to_client_statuses() {
    assert_eq!(
        Error::ride_not_found_error().into_response().status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        Error::driver_not_found_error().into_response().status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        Error::invalid_transition_error().into_response().status(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        Error::invalid_status_error("pending").into_response().status(),
        StatusCode::BAD_REQUEST
    );
}

#[test]
fn parse_failures_become_config_errors() {
    let err: Error = "abc".parse::<u16>().unwrap_err().into();
    assert_eq!(err.kind, ErrorKind::Config);
    assert_eq!(err.code(), 1);
}
