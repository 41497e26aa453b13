use std::sync::Arc;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;
use crate::catalog::domain::CatalogService;
use crate::core::command::CommandError;
use crate::core::domain::Configuration;
use crate::core::library::FieldViolation;

#[derive(Clone)]
pub struct AppState {
    pub config: Configuration,
    pub catalog: Arc<dyn CatalogService>,
}

impl AppState {
    pub fn new(config: &Configuration, catalog: Box<dyn CatalogService>) -> AppState {
        AppState {
            config: config.clone(),
            catalog: Arc::from(catalog),
        }
    }
}

// ErrorResponse is the JSON body of every failed request
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub error: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<FieldViolation>,
}

impl ErrorResponse {
    fn build(status: StatusCode, error: &str, message: String, violations: Vec<FieldViolation>) -> ServerError {
        (status, Json(ErrorResponse {
            status: status.as_u16(),
            error: error.to_string(),
            message,
            violations,
        }))
    }
}

pub type ServerError = (StatusCode, Json<ErrorResponse>);

pub fn json_to_server_error(err: serde_json::Error) -> ServerError {
    ErrorResponse::build(StatusCode::BAD_REQUEST, "SerializationError", format!("{}", err), vec![])
}

// malformed bodies, missing content type and bad path ids all answer 400 with a json body
pub fn json_rejection_to_server_error(rejection: JsonRejection) -> ServerError {
    ErrorResponse::build(StatusCode::BAD_REQUEST, "SerializationError", rejection.body_text(), vec![])
}

pub fn path_rejection_to_server_error(rejection: PathRejection) -> ServerError {
    ErrorResponse::build(StatusCode::BAD_REQUEST, "SerializationError", rejection.body_text(), vec![])
}

impl From<CommandError> for ServerError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Database { message, reason_code, retryable } => {
                error!(message = message.as_str(), reason_code = ?reason_code, retryable, "database failure");
                ErrorResponse::build(StatusCode::INTERNAL_SERVER_ERROR, "DatabaseError", message, vec![])
            }
            CommandError::DuplicateKey { message } => {
                ErrorResponse::build(StatusCode::CONFLICT, "Conflict", message, vec![])
            }
            CommandError::NotFound { message } => {
                ErrorResponse::build(StatusCode::NOT_FOUND, "NotFound", message, vec![])
            }
            CommandError::Runtime { message, reason_code, .. } => {
                error!(message = message.as_str(), reason_code = ?reason_code, "runtime failure");
                ErrorResponse::build(StatusCode::INTERNAL_SERVER_ERROR, "RuntimeError", message, vec![])
            }
            CommandError::Serialization { message } => {
                ErrorResponse::build(StatusCode::BAD_REQUEST, "SerializationError", message, vec![])
            }
            CommandError::Validation { message, violations } => {
                ErrorResponse::build(StatusCode::BAD_REQUEST, "ValidationError", message, violations)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use crate::core::command::CommandError;
    use crate::core::controller::ServerError;
    use crate::core::library::FieldViolation;

    #[tokio::test]
    async fn test_should_map_command_errors_to_status() {
        let cases = vec![
            (CommandError::NotFound { message: "test".to_string() }, StatusCode::NOT_FOUND),
            (CommandError::DuplicateKey { message: "test".to_string() }, StatusCode::CONFLICT),
            (CommandError::Serialization { message: "test".to_string() }, StatusCode::BAD_REQUEST),
            (CommandError::Validation { message: "test".to_string(), violations: vec![] }, StatusCode::BAD_REQUEST),
            (CommandError::Database { message: "test".to_string(), reason_code: None, retryable: false }, StatusCode::INTERNAL_SERVER_ERROR),
            (CommandError::Runtime { message: "test".to_string(), reason_code: None, retryable: false }, StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            let (actual, body) = ServerError::from(err);
            assert_eq!(status, actual);
            assert_eq!(status.as_u16(), body.status);
        }
    }

    #[tokio::test]
    async fn test_should_carry_violations() {
        let (_, body) = ServerError::from(CommandError::Validation {
            message: "invalid book request".to_string(),
            violations: vec![FieldViolation::new("price", "must not be null")],
        });
        assert_eq!("ValidationError", body.error.as_str());
        assert_eq!(vec![FieldViolation::new("price", "must not be null")], body.violations);
    }
}
