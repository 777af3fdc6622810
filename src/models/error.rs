// ============================================================================
// CLIENT ERROR - Unión etiquetada de errores del cliente HTTP
// ============================================================================

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod codes {
    pub const AUTHENTICATION_REQUIRED: &str = "AUTHENTICATION_REQUIRED";
    pub const INVALID_TOKEN: &str = "INVALID_TOKEN";
    pub const TOKEN_EXPIRED: &str = "TOKEN_EXPIRED";
    pub const SESSION_EXPIRED: &str = "SESSION_EXPIRED";
    pub const INVALID_INPUT: &str = "INVALID_INPUT";
    pub const NOT_FOUND: &str = "NOT_FOUND";
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct ApiErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

/// Rechazo devuelto por el servidor: { error: { code, message, details? } }
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct ApiError {
    #[serde(skip)]
    pub status: u16,
    pub error: ApiErrorDetail,
}

impl ApiError {
    pub fn new(status: u16, code: &str, message: &str) -> Self {
        Self {
            status,
            error: ApiErrorDetail {
                code: code.to_string(),
                message: message.to_string(),
                details: None,
            },
        }
    }

    pub fn code(&self) -> &str {
        &self.error.code
    }

    pub fn message(&self) -> &str {
        &self.error.message
    }
}

/// Servidor inalcanzable; status = 0 cuando no hubo respuesta
#[derive(Clone, PartialEq, Debug)]
pub struct ServerError {
    pub status: u16,
    pub message: String,
}

impl ServerError {
    pub fn unreachable(message: impl Into<String>) -> Self {
        Self {
            status: 0,
            message: message.into(),
        }
    }
}

#[derive(Clone, PartialEq, Debug, thiserror::Error)]
pub enum ClientError {
    #[error("{} ({})", .0.error.message, .0.error.code)]
    Api(ApiError),
    #[error("server error {}: {}", .0.status, .0.message)]
    Server(ServerError),
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl ClientError {
    pub fn api(status: u16, code: &str, message: &str) -> Self {
        ClientError::Api(ApiError::new(status, code, message))
    }

    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            ClientError::Api(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_server(&self) -> Option<&ServerError> {
        match self {
            ClientError::Server(e) => Some(e),
            _ => None,
        }
    }

    /// HTTP status si el servidor respondió
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api(e) => Some(e.status),
            ClientError::Server(e) if e.status != 0 => Some(e.status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Unexpected(format!("Parse error: {}", e))
    }
}
