// ============================================================================
// ERROR HANDLER - Mensajes de error para el usuario
// ============================================================================

use serde_json::Value;
use crate::models::{codes, ApiError, ApiErrorDetail, ClientError};
use crate::utils::i18n::tr;

/// Mensaje a mostrar para un error del cliente
pub fn handle_api_error(error: &ClientError) -> String {
    match error {
        ClientError::Api(e) => e.error.message.clone(),
        ClientError::Server(e) => e.message.clone(),
        ClientError::Unexpected(_) => tr("err_unexpected"),
    }
}

pub fn is_api_error(error: &ClientError) -> bool {
    matches!(error, ClientError::Api(_))
}

pub fn is_server_error(error: &ClientError) -> bool {
    error.as_server().is_some()
}

pub fn is_error_code(error: &ClientError, code: &str) -> bool {
    error.as_api().map(|e| e.error.code == code).unwrap_or(false)
}

pub fn is_auth_error(error: &ClientError) -> bool {
    [
        codes::AUTHENTICATION_REQUIRED,
        codes::INVALID_TOKEN,
        codes::TOKEN_EXPIRED,
        codes::SESSION_EXPIRED,
    ]
    .iter()
    .any(|code| is_error_code(error, code))
}

pub fn is_input_error(error: &ClientError) -> bool {
    is_error_code(error, codes::INVALID_INPUT)
}

pub fn get_friendly_error_message(error: &ClientError) -> String {
    match error {
        ClientError::Api(e) => {
            if is_auth_error(error) {
                tr("err_session_expired")
            } else if is_input_error(error) && e.error.message.is_empty() {
                tr("err_invalid_input")
            } else {
                e.error.message.clone()
            }
        }
        ClientError::Server(e) if e.status == 0 => tr("err_unreachable"),
        ClientError::Server(e) => e.message.clone(),
        ClientError::Unexpected(_) => tr("err_unexpected_later"),
    }
}

/// Clasifica un cuerpo JSON arbitrario: { error: { code, message } } → Api, resto → Unexpected
pub fn classify_error_body(status: u16, body: &Value) -> ClientError {
    let detail = body
        .get("error")
        .filter(|e| e.is_object())
        .filter(|e| e.get("code").is_some() && e.get("message").is_some());

    match detail {
        Some(detail) => {
            let text = |key: &str| match detail.get(key) {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Null) | None => String::new(),
                Some(other) => other.to_string(),
            };
            ClientError::Api(ApiError {
                status,
                error: ApiErrorDetail {
                    code: text("code"),
                    message: text("message"),
                    details: detail.get("details").cloned().filter(|d| !d.is_null()),
                },
            })
        }
        None => ClientError::Unexpected(format!("Unrecognized error body: {}", body)),
    }
}
