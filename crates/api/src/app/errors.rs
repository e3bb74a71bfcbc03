use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use opsdesk_commands::CommandBusError;
use opsdesk_core::DomainError;

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::InvariantViolation(msg) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "invariant_violation", msg)
        }
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        DomainError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
        DomainError::Unauthorized => {
            json_error(StatusCode::FORBIDDEN, "unauthorized", "unauthorized")
        }
    }
}

pub fn bus_error_to_response(err: CommandBusError) -> axum::response::Response {
    match err {
        CommandBusError::Domain(e) => domain_error_to_response(e),
        // Routing failures mean broken wiring, not a bad request.
        CommandBusError::NoHandler(_)
        | CommandBusError::DuplicateHandler(_)
        | CommandBusError::Routing(_)
        | CommandBusError::Poisoned => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "dispatch_error",
            err.to_string(),
        ),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
