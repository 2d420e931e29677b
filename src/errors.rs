use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use thiserror::Error;

use crate::domain::errors::DomainError;

/// Message shown for every failed status transition, whatever the cause.
pub const STATUS_UPDATE_FAILED: &str = "Failed to update status";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Conflict(String),

    /// A failed status transition. Keeps the cause's status code but shows
    /// one generic message.
    #[error("Failed to update status")]
    StatusUpdate(#[source] Box<AppError>),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_update(cause: impl Into<AppError>) -> Self {
        let cause = cause.into();
        log::warn!("Status update failed: {}", cause);
        AppError::StatusUpdate(Box::new(cause))
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::NotFound(_) => AppError::NotFound(e.to_string()),
            DomainError::InvalidInput(msg) => AppError::BadRequest(msg),
            DomainError::InvalidTransition { .. } | DomainError::Conflict(_) => {
                AppError::Conflict(e.to_string())
            }
            DomainError::Forbidden(msg) => AppError::Forbidden(msg),
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<actix_web::error::BlockingError> for AppError {
    fn from(e: actix_web::error::BlockingError) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::StatusUpdate(cause) => cause.status_code(),
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::Internal(msg) => {
                log::error!("Internal error: {}", msg);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": message
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use actix_web::ResponseError;

    #[test]
    fn not_found_returns_404() {
        let resp = AppError::NotFound("Order not found".to_string()).error_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn internal_error_returns_500() {
        let err = AppError::Internal("something went wrong".to_string());
        assert_eq!(
            err.error_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[actix_web::test]
    async fn internal_error_body_hides_details() {
        let resp = AppError::Internal("password=hunter2".to_string()).error_response();
        let body = to_bytes(resp.into_body()).await.unwrap();
        assert_eq!(body, r#"{"error":"Internal server error"}"#);
    }

    #[test]
    fn domain_not_found_maps_to_app_not_found() {
        let app_err: AppError = DomainError::NotFound("Order").into();
        assert!(matches!(app_err, AppError::NotFound(ref msg) if msg == "Order not found"));
    }

    #[test]
    fn domain_internal_maps_to_app_internal() {
        let app_err: AppError = DomainError::Internal("oops".to_string()).into();
        assert!(matches!(app_err, AppError::Internal(_)));
    }

    #[test]
    fn domain_invalid_input_maps_to_bad_request() {
        let app_err: AppError = DomainError::InvalidInput("bad value".to_string()).into();
        assert_eq!(app_err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn invalid_transition_maps_to_conflict() {
        let app_err: AppError = DomainError::InvalidTransition {
            from: "CANCELLED",
            action: "cancel",
        }
        .into();
        assert_eq!(app_err.status_code(), StatusCode::CONFLICT);
        assert_eq!(app_err.to_string(), "Cannot cancel when status is CANCELLED");
    }

    #[test]
    fn status_update_keeps_code_but_hides_cause() {
        let err = AppError::status_update(DomainError::Forbidden("not the owner".to_string()));
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(err.to_string(), STATUS_UPDATE_FAILED);

        let err = AppError::status_update(DomainError::NotFound("Order"));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), STATUS_UPDATE_FAILED);
    }
}
