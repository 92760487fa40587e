use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::Display;
use serde_json::json;

#[derive(Debug, Display)]
pub enum ApiError {
    #[display(fmt = "Validation failed: {}", "_0.join(\"; \")")]
    Validation(Vec<String>),

    #[display(fmt = "{} not found", _0)]
    NotFound(String),

    #[display(fmt = "{}", _0)]
    Conflict(String),

    #[display(fmt = "Bad request: {}", _0)]
    BadRequest(String),

    #[display(fmt = "Import rejected: {}", _0)]
    MalformedImport(String),

    #[display(fmt = "Internal Server Error")]
    Internal,
}

impl std::error::Error for ApiError {}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::BadRequest(_) | ApiError::MalformedImport(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let details = match self {
            ApiError::Validation(issues) => json!(issues),
            _ => json!(null),
        };
        HttpResponse::build(self.status_code()).json(json!({
            "message": self.to_string(),
            "details": details,
        }))
    }
}

impl From<Vec<String>> for ApiError {
    fn from(issues: Vec<String>) -> Self {
        ApiError::Validation(issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_lists_every_issue() {
        let err = ApiError::Validation(vec!["name must not be empty".into(), "no rates".into()]);

        assert_eq!(
            err.to_string(),
            "Validation failed: name must not be empty; no rates"
        );
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn statuses_per_variant() {
        assert_eq!(ApiError::NotFound("Profile 'x'".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::MalformedImport("bad".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::Conflict("dup".into()).status_code(), StatusCode::CONFLICT);
        assert_eq!(ApiError::Internal.to_string(), "Internal Server Error");
    }
}
