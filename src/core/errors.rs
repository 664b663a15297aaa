use spin_sdk::http::Response;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad Request: {0}")]
    BadRequest(String),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Not Found")]
    NotFound,
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Internal Error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::Unauthorized => 401,
            ApiError::NotFound => 404,
            ApiError::Validation(_) => 422,
            ApiError::Internal(_) => 500,
        }
    }

    fn body(&self) -> Option<serde_json::Value> {
        let (name, message) = match self {
            ApiError::NotFound => return None,
            ApiError::BadRequest(msg) => ("BadParamsError", msg.as_str()),
            ApiError::Unauthorized => (
                "OwnershipError",
                "The caller does not own this document",
            ),
            ApiError::Validation(msg) => ("ValidationError", msg.as_str()),
            ApiError::Internal(msg) => ("InternalError", msg.as_str()),
        };
        Some(serde_json::json!({ "name": name, "message": message }))
    }
}

impl From<ApiError> for Response {
    fn from(err: ApiError) -> Self {
        let status = err.status();
        match err.body() {
            Some(body) => Response::builder()
                .status(status)
                .header("Content-Type", "application/json")
                .body(body.to_string().into_bytes())
                .build(),
            None => Response::builder().status(status).body(Vec::new()).build(),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_has_an_empty_body() {
        let resp: Response = ApiError::NotFound.into();
        assert_eq!(*resp.status(), 404);
        assert!(resp.body().is_empty());
    }

    #[test]
    fn validation_carries_the_message() {
        let resp: Response = ApiError::Validation("name: Path `name` is required.".into()).into();
        assert_eq!(*resp.status(), 422);

        let body: serde_json::Value = serde_json::from_slice(resp.body()).unwrap();
        assert_eq!(body["name"], "ValidationError");
        assert_eq!(body["message"], "name: Path `name` is required.");
    }

    #[test]
    fn store_failures_become_internal_errors() {
        let err: ApiError = anyhow::anyhow!("disk on fire").into();
        assert_eq!(err.status(), 500);
    }
}
