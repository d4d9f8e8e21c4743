use actix_web::http::StatusCode;
use actix_web::ResponseError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PayoffError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, PayoffError>;

impl PayoffError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

impl ResponseError for PayoffError {
    fn status_code(&self) -> StatusCode {
        match self {
            PayoffError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_argument_is_a_bad_request() {
        let err = PayoffError::invalid_argument("expiry days must be in [0, 30], got 31");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.to_string(),
            "Invalid argument: expiry days must be in [0, 30], got 31"
        );
    }
}
