//! API Error Types
//!
//! Converts domain and wallet failures into JSON error responses with
//! matching status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::DomainError;
use crate::wallet::WalletError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Wallet(#[from] WalletError),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
    pub request_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::Domain(e) => domain_status(e),
            ApiError::Wallet(e) => wallet_status(e),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            ApiError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
        }
    }
}

fn domain_status(err: &DomainError) -> (StatusCode, &'static str) {
    match err {
        DomainError::UserNotFound(_) => (StatusCode::NOT_FOUND, "USER_NOT_FOUND"),
        DomainError::ChallengeNotFound(_) => (StatusCode::NOT_FOUND, "CHALLENGE_NOT_FOUND"),
        DomainError::PhotoNotFound(_) | DomainError::CommentNotFound(_) => {
            (StatusCode::NOT_FOUND, "NOT_FOUND")
        }
        DomainError::NotJoined(_) => (StatusCode::NOT_FOUND, "NOT_JOINED"),
        DomainError::InvalidStake(_) => (StatusCode::BAD_REQUEST, "INVALID_STAKE"),
        DomainError::InvalidDuration(_)
        | DomainError::InvalidChallenge(_)
        | DomainError::InvalidInput(_)
        | DomainError::UnknownCurrency(_)
        | DomainError::UnknownMetric(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        DomainError::PhotoRequired => (StatusCode::BAD_REQUEST, "PHOTO_REQUIRED"),
        DomainError::AlreadyJoined(_) => (StatusCode::CONFLICT, "ALREADY_JOINED"),
        DomainError::ChallengeFull(_) => (StatusCode::CONFLICT, "CHALLENGE_FULL"),
        DomainError::InvalidTransition { .. } => (StatusCode::CONFLICT, "INVALID_STATE"),
    }
}

fn wallet_status(err: &WalletError) -> (StatusCode, &'static str) {
    match err {
        WalletError::NotConnected => (StatusCode::FORBIDDEN, "WALLET_NOT_CONNECTED"),
        WalletError::InsufficientBalance { .. } => (StatusCode::CONFLICT, "INSUFFICIENT_BALANCE"),
        WalletError::StakeAlreadyOpen(_) => (StatusCode::CONFLICT, "STAKE_ALREADY_OPEN"),
        WalletError::ConnectionInProgress => (StatusCode::CONFLICT, "CONNECTION_IN_PROGRESS"),
        WalletError::NoStakeFound(_) => (StatusCode::NOT_FOUND, "NO_STAKE_FOUND"),
        WalletError::InvalidStake(_) => (StatusCode::BAD_REQUEST, "INVALID_STAKE"),
        WalletError::UnknownProvider(_) => (StatusCode::BAD_REQUEST, "UNKNOWN_PROVIDER"),
        WalletError::Io(_) | WalletError::Serialization(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "LEDGER_ERROR")
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let request_id = uuid::Uuid::new_v4().to_string();

        if status.is_server_error() {
            tracing::error!(
                request_id = %request_id,
                error_code = %code,
                error_message = %self,
                "API error occurred"
            );
        } else {
            tracing::warn!(
                request_id = %request_id,
                error_code = %code,
                error_message = %self,
                "Request rejected"
            );
        }

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message: self.to_string(),
            },
            request_id,
        };

        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ApiError::from(WalletError::NotConnected), StatusCode::FORBIDDEN),
            (
                ApiError::from(WalletError::InsufficientBalance {
                    requested: 20.0,
                    available: 5.0,
                }),
                StatusCode::CONFLICT,
            ),
            (
                ApiError::from(DomainError::ChallengeNotFound("9".to_string())),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::from(DomainError::InvalidStake("Minimum stake is $1".to_string())),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::from(DomainError::AlreadyJoined("1".to_string())),
                StatusCode::CONFLICT,
            ),
            (
                ApiError::Internal("boom".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.status_and_code().0, status, "{}", err);
        }
    }

    #[test]
    fn test_wallet_gate_code() {
        let (_, code) = ApiError::from(WalletError::NotConnected).status_and_code();
        assert_eq!(code, "WALLET_NOT_CONNECTED");
    }

    #[test]
    fn test_transparent_message() {
        let err = ApiError::from(DomainError::InvalidStake("Maximum stake is $50".to_string()));
        assert_eq!(err.to_string(), "Maximum stake is $50");
    }
}
