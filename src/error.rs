// src/error.rs
use http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Transport failure before any response arrived
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx response; `detail` is the server message, verbatim
    #[error("{detail}")]
    Api { status: StatusCode, detail: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    ValidationError(String),

    #[error("Not enough stock of {item}. Available: {available} {unit}, requested: {requested} {unit}")]
    InsufficientStock {
        item: String,
        available: f64,
        requested: f64,
        unit: String,
    },

    /// Destructive action attempted without confirmation
    #[error("{0} cancelled: confirmation required")]
    Cancelled(String),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::ValidationError(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }

    pub fn cancelled(action: impl Into<String>) -> Self {
        AppError::Cancelled(action.into())
    }

    pub fn insufficient_stock(
        item: impl Into<String>,
        available: f64,
        requested: f64,
        unit: impl Into<String>,
    ) -> Self {
        AppError::InsufficientStock {
            item: item.into(),
            available,
            requested,
            unit: unit.into(),
        }
    }

    /// Local validation failures are raised before any request is sent.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AppError::ValidationError(_) | AppError::InsufficientStock { .. }
        )
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            AppError::Api { status, .. } => Some(*status),
            AppError::Network(e) => e.status(),
            _ => None,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
