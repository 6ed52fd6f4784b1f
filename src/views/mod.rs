//! Controllers behind the stock, product and sales screens.
//!
//! Each view keeps only its own form state and borrows the shared
//! [`AppState`](crate::state::AppState) for every operation.

pub mod admin;
pub mod edit;
pub mod product;
pub mod sale;
pub mod stock;

use crate::error::{AppError, AppResult};

/// Explicit answer to a "are you sure?" prompt before a destructive call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

impl Confirmation {
    pub fn from_flag(confirmed: bool) -> Self {
        if confirmed {
            Confirmation::Confirmed
        } else {
            Confirmation::Declined
        }
    }

    pub fn require(self, action: &str) -> AppResult<()> {
        match self {
            Confirmation::Confirmed => Ok(()),
            Confirmation::Declined => Err(AppError::cancelled(action)),
        }
    }
}

pub(crate) fn required_name(name: &str, field: &str) -> AppResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::validation(format!("{field} is required")));
    }
    Ok(name.to_string())
}
