use shared::error::StoreError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("amount must be an integer, got '{0}'")]
    InvalidAmount(String),
    #[error("no signed-in user to submit the bill for")]
    NotSignedIn,
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl SubmitError {
    /// The store failure to surface on the bills page, if this was one.
    pub fn store_error(&self) -> Option<&StoreError> {
        match self {
            SubmitError::Store(err) => Some(err),
            _ => None,
        }
    }
}
