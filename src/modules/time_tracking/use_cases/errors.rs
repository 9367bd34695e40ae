use thiserror::Error;

use crate::modules::time_tracking::core::decision::{DecideError, ErrorKind};
use crate::modules::time_tracking::core::ports::StoreError;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DecideError),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl ApplicationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApplicationError::Domain(reason) => reason.kind(),
            ApplicationError::Storage(_) => ErrorKind::StorageFailure,
        }
    }
}
