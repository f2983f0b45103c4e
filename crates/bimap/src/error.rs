//! Bimap error type.

use thiserror::Error;

use crate::types::SideKind;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BiMapError {
    #[error("key is not contained in the container")]
    NotFound,
    #[error("{side} key is already contained in the container")]
    DuplicateKey { side: SideKind },
}
