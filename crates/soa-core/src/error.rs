//! Container error type.
//!
//! Every fault in this workspace is a caller precondition violation (bad
//! index, bad range, bad key).  They are reported the same way in debug and
//! release builds, and a failed operation leaves the container untouched.

use thiserror::Error;

/// The error type shared by `soa-store` and `soa-mapped`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SoaError {
    #[error("row {index} out of range for store of length {len}")]
    RowOutOfRange { index: usize, len: usize },

    #[error("range {start}..{start}+{count} out of bounds for store of length {len}")]
    RangeOutOfBounds {
        start: usize,
        count: usize,
        len:   usize,
    },

    #[error("key {0} is already bound to a row")]
    DuplicateKey(String),

    #[error("key {0} not found")]
    KeyNotFound(String),

    #[error("key/index maps out of sync: {0}")]
    Inconsistent(String),
}

impl SoaError {
    /// Render `key` for the keyed variants.
    pub fn duplicate_key<K: std::fmt::Debug>(key: &K) -> Self {
        SoaError::DuplicateKey(format!("{key:?}"))
    }

    pub fn key_not_found<K: std::fmt::Debug>(key: &K) -> Self {
        SoaError::KeyNotFound(format!("{key:?}"))
    }
}

/// Shorthand result type for all `soa-*` crates.
pub type SoaResult<T> = Result<T, SoaError>;

/// `Ok(())` when `index < len`, otherwise [`SoaError::RowOutOfRange`].
#[inline]
pub fn check_row(index: usize, len: usize) -> SoaResult<()> {
    if index < len {
        Ok(())
    } else {
        Err(SoaError::RowOutOfRange { index, len })
    }
}
