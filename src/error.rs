//! Errors surfaced by table construction and growth.

use thiserror::Error;

/// Failure of an operation that allocates a bucket or slot array.
///
/// Lookups never fail: an absent key is reported as `None`/`false`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// A table was requested with zero capacity.
    #[error("table capacity must be greater than zero")]
    InvalidCapacity,
    /// The backing array could not be allocated. The table the operation
    /// ran against, if any, is left as it was before the allocation.
    #[error("could not allocate a backing array of {requested} slots")]
    AllocFailed { requested: usize },
}

/// Allocates `len` copies of `fill`, reporting allocation failure instead of
/// aborting.
pub(crate) fn try_filled<T: Clone>(len: usize, fill: T) -> Result<Vec<T>, TableError> {
    let mut v = Vec::new();
    v.try_reserve_exact(len)
        .map_err(|_| TableError::AllocFailed { requested: len })?;
    v.resize(len, fill);
    Ok(v)
}
