//! Error type shared by table construction and mutation.

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum TableError {
    /// The bucket array for a new capacity could not be reserved.
    #[error("failed to allocate a bucket array of {slots} slots")]
    AllocationFailed { slots: usize },
    #[error("invalid table configuration: {0}")]
    InvalidConfig(&'static str),
}
