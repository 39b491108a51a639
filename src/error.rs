use std::collections::TryReserveError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("table must have at least one bucket")]
    ZeroBuckets,
    #[error("bucket index {index} out of range for a table of {buckets} buckets")]
    BucketOutOfRange { index: u64, buckets: usize },
    #[error("failed to allocate bucket array: {0}")]
    AllocationFailed(#[from] TryReserveError),
}
