//! Batch processing error types.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while processing a batched request.
///
/// When any of these is returned, nothing has been written to the real
/// response sink. Application-level failures inside an individual
/// operation are not errors at this layer — the handler encodes those
/// into its own JSON body.
#[derive(Debug, Error)]
pub enum BatchError {
    /// The request body began with `[` but is not a valid JSON array.
    #[error("malformed batch array: {0}")]
    Decode(#[from] serde_json::Error),

    /// An operation recorded an empty body, which cannot be spliced
    /// into the response array as a JSON fragment.
    #[error("operation {index} recorded an empty response body")]
    Assembly { index: usize },

    /// An operation exceeded the configured per-operation timeout.
    /// Only produced when [`BatchConfig::operation_timeout`] is set.
    ///
    /// [`BatchConfig::operation_timeout`]: crate::BatchConfig::operation_timeout
    #[error("operation {index} timed out after {timeout:?}")]
    OperationTimeout { index: usize, timeout: Duration },
}
