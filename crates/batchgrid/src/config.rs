//! Batch processing configuration.

use std::num::NonZeroUsize;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Tuning knobs for batch fan-out.
///
/// Both knobs default to off, which reproduces the adapter's original
/// behavior exactly: every operation starts immediately and nothing
/// bounds how long one may run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Cap on concurrently running operations. `None` fans out all
    /// operations of a batch at once. When set, operations still start
    /// in input order and results stay input-ordered.
    pub max_concurrent: Option<NonZeroUsize>,

    /// Upper bound on a single operation's execution. `None` means a
    /// hung operation stalls the whole batch indefinitely. When set, an
    /// expired operation fails the batch with
    /// [`BatchError::OperationTimeout`] and cancels its siblings.
    ///
    /// [`BatchError::OperationTimeout`]: crate::BatchError::OperationTimeout
    pub operation_timeout: Option<Duration>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_unbounded() {
        let config = BatchConfig::default();
        assert!(config.max_concurrent.is_none());
        assert!(config.operation_timeout.is_none());
    }
}
