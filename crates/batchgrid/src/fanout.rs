//! Concurrent fan-out of batch operations.
//!
//! The scheduler decodes the outer JSON array lazily — each element
//! stays raw bytes, so malformed inner JSON is the handler's problem —
//! then runs one future per operation and waits for all of them at a
//! join barrier. All operation futures are children of the caller's
//! future: dropping it (a disconnected client, a cancelled request)
//! cancels every in-flight operation, which is the shared-context
//! semantics the adapter promises.

use bytes::Bytes;
use futures_util::future::try_join_all;
use futures_util::stream::{self, StreamExt, TryStreamExt};
use serde_json::value::RawValue;

use crate::config::BatchConfig;
use crate::error::BatchError;
use crate::handler::OperationHandler;
use crate::recorder::ResponseRecorder;
use crate::request::OperationRequest;

/// Decode the outer JSON array into per-operation body views.
///
/// Fragments are zero-copy slices of the original buffer. Decode
/// failure means the outer array itself is malformed; nothing has been
/// dispatched at that point.
pub fn decode_operations(body: &Bytes) -> Result<Vec<Bytes>, BatchError> {
    let fragments: Vec<&RawValue> = serde_json::from_slice(body)?;
    Ok(fragments
        .into_iter()
        .map(|fragment| body.slice_ref(fragment.get().as_bytes()))
        .collect())
}

/// Run every operation against the handler and wait for all of them.
///
/// Each operation gets a fresh [`ResponseRecorder`] and a clone of the
/// request metadata with its own body fragment. The returned recorders
/// are in input order — ordering is positional, never completion order.
/// With a configured concurrency cap the fan-out runs through an
/// order-preserving buffered stream instead of starting everything at
/// once. The first error cancels the remaining operations.
pub async fn run_operations(
    handler: &dyn OperationHandler,
    request: &OperationRequest,
    operations: Vec<Bytes>,
    config: &BatchConfig,
) -> Result<Vec<ResponseRecorder>, BatchError> {
    let timeout = config.operation_timeout;

    let tasks = operations.into_iter().enumerate().map(|(index, operation)| {
        let operation_request = request.with_body(operation);
        async move {
            let mut recorder = ResponseRecorder::new();
            match timeout {
                None => handler.handle(&mut recorder, operation_request).await,
                Some(timeout) => {
                    tokio::time::timeout(timeout, handler.handle(&mut recorder, operation_request))
                        .await
                        .map_err(|_| BatchError::OperationTimeout { index, timeout })?;
                }
            }
            Ok(recorder)
        }
    });

    match config.max_concurrent {
        None => try_join_all(tasks).await,
        Some(limit) => stream::iter(tasks).buffered(limit.get()).try_collect().await,
    }
}
