//! Batched request processing pipeline.

use std::sync::Arc;

use http::StatusCode;
use http::header::{self, HeaderValue};
use tracing::{debug, warn};

use crate::assemble::assemble_array;
use crate::config::BatchConfig;
use crate::detect::{RequestKind, classify};
use crate::error::BatchError;
use crate::fanout::{decode_operations, run_operations};
use crate::handler::OperationHandler;
use crate::merge::merge_headers;
use crate::recorder::ResponseRecorder;
use crate::request::OperationRequest;
use crate::sink::ResponseSink;

/// Fans batched requests out to a single-operation handler.
///
/// A request body that is a JSON array is decoded into operations, each
/// executed concurrently against the handler with its own in-memory
/// recorder. Once every operation has finished, the recorded headers
/// are merged onto the real sink and the recorded bodies are spliced
/// into one input-ordered JSON array under a fixed 200 status. Any
/// other body is handed to the handler untouched, real sink and all.
pub struct BatchProcessor {
    handler: Arc<dyn OperationHandler>,
    config: BatchConfig,
}

impl BatchProcessor {
    /// Create a processor with default fan-out: unbounded concurrency,
    /// no per-operation timeout.
    pub fn new(handler: Arc<dyn OperationHandler>) -> Self {
        Self::with_config(handler, BatchConfig::default())
    }

    pub fn with_config(handler: Arc<dyn OperationHandler>, config: BatchConfig) -> Self {
        Self { handler, config }
    }

    /// Process one incoming request.
    ///
    /// On `Err` nothing has been written to the sink; the caller picks
    /// the HTTP-level error response.
    pub async fn process(
        &self,
        sink: &mut dyn ResponseSink,
        request: OperationRequest,
    ) -> Result<(), BatchError> {
        match classify(request.body()) {
            RequestKind::Single => {
                self.handler.handle(sink, request).await;
                Ok(())
            }
            RequestKind::Batch => self.process_batch(sink, request).await,
        }
    }

    async fn process_batch(
        &self,
        sink: &mut dyn ResponseSink,
        request: OperationRequest,
    ) -> Result<(), BatchError> {
        let operations = match decode_operations(request.body()) {
            Ok(operations) => operations,
            Err(e) => {
                warn!(error = %e, "failed to decode batch array");
                return Err(e);
            }
        };

        debug!(operations = operations.len(), "dispatching batch");

        let recorders =
            run_operations(self.handler.as_ref(), &request, operations, &self.config).await?;

        let (recorded_headers, bodies): (Vec<_>, Vec<_>) = recorders
            .into_iter()
            .map(ResponseRecorder::into_parts)
            .unzip();

        // Assemble before touching the sink: an assembly failure must
        // leave the real response unwritten.
        let body = assemble_array(&bodies)?;

        for headers in &recorded_headers {
            merge_headers(sink.headers_mut(), headers);
        }
        sink.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        // Batch-level status is always 200; per-operation statuses were
        // recorded but an operation's failure belongs in its JSON body.
        sink.set_status(StatusCode::OK);
        sink.append_body(&body);

        Ok(())
    }
}
