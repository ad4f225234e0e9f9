//! batchgrid — request batching adapter for HTTP query protocols.
//!
//! One HTTP request body is either a single logical operation or a JSON
//! array of operations submitted as one call. The adapter classifies
//! the body by its first byte and either hands it to the wrapped
//! single-operation handler untouched, or fans the array out
//! concurrently and reassembles the results:
//!
//! ```text
//! request body
//!   │
//!   ├── first byte ≠ '[' ──► handler(real sink, request)
//!   │
//!   └── first byte = '[' ──► decode outer array
//!         │
//!         ├── operation 0 ──► handler(recorder 0) ┐
//!         ├── operation 1 ──► handler(recorder 1) ├── concurrent
//!         └── operation N ──► handler(recorder N) ┘
//!                │
//!                ▼ join barrier
//!         merge headers → splice bodies → 200 + JSON array
//! ```
//!
//! Ordering in the response array is positional: `output[i]` is exactly
//! what operation `i`'s handler wrote, regardless of completion order.
//! Per-operation status codes are discarded — the batch response is
//! always 200, and an operation reports its own failure inside its JSON
//! body.
//!
//! The adapter never parses operation contents, manages no connections,
//! and retries nothing. The handler is an opaque collaborator behind
//! the [`OperationHandler`] seam; both the real response and the
//! per-operation recorders sit behind the [`ResponseSink`] capability.

pub mod assemble;
pub mod config;
pub mod detect;
pub mod error;
pub mod fanout;
pub mod handler;
pub mod merge;
pub mod processor;
pub mod recorder;
pub mod request;
pub mod sink;

pub use config::BatchConfig;
pub use detect::{RequestKind, classify};
pub use error::BatchError;
pub use handler::{HandlerFn, OperationHandler, handler_fn};
pub use processor::BatchProcessor;
pub use recorder::ResponseRecorder;
pub use request::OperationRequest;
pub use sink::{BufferedResponse, ResponseSink};
