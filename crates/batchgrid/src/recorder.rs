//! In-memory capture of one operation's response.

use bytes::{Bytes, BytesMut};
use http::{HeaderMap, StatusCode};

use crate::sink::ResponseSink;

/// Records everything one handler invocation writes, without touching
/// the real transport.
///
/// One recorder exists per batched operation. It is owned exclusively
/// by that operation's future while it runs and is read only after the
/// join barrier — the barrier, not a lock, is what makes the reads safe.
#[derive(Debug, Default)]
pub struct ResponseRecorder {
    headers: HeaderMap,
    status: Option<StatusCode>,
    body: BytesMut,
}

impl ResponseRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Status written by the handler, if any. The last write wins.
    ///
    /// The batch pipeline deliberately ignores this — batch-level
    /// status is always 200 — but it is kept observable for callers
    /// that want to log per-operation outcomes.
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Consume the recorder into its headers and body.
    pub fn into_parts(self) -> (HeaderMap, Bytes) {
        (self.headers, self.body.freeze())
    }
}

impl ResponseSink for ResponseRecorder {
    fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    fn set_status(&mut self, status: StatusCode) {
        self.status = Some(status);
    }

    fn append_body(&mut self, chunk: &[u8]) {
        self.body.extend_from_slice(chunk);
    }
}
