//! Response sink capability.
//!
//! Handlers never see a transport — they see a [`ResponseSink`], the
//! write side of an HTTP response: headers, status, body. The batch
//! pipeline hands a handler either the caller's real sink (single
//! operations) or an in-memory recorder (batched operations); the
//! handler cannot tell the difference.

use bytes::{Bytes, BytesMut};
use http::{HeaderMap, StatusCode};
use http_body_util::Full;

/// Write side of an HTTP response.
pub trait ResponseSink: Send {
    /// Mutable access to the response headers.
    fn headers_mut(&mut self) -> &mut HeaderMap;

    /// Set the status code. The last write wins.
    fn set_status(&mut self, status: StatusCode);

    /// Append a chunk to the response body.
    fn append_body(&mut self, chunk: &[u8]);
}

/// A buffered response sink for callers at the transport boundary.
///
/// Accumulates whatever is written to it and converts into an
/// `http::Response` once processing is done. The status defaults to
/// `200 OK` when nothing set one.
#[derive(Debug, Default)]
pub struct BufferedResponse {
    headers: HeaderMap,
    status: Option<StatusCode>,
    body: BytesMut,
}

impl BufferedResponse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> StatusCode {
        self.status.unwrap_or(StatusCode::OK)
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Convert into an `http::Response` with a fully buffered body.
    pub fn into_response(self) -> http::Response<Full<Bytes>> {
        let status = self.status.unwrap_or(StatusCode::OK);
        let mut response = http::Response::new(Full::new(self.body.freeze()));
        *response.status_mut() = status;
        *response.headers_mut() = self.headers;
        response
    }
}

impl ResponseSink for BufferedResponse {
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
