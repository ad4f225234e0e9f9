//! Per-operation request view.

use bytes::Bytes;
use http::{HeaderMap, Method, Uri};

/// One operation's view of the incoming HTTP request.
///
/// Method, URI, and headers are the shared request metadata; the body
/// is either the original payload (single operations) or one fragment
/// of the batch array. Cloning the metadata per operation is cheap —
/// the body is a `Bytes` view, shared with the original buffer.
#[derive(Debug, Clone)]
pub struct OperationRequest {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
}

impl OperationRequest {
    pub fn new(method: Method, uri: Uri, headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        Self {
            method,
            uri,
            headers,
            body: body.into(),
        }
    }

    /// Clone the request metadata with a different body.
    pub(crate) fn with_body(&self, body: Bytes) -> Self {
        Self {
            method: self.method.clone(),
            uri: self.uri.clone(),
            headers: self.headers.clone(),
            body,
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }
}

impl From<http::Request<Bytes>> for OperationRequest {
    fn from(request: http::Request<Bytes>) -> Self {
        let (parts, body) = request.into_parts();
        Self {
            method: parts.method,
            uri: parts.uri,
            headers: parts.headers,
            body,
        }
    }
}
