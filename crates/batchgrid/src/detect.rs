//! Single-versus-batch classification.

/// How an incoming request body should be processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// One logical operation, handed to the handler untouched.
    Single,
    /// A JSON array of operations, fanned out concurrently.
    Batch,
}

const ARRAY_OPEN: u8 = b'[';

/// Classify a raw request body by its first byte.
///
/// A zero-length body classifies as [`RequestKind::Single`] and flows
/// through the passthrough path; whether it is acceptable is the
/// downstream handler's call.
pub fn classify(body: &[u8]) -> RequestKind {
    match body.first() {
        Some(&ARRAY_OPEN) => RequestKind::Batch,
        _ => RequestKind::Single,
    }
}
