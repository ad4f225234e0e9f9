//! Batched response reassembly.

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::BatchError;

/// Splice recorded operation bodies into one JSON array, in input order.
///
/// Each body is trusted as an already-valid JSON fragment and spliced
/// byte-for-byte — no re-validation, no re-encoding. A handler that
/// wrote invalid JSON makes the outer array invalid; that is the
/// handler's responsibility, not this crate's. The one thing that does
/// fail here is an empty recorded body, which has no JSON meaning and
/// cannot be spliced.
pub fn assemble_array(bodies: &[Bytes]) -> Result<Bytes, BatchError> {
    let total: usize = bodies.iter().map(|b| b.len()).sum();
    let mut out = BytesMut::with_capacity(total + bodies.len() + 2);

    out.put_u8(b'[');
    for (index, body) in bodies.iter().enumerate() {
        if body.is_empty() {
            return Err(BatchError::Assembly { index });
        }
        if index > 0 {
            out.put_u8(b',');
        }
        out.extend_from_slice(body);
    }
    out.put_u8(b']');

    Ok(out.freeze())
}
