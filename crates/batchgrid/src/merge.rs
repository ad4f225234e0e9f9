//! Header merging for batched responses.

use http::header::{self, HeaderMap, HeaderName};

/// Per-part framing and caching headers, removed from every recorder
/// before the merge. These describe one body and are wrong once N
/// bodies are spliced into a single array — the outer response gets its
/// own `Content-Type` from the assembler.
const STRIPPED_HEADERS: [HeaderName; 9] = [
    header::CONTENT_TYPE,
    header::CONTENT_LENGTH,
    header::TRANSFER_ENCODING,
    HeaderName::from_static("encoding"),
    header::ETAG,
    header::CACHE_CONTROL,
    header::EXPIRES,
    header::LAST_MODIFIED,
    header::VARY,
];

/// Merge one recorder's headers into the outgoing set.
///
/// Strip-listed names are skipped. A (name, value) pair is skipped when
/// that exact value is already present under the name — the value
/// comparison is byte-exact, the name comparison case-insensitive.
/// Distinct values under the same name all survive, so e.g. differing
/// `Set-Cookie` headers from different operations are all kept.
///
/// Callers invoke this once per recorder, in input order, which makes
/// the merged set deterministic.
pub fn merge_headers(target: &mut HeaderMap, recorded: &HeaderMap) {
    for (name, value) in recorded {
        if STRIPPED_HEADERS.contains(name) {
            continue;
        }
        if target.get_all(name).iter().any(|existing| existing == value) {
            continue;
        }
        target.append(name.clone(), value.clone());
    }
}
