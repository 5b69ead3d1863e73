//! Helpers for slicing one document into many feeds.

/// Split `payload` into approximately equal-sized chunks without
/// breaking UTF-8 code points.
///
/// # Panics
///
/// Panics if `parts` is zero.
#[must_use]
pub fn produce_chunks(payload: &str, parts: usize) -> Vec<&str> {
    assert!(parts > 0);
    let len = payload.len();
    let chunk_size = len.div_ceil(parts);
    let mut chunks = Vec::new();
    let mut start = 0;
    while start < len {
        let mut end = core::cmp::min(start + chunk_size, len);
        while end < len && !payload.is_char_boundary(end) {
            end += 1;
        }
        chunks.push(&payload[start..end]);
        start = end;
    }
    chunks
}

/// Split `payload` into chunks whose character lengths are taken, in order,
/// from `splits` (each reduced modulo the remaining length, plus one). Any
/// text left once `splits` runs out forms the last chunk.
///
/// Every chunk is non-empty and the chunks concatenate to `payload`.
#[must_use]
pub fn produce_splits<'a>(payload: &'a str, splits: &[usize]) -> Vec<&'a str> {
    let mut chunks = Vec::new();
    let mut rest = payload;
    for &split in splits {
        let remaining = rest.chars().count();
        if remaining == 0 {
            break;
        }
        let take = 1 + split % remaining;
        let end = rest
            .char_indices()
            .nth(take)
            .map_or(rest.len(), |(offset, _)| offset);
        chunks.push(&rest[..end]);
        rest = &rest[end..];
    }
    if !rest.is_empty() {
        chunks.push(rest);
    }
    chunks
}
