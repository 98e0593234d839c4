//! Chunking of sequences into bounded-size groups

/// Upper bound on ids per identity lookup request, imposed by the platform.
pub const IDENTITY_LOOKUP_BATCH_LIMIT: usize = 15;

/// Iterator adapter yielding owned groups of at most `size` items.
///
/// Groups preserve input order. Only the last group may be shorter than
/// `size`; an empty input yields no groups.
#[derive(Debug, Clone)]
pub struct Batched<I> {
    inner: I,
    size: usize,
}

impl<I: Iterator> Iterator for Batched<I> {
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let group: Vec<I::Item> = self.inner.by_ref().take(self.size).collect();
        if group.is_empty() {
            None
        } else {
            Some(group)
        }
    }
}

/// Split `items` into groups of at most `size` items (a size of 0 is treated as 1).
pub fn batched<I: IntoIterator>(items: I, size: usize) -> Batched<I::IntoIter> {
    Batched {
        inner: items.into_iter(),
        size: size.max(1),
    }
}
