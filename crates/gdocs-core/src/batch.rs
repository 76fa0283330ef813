//! Ordered accumulation of requests against one document snapshot.
//!
//! The service applies a batch in order, so a request may reference text
//! inserted earlier in the same batch. Positions are computed from the
//! snapshot plus the length of text this builder has already inserted; the
//! document is never re-fetched mid-batch.

use crate::content::text_len;
use crate::operation::{Location, Range, Request};

#[derive(Debug, Clone, Default)]
pub struct BatchBuilder {
    requests: Vec<Request>,
    inserted: i64,
}

impl BatchBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, request: Request) -> &mut Self {
        self.requests.push(request);
        self
    }

    /// Queue an insert and return the range the text will occupy once the
    /// insert has been applied.
    pub fn insert_text(&mut self, index: i64, text: &str, tab_id: &str) -> Range {
        let len = text_len(text);
        self.requests
            .push(Request::insert_text(text, Location::new(index, tab_id)));
        self.inserted += len;
        Range::new(index, index + len, tab_id)
    }

    /// Total length of text inserted so far in this batch.
    pub fn inserted_len(&self) -> i64 {
        self.inserted
    }

    pub fn build(self) -> Vec<Request> {
        self.requests
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_returns_covering_range() {
        let mut batch = BatchBuilder::new();
        let range = batch.insert_text(10, "A\nB\n", "t.1");
        assert_eq!(range, Range::new(10, 14, "t.1"));
        assert_eq!(batch.inserted_len(), 4);
        assert_eq!(batch.build().len(), 1);
    }

    #[test]
    fn test_inserted_len_counts_utf16_across_inserts() {
        let mut batch = BatchBuilder::new();
        batch.insert_text(1, "abc", "");
        let second = batch.insert_text(20, "\u{1F600}", "");
        assert_eq!(second, Range::new(20, 22, ""));
        assert_eq!(batch.inserted_len(), 5);

        let requests = batch.build();
        assert_eq!(requests.len(), 2);
        assert_eq!(
            requests[1],
            Request::insert_text("\u{1F600}", Location::new(20, ""))
        );
    }
}
