//! Exact-match lookup from a character span to the node created for it.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use thiserror::Error;

use crate::Span;

/// Maps `[begin, end)` to a node id.
///
/// Lookups match both boundaries exactly. Cross-layer records reuse the
/// boundaries the tagger reported for the token, so nearest or overlapping
/// matches are never wanted.
///
/// When two nodes are registered at the same span the first registration
/// wins; later ones are still part of the annotation index but are not
/// reachable through the span index.
#[derive(Debug, Clone)]
pub struct SpanIndex<T> {
    nodes: HashMap<Span, T>,
}

impl<T> Default for SpanIndex<T> {
    fn default() -> Self {
        Self {
            nodes: HashMap::new(),
        }
    }
}

impl<T: Copy> SpanIndex<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `node` at `span`.
    ///
    /// Returns `false` if the span was already taken, in which case the
    /// existing registration is kept.
    pub fn put(&mut self, span: Span, node: T) -> bool {
        match self.nodes.entry(span) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(node);
                true
            }
        }
    }

    /// Look up the node registered at exactly `[begin, end)`.
    pub fn get(&self, begin: usize, end: usize) -> Result<T, SpanNotFound> {
        self.get_span(Span::new(begin, end))
    }

    /// Look up the node registered at exactly `span`.
    pub fn get_span(&self, span: Span) -> Result<T, SpanNotFound> {
        self.nodes.get(&span).copied().ok_or(SpanNotFound {
            begin: span.begin,
            end: span.end,
        })
    }

    /// Number of registered spans.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// No node is registered at the requested span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no node registered at [{begin}..{end})")]
pub struct SpanNotFound {
    pub begin: usize,
    pub end: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_index() {
        let index: SpanIndex<usize> = SpanIndex::new();
        assert!(index.is_empty());
        assert_eq!(
            index.get(0, 3),
            Err(SpanNotFound { begin: 0, end: 3 })
        );
    }

    #[test]
    fn test_exact_match_only() {
        let mut index = SpanIndex::new();
        assert!(index.put(Span::new(4, 7), 1usize));

        assert_eq!(index.get(4, 7), Ok(1));
        // Same begin, different end
        assert!(index.get(4, 8).is_err());
        // Nested span
        assert!(index.get(5, 7).is_err());
        // Enclosing span
        assert!(index.get(3, 8).is_err());
    }

    #[test]
    fn test_first_registration_wins() {
        let mut index = SpanIndex::new();
        assert!(index.put(Span::new(0, 3), 'a'));
        assert!(!index.put(Span::new(0, 3), 'b'));

        assert_eq!(index.get(0, 3), Ok('a'));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_same_begin_different_ends() {
        let mut index = SpanIndex::new();
        index.put(Span::new(0, 3), 10u32);
        index.put(Span::new(0, 5), 20u32);

        assert_eq!(index.get(0, 3), Ok(10));
        assert_eq!(index.get(0, 5), Ok(20));
        assert_eq!(index.len(), 2);
    }
}
