//! Positional queries over a layer of spanned nodes.

use crate::{Span, Spanned};

/// Answers "which nodes lie inside this span?" by span arithmetic.
///
/// Containment between layers (tokens in a sentence) is never stored as an
/// edge; it is derived here on demand.
#[derive(Debug)]
pub struct CoverageIndex<'a, T> {
    items: &'a [T],
}

impl<'a, T> Clone for CoverageIndex<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for CoverageIndex<'a, T> {}

impl<'a, T: Spanned> CoverageIndex<'a, T> {
    pub fn new(items: &'a [T]) -> Self {
        Self { items }
    }

    /// Nodes lying entirely within `span`.
    pub fn covered_by(self, span: Span) -> impl Iterator<Item = &'a T> + 'a {
        self.items
            .iter()
            .filter(move |item| span.contains(&item.span()))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
