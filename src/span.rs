//! Character spans over one document's text.
//!
//! Offsets count Unicode scalar values, which is the unit external taggers
//! report (`idx`, `start_char`). A [`Span`] is half-open: `[begin, end)`.

use std::fmt;

use thiserror::Error;

/// A half-open character interval `[begin, end)`.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct Span {
    /// Inclusive start offset
    pub begin: usize,
    /// Exclusive end offset
    pub end: usize,
}

impl Span {
    /// Create a span without validation.
    ///
    /// Use [`Span::checked`] for offsets coming from outside the crate.
    pub fn new(begin: usize, end: usize) -> Self {
        Self { begin, end }
    }

    /// Create a span, enforcing `begin < end <= text_len`.
    pub fn checked(begin: usize, end: usize, text_len: usize) -> Result<Self, SpanError> {
        if begin >= end {
            return Err(SpanError::Empty { begin, end });
        }
        if end > text_len {
            return Err(SpanError::OutOfBounds {
                begin,
                end,
                text_len,
            });
        }
        Ok(Self { begin, end })
    }

    /// Create a span from a start offset and a length, as token records encode it.
    pub fn from_len(begin: usize, length: usize, text_len: usize) -> Result<Self, SpanError> {
        let end = begin.checked_add(length).ok_or(SpanError::OutOfBounds {
            begin,
            end: usize::MAX,
            text_len,
        })?;
        Self::checked(begin, end, text_len)
    }

    /// Number of characters covered.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.begin)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if `other` lies entirely within this span.
    pub fn contains(&self, other: &Span) -> bool {
        self.begin <= other.begin && other.end <= self.end
    }

    /// Returns true if `offset` lies in the closed interval `[begin, end]`.
    pub fn touches(&self, offset: usize) -> bool {
        self.begin <= offset && offset <= self.end
    }

    /// Move the span right by `offset` characters, saturating at `usize::MAX`.
    pub fn shifted(&self, offset: usize) -> Span {
        Span::new(
            self.begin.saturating_add(offset),
            self.end.saturating_add(offset),
        )
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}..{})", self.begin, self.end)
    }
}

/// Anything that occupies a span of document text.
pub trait Spanned {
    fn span(&self) -> Span;
}

impl Spanned for Span {
    fn span(&self) -> Span {
        *self
    }
}

/// Reasons a pair of offsets does not form a valid span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SpanError {
    /// `begin >= end`
    #[error("empty span [{begin}..{end})")]
    Empty { begin: usize, end: usize },

    /// `end` past the end of the text
    #[error("span [{begin}..{end}) exceeds text length {text_len}")]
    OutOfBounds {
        begin: usize,
        end: usize,
        text_len: usize,
    },
}
