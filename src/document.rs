//! A document's text together with its annotation index.

use crate::{AnnotationIndex, Span, SpanError};

/// One document being annotated.
///
/// The annotation index is owned by, and lives as long as, the document.
/// Documents share no mutable state, so independent callers may process
/// different documents concurrently.
pub struct AnnotatedDocument {
    text: String,
    language: Option<String>,
    /// Byte offset of every char offset, plus `text.len()` for the end of text
    byte_offsets: Vec<usize>,
    index: AnnotationIndex,
}

impl std::fmt::Debug for AnnotatedDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnnotatedDocument")
            .field("char_len", &self.char_len())
            .field("language", &self.language)
            .field("annotations", &self.index.len())
            .finish()
    }
}

impl AnnotatedDocument {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let mut byte_offsets: Vec<usize> = text.char_indices().map(|(byte, _)| byte).collect();
        byte_offsets.push(text.len());
        Self {
            text,
            language: None,
            byte_offsets,
            index: AnnotationIndex::new(),
        }
    }

    /// Set the document language (ISO 639-1, e.g. `de`).
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Length of the text in characters.
    pub fn char_len(&self) -> usize {
        self.byte_offsets.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.char_len() == 0
    }

    pub fn index(&self) -> &AnnotationIndex {
        &self.index
    }

    pub fn index_mut(&mut self) -> &mut AnnotationIndex {
        &mut self.index
    }

    /// Validate `[begin, end)` against this document's text.
    pub fn span(&self, begin: usize, end: usize) -> Result<Span, SpanError> {
        Span::checked(begin, end, self.char_len())
    }

    /// The text covered by `span`, or `None` if the span is out of bounds.
    pub fn covered_text(&self, span: Span) -> Option<&str> {
        if span.begin > span.end {
            return None;
        }
        let start = *self.byte_offsets.get(span.begin)?;
        let end = *self.byte_offsets.get(span.end)?;
        self.text.get(start..end)
    }
}
