//! Layer builders.
//!
//! Each builder applies one payload layer to the document, record by record
//! and in payload order. Builders never deduplicate: a record the tagger
//! repeats is applied twice. A record that cannot be applied is dropped with
//! a [`MergeWarning`] and the builder moves on to the next one.

mod dependency;
mod lemma;
mod morphology;
mod named_entity;
mod pos;
mod predicate_argument;
mod sentence;
mod token;

use layered_annotations::{
    AnnotatedDocument, AnnotationIndex, LinkError, Span, SpanIndex, TokenId,
};
use tracing::warn;

pub use dependency::{DependencyBuilder, ROOT_MARKER};
pub use lemma::LemmaBuilder;
pub use morphology::MorphologyBuilder;
pub use named_entity::{NamedEntityBuilder, ScoredEntityBuilder};
pub use pos::PosBuilder;
pub use predicate_argument::PredicateArgumentBuilder;
pub use sentence::SentenceBuilder;
pub use token::TokenBuilder;

use crate::payload::TokenPosition;
use crate::report::{LayerName, MergeWarning};
use crate::tag_mapper::{ResolvedTag, TagMapper};

/// Applies one slice of a tagger payload to a document.
pub trait LayerBuilder {
    type Record;

    fn layer(&self) -> LayerName;

    fn build(&self, ctx: &mut MergeContext<'_>, records: &[Self::Record]);
}

/// State shared by the builders of one merge call.
pub struct MergeContext<'a> {
    doc: &'a mut AnnotatedDocument,
    /// Tokens created by this merge, keyed by their exact span
    pub tokens: SpanIndex<TokenId>,
    warnings: Vec<MergeWarning>,
}

impl<'a> MergeContext<'a> {
    pub fn new(doc: &'a mut AnnotatedDocument) -> Self {
        Self {
            doc,
            tokens: SpanIndex::new(),
            warnings: Vec::new(),
        }
    }

    pub fn index(&self) -> &AnnotationIndex {
        self.doc.index()
    }

    pub fn index_mut(&mut self) -> &mut AnnotationIndex {
        self.doc.index_mut()
    }

    /// Text of the document covered by `span`.
    pub fn covered_text(&self, span: Span) -> Option<&str> {
        self.doc.covered_text(span)
    }

    pub fn warnings(&self) -> &[MergeWarning] {
        &self.warnings
    }

    pub fn into_warnings(self) -> Vec<MergeWarning> {
        self.warnings
    }

    /// Record and log a dropped or degraded record.
    pub fn warn(&mut self, warning: MergeWarning) {
        warn!(layer = ?warning.layer(), "{warning}");
        self.warnings.push(warning);
    }

    /// Validate `[begin, end)` against the document text.
    pub fn span(&mut self, layer: LayerName, begin: usize, end: usize) -> Option<Span> {
        match self.doc.span(begin, end) {
            Ok(span) => Some(span),
            Err(err) => {
                self.warn(MergeWarning::InvalidSpan {
                    layer,
                    begin,
                    end,
                    reason: err.to_string(),
                });
                None
            }
        }
    }

    /// Validate an `idx` + `length` position against the document text.
    pub fn token_span(&mut self, layer: LayerName, position: &TokenPosition) -> Option<Span> {
        match Span::from_len(position.idx, position.length, self.doc.char_len()) {
            Ok(span) => Some(span),
            Err(err) => {
                self.warn(MergeWarning::InvalidSpan {
                    layer,
                    begin: position.idx,
                    end: position.idx.saturating_add(position.length),
                    reason: err.to_string(),
                });
                None
            }
        }
    }

    /// The token this merge created at exactly `span`.
    pub fn token_at(&mut self, layer: LayerName, span: Span) -> Option<TokenId> {
        match self.tokens.get_span(span) {
            Ok(token) => Some(token),
            Err(_) => {
                self.warn(MergeWarning::UnresolvedToken {
                    layer,
                    begin: span.begin,
                    end: span.end,
                });
                None
            }
        }
    }

    /// Resolve a tag, applying the mapper's unmapped-tag policy.
    ///
    /// Every tag-driven builder goes through here so the policy is applied
    /// the same way everywhere.
    pub fn resolve_tag(
        &mut self,
        mapper: &TagMapper,
        layer: LayerName,
        tag: &str,
    ) -> Option<ResolvedTag> {
        match mapper.resolve(tag) {
            Ok(resolved) => Some(resolved),
            Err(_) => {
                let fallback = mapper.fallback();
                self.warn(MergeWarning::UnmappedTag {
                    layer,
                    tag: tag.to_string(),
                    fallback: fallback
                        .as_ref()
                        .map(|resolved| resolved.annotation_type.to_string()),
                });
                fallback
            }
        }
    }

    /// Report a failed token link. The attached node stays in the index.
    pub fn check_link(&mut self, layer: LayerName, span: Span, result: Result<(), LinkError>) {
        match result {
            Ok(()) => {}
            Err(LinkError::AlreadySet { .. }) => self.warn(MergeWarning::LinkAlreadySet {
                layer,
                begin: span.begin,
                end: span.end,
            }),
            Err(LinkError::UnknownToken(_)) => self.warn(MergeWarning::UnresolvedToken {
                layer,
                begin: span.begin,
                end: span.end,
            }),
        }
    }
}
