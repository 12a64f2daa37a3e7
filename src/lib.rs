#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Document annotation model for merging external tagger output.
//!
//! An [`AnnotatedDocument`] owns its text and an [`AnnotationIndex`]: typed,
//! append-only arenas of sentences, tokens, lemmas, morphology, POS tags,
//! dependencies, named entities, taxa, entities and predicate-argument links.
//! Every node is anchored to a character [`Span`] of the text.
//!
//! ## Modules
//!
//! - [`span`] - Half-open character spans and validation
//! - [`span_index`] - Exact-span lookup used to resolve tagger references
//! - [`coverage`] - Containment and overlap queries over a layer
//! - [`display`] - Text rendering of annotations for tests and debugging

mod annotation;
mod association;
pub mod coverage;
pub mod display;
mod document;
pub mod span;
pub mod span_index;
mod span_link;

pub use annotation::{
    AnnotationIndex, AnnotationType, Dependency, DependencyFlavor, DependencyId, DependencyKind,
    Entity, EntityId, IndexCounts, Lemma, LemmaId, LinkError, LinkKind, MetaDataField, MetaDataId,
    MorphFeature, MorphologicalFeatures, MorphologyId, NamedEntity, NamedEntityId, Pos, PosId,
    Provenance, Sentence, SentenceId, SrLink, SrLinkId, Taxon, TaxonId, Token, TokenId,
};
pub use association::{AssociatedSpan, Association, Governor, SemanticArgument};
pub use coverage::CoverageIndex;
pub use display::{IndexDisplay, Layer};
pub use document::AnnotatedDocument;
pub use span::{Span, SpanError, Spanned};
pub use span_index::{SpanIndex, SpanNotFound};
pub use span_link::SpanLink;
