//! The per-document annotation index.
//!
//! Each node kind is kept in its own append-only arena and addressed by a
//! typed id. Nodes are never removed, so ids stay valid for the lifetime of
//! the index.

mod types;

use std::fmt;

use thiserror::Error;

pub use types::{
    AnnotationType, Dependency, DependencyFlavor, DependencyKind, Entity, Lemma, MetaDataField,
    MorphFeature, MorphologicalFeatures, NamedEntity, Pos, Provenance, Sentence, SrLink, Taxon,
    Token,
};

use crate::{CoverageIndex, Span};

macro_rules! annotation_id {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
            pub struct $name(usize);

            impl $name {
                /// Position of the node in its arena (creation order).
                pub fn index(self) -> usize {
                    self.0
                }
            }
        )*
    };
}

annotation_id!(
    SentenceId,
    TokenId,
    LemmaId,
    MorphologyId,
    PosId,
    DependencyId,
    NamedEntityId,
    TaxonId,
    EntityId,
    SrLinkId,
    MetaDataId,
);

/// Which set-once link of a [`Token`] an operation targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkKind {
    Lemma,
    Pos,
    Morphology,
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LinkKind::Lemma => "lemma",
            LinkKind::Pos => "pos",
            LinkKind::Morphology => "morphology",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LinkError {
    /// The token already carries a link of this kind
    #[error("token {} already has a {link} link", .token.index())]
    AlreadySet { token: TokenId, link: LinkKind },

    /// The id does not belong to this index
    #[error("token {} does not exist", .0.index())]
    UnknownToken(TokenId),
}

/// Node counts per layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexCounts {
    pub sentences: usize,
    pub tokens: usize,
    pub lemmas: usize,
    pub morphologies: usize,
    pub pos: usize,
    pub dependencies: usize,
    pub named_entities: usize,
    pub taxa: usize,
    pub entities: usize,
    pub sr_links: usize,
    pub metadata: usize,
}

impl IndexCounts {
    /// Counts added since `earlier` was taken.
    ///
    /// The index is append-only, so every field of `self` is at least the
    /// matching field of `earlier`.
    pub fn since(&self, earlier: &IndexCounts) -> IndexCounts {
        IndexCounts {
            sentences: self.sentences - earlier.sentences,
            tokens: self.tokens - earlier.tokens,
            lemmas: self.lemmas - earlier.lemmas,
            morphologies: self.morphologies - earlier.morphologies,
            pos: self.pos - earlier.pos,
            dependencies: self.dependencies - earlier.dependencies,
            named_entities: self.named_entities - earlier.named_entities,
            taxa: self.taxa - earlier.taxa,
            entities: self.entities - earlier.entities,
            sr_links: self.sr_links - earlier.sr_links,
            metadata: self.metadata - earlier.metadata,
        }
    }

    pub fn total(&self) -> usize {
        self.sentences
            + self.tokens
            + self.lemmas
            + self.morphologies
            + self.pos
            + self.dependencies
            + self.named_entities
            + self.taxa
            + self.entities
            + self.sr_links
            + self.metadata
    }
}

/// All annotations of one document.
#[derive(Debug, Default, Clone)]
pub struct AnnotationIndex {
    sentences: Vec<Sentence>,
    tokens: Vec<Token>,
    lemmas: Vec<Lemma>,
    morphologies: Vec<MorphologicalFeatures>,
    pos: Vec<Pos>,
    dependencies: Vec<Dependency>,
    named_entities: Vec<NamedEntity>,
    taxa: Vec<Taxon>,
    entities: Vec<Entity>,
    sr_links: Vec<SrLink>,
    metadata: Vec<MetaDataField>,
}

impl AnnotationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Creation
    // ------------------------------------------------------------------

    pub fn add_sentence(&mut self, span: Span) -> SentenceId {
        self.sentences.push(Sentence { span });
        SentenceId(self.sentences.len() - 1)
    }

    pub fn add_token(&mut self, span: Span) -> TokenId {
        self.tokens.push(Token::new(span));
        TokenId(self.tokens.len() - 1)
    }

    pub fn add_lemma(&mut self, lemma: Lemma) -> LemmaId {
        self.lemmas.push(lemma);
        LemmaId(self.lemmas.len() - 1)
    }

    pub fn add_morphology(&mut self, morphology: MorphologicalFeatures) -> MorphologyId {
        self.morphologies.push(morphology);
        MorphologyId(self.morphologies.len() - 1)
    }

    pub fn add_pos(&mut self, pos: Pos) -> PosId {
        self.pos.push(pos);
        PosId(self.pos.len() - 1)
    }

    /// Add a dependency edge.
    ///
    /// Fails without adding anything if either endpoint is not a token of
    /// this index.
    pub fn add_dependency(&mut self, dependency: Dependency) -> Result<DependencyId, LinkError> {
        self.token(dependency.dependent)
            .ok_or(LinkError::UnknownToken(dependency.dependent))?;
        self.token(dependency.governor)
            .ok_or(LinkError::UnknownToken(dependency.governor))?;
        self.dependencies.push(dependency);
        Ok(DependencyId(self.dependencies.len() - 1))
    }

    pub fn add_named_entity(&mut self, entity: NamedEntity) -> NamedEntityId {
        self.named_entities.push(entity);
        NamedEntityId(self.named_entities.len() - 1)
    }

    pub fn add_taxon(&mut self, span: Span, value: impl Into<String>) -> TaxonId {
        self.taxa.push(Taxon {
            span,
            value: value.into(),
        });
        TaxonId(self.taxa.len() - 1)
    }

    pub fn add_entity(&mut self, span: Span) -> EntityId {
        self.entities.push(Entity { span });
        EntityId(self.entities.len() - 1)
    }

    pub fn add_sr_link(&mut self, link: SrLink) -> SrLinkId {
        self.sr_links.push(link);
        SrLinkId(self.sr_links.len() - 1)
    }

    pub fn add_metadata(&mut self, key: impl Into<String>, value: impl Into<String>) -> MetaDataId {
        self.metadata.push(MetaDataField {
            key: key.into(),
            value: value.into(),
        });
        MetaDataId(self.metadata.len() - 1)
    }

    // ------------------------------------------------------------------
    // Set-once token links
    // ------------------------------------------------------------------

    pub fn link_lemma(&mut self, token: TokenId, lemma: LemmaId) -> Result<(), LinkError> {
        let slot = &mut self.token_mut(token)?.lemma;
        set_once(slot, lemma, token, LinkKind::Lemma)
    }

    pub fn link_pos(&mut self, token: TokenId, pos: PosId) -> Result<(), LinkError> {
        let slot = &mut self.token_mut(token)?.pos;
        set_once(slot, pos, token, LinkKind::Pos)
    }

    pub fn link_morphology(
        &mut self,
        token: TokenId,
        morphology: MorphologyId,
    ) -> Result<(), LinkError> {
        let slot = &mut self.token_mut(token)?.morphology;
        set_once(slot, morphology, token, LinkKind::Morphology)
    }

    fn token_mut(&mut self, id: TokenId) -> Result<&mut Token, LinkError> {
        self.tokens
            .get_mut(id.0)
            .ok_or(LinkError::UnknownToken(id))
    }

    // ------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------

    pub fn sentence(&self, id: SentenceId) -> Option<&Sentence> {
        self.sentences.get(id.0)
    }

    pub fn token(&self, id: TokenId) -> Option<&Token> {
        self.tokens.get(id.0)
    }

    pub fn lemma(&self, id: LemmaId) -> Option<&Lemma> {
        self.lemmas.get(id.0)
    }

    pub fn morphology(&self, id: MorphologyId) -> Option<&MorphologicalFeatures> {
        self.morphologies.get(id.0)
    }

    pub fn pos_tag(&self, id: PosId) -> Option<&Pos> {
        self.pos.get(id.0)
    }

    pub fn dependency(&self, id: DependencyId) -> Option<&Dependency> {
        self.dependencies.get(id.0)
    }

    pub fn named_entity(&self, id: NamedEntityId) -> Option<&NamedEntity> {
        self.named_entities.get(id.0)
    }

    pub fn taxon(&self, id: TaxonId) -> Option<&Taxon> {
        self.taxa.get(id.0)
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id.0)
    }

    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn lemmas(&self) -> &[Lemma] {
        &self.lemmas
    }

    pub fn morphologies(&self) -> &[MorphologicalFeatures] {
        &self.morphologies
    }

    pub fn pos(&self) -> &[Pos] {
        &self.pos
    }

    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    pub fn named_entities(&self) -> &[NamedEntity] {
        &self.named_entities
    }

    pub fn taxa(&self) -> &[Taxon] {
        &self.taxa
    }

    /// Taxon values may be rewritten in place; spans may not.
    pub fn taxa_values_mut(&mut self) -> impl Iterator<Item = &mut String> {
        self.taxa.iter_mut().map(|taxon| &mut taxon.value)
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn sr_links(&self) -> &[SrLink] {
        &self.sr_links
    }

    pub fn metadata(&self) -> &[MetaDataField] {
        &self.metadata
    }

    /// Tokens positioned inside the given sentence.
    pub fn tokens_in(&self, sentence: SentenceId) -> impl Iterator<Item = &Token> + '_ {
        let span = self.sentence(sentence).map(|s| s.span);
        span.into_iter()
            .flat_map(move |span| CoverageIndex::new(&self.tokens).covered_by(span))
    }

    pub fn counts(&self) -> IndexCounts {
        IndexCounts {
            sentences: self.sentences.len(),
            tokens: self.tokens.len(),
            lemmas: self.lemmas.len(),
            morphologies: self.morphologies.len(),
            pos: self.pos.len(),
            dependencies: self.dependencies.len(),
            named_entities: self.named_entities.len(),
            taxa: self.taxa.len(),
            entities: self.entities.len(),
            sr_links: self.sr_links.len(),
            metadata: self.metadata.len(),
        }
    }

    /// Total number of nodes across all layers.
    pub fn len(&self) -> usize {
        self.counts().total()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn set_once<I: Copy>(
    slot: &mut Option<I>,
    value: I,
    token: TokenId,
    link: LinkKind,
) -> Result<(), LinkError> {
    if slot.is_some() {
        return Err(LinkError::AlreadySet { token, link });
    }
    *slot = Some(value);
    Ok(())
}
