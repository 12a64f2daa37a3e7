//! Node types stored in an [`AnnotationIndex`](crate::AnnotationIndex).
//!
//! Every node is created once per merge pass and never deleted. Edges refer
//! to their endpoints through typed ids, so an edge can only be built from
//! nodes that already exist.

use std::fmt;

use crate::{EntityId, LemmaId, MorphologyId, PosId, Span, SpanLink, Spanned, TokenId};

/// The concrete annotation type a tag resolves to (e.g. `POS_NOUN`, `Taxon`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct AnnotationType(String);

impl AnnotationType {
    /// Generic type for named entities that carry no finer type.
    pub const NAMED_ENTITY: &'static str = "NamedEntity";

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn named_entity() -> Self {
        Self::new(Self::NAMED_ENTITY)
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AnnotationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A sentence boundary. Tokens are not owned; containment is positional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    pub span: Span,
}

/// A token with set-once links to its sub-annotations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub span: Span,
    pub(crate) lemma: Option<LemmaId>,
    pub(crate) pos: Option<PosId>,
    pub(crate) morphology: Option<MorphologyId>,
}

impl Token {
    pub fn new(span: Span) -> Self {
        Self {
            span,
            lemma: None,
            pos: None,
            morphology: None,
        }
    }

    pub fn lemma(&self) -> Option<LemmaId> {
        self.lemma
    }

    pub fn pos(&self) -> Option<PosId> {
        self.pos
    }

    pub fn morphology(&self) -> Option<MorphologyId> {
        self.morphology
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lemma {
    pub span: Span,
    pub value: String,
}

/// Part-of-speech annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pos {
    pub span: Span,
    /// Type the fine tag resolved to
    pub annotation_type: AnnotationType,
    /// Fine-grained tag as reported by the tagger
    pub pos_value: String,
    /// Coarse class derived from `annotation_type`
    pub coarse_value: Option<String>,
}

/// Morphological feature slots recognized by [`MorphologicalFeatures`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MorphFeature {
    Gender,
    Number,
    Case,
    Degree,
    VerbForm,
    Tense,
    Mood,
    Voice,
    Definiteness,
    Person,
    Aspect,
    Animacy,
    Negative,
    NumType,
    Possessive,
    PronType,
    Reflex,
    Transitivity,
}

impl MorphFeature {
    /// Map a Universal Dependencies feature key to its slot.
    ///
    /// Returns `None` for keys without a slot.
    pub fn from_key(key: &str) -> Option<Self> {
        let feature = match key {
            "Gender" => MorphFeature::Gender,
            "Number" => MorphFeature::Number,
            "Case" => MorphFeature::Case,
            "Degree" => MorphFeature::Degree,
            "VerbForm" => MorphFeature::VerbForm,
            "Tense" => MorphFeature::Tense,
            "Mood" => MorphFeature::Mood,
            "Voice" => MorphFeature::Voice,
            "Definite" => MorphFeature::Definiteness,
            "Person" => MorphFeature::Person,
            "Aspect" => MorphFeature::Aspect,
            "Animacy" => MorphFeature::Animacy,
            "Negative" => MorphFeature::Negative,
            "NumType" => MorphFeature::NumType,
            "Possessive" => MorphFeature::Possessive,
            "PronType" => MorphFeature::PronType,
            "Reflex" => MorphFeature::Reflex,
            "Transitivity" => MorphFeature::Transitivity,
            _ => return None,
        };
        Some(feature)
    }
}

/// A morphological feature bundle for one token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MorphologicalFeatures {
    pub span: Span,
    /// All parsed features joined as `Key=Value|Key=Value`
    pub value: String,
    pub gender: Option<String>,
    pub number: Option<String>,
    pub case: Option<String>,
    pub degree: Option<String>,
    pub verb_form: Option<String>,
    pub tense: Option<String>,
    pub mood: Option<String>,
    pub voice: Option<String>,
    pub definiteness: Option<String>,
    pub person: Option<String>,
    pub aspect: Option<String>,
    pub animacy: Option<String>,
    pub negative: Option<String>,
    pub num_type: Option<String>,
    pub possessive: Option<String>,
    pub pron_type: Option<String>,
    pub reflex: Option<String>,
    pub transitivity: Option<String>,
}

impl MorphologicalFeatures {
    pub fn new(span: Span, value: impl Into<String>) -> Self {
        Self {
            span,
            value: value.into(),
            ..Default::default()
        }
    }

    /// Write `value` into the slot for `feature`.
    pub fn set(&mut self, feature: MorphFeature, value: impl Into<String>) {
        *self.slot_mut(feature) = Some(value.into());
    }

    /// Read the slot for `feature`.
    pub fn get(&self, feature: MorphFeature) -> Option<&str> {
        let slot = match feature {
            MorphFeature::Gender => &self.gender,
            MorphFeature::Number => &self.number,
            MorphFeature::Case => &self.case,
            MorphFeature::Degree => &self.degree,
            MorphFeature::VerbForm => &self.verb_form,
            MorphFeature::Tense => &self.tense,
            MorphFeature::Mood => &self.mood,
            MorphFeature::Voice => &self.voice,
            MorphFeature::Definiteness => &self.definiteness,
            MorphFeature::Person => &self.person,
            MorphFeature::Aspect => &self.aspect,
            MorphFeature::Animacy => &self.animacy,
            MorphFeature::Negative => &self.negative,
            MorphFeature::NumType => &self.num_type,
            MorphFeature::Possessive => &self.possessive,
            MorphFeature::PronType => &self.pron_type,
            MorphFeature::Reflex => &self.reflex,
            MorphFeature::Transitivity => &self.transitivity,
        };
        slot.as_deref()
    }

    fn slot_mut(&mut self, feature: MorphFeature) -> &mut Option<String> {
        match feature {
            MorphFeature::Gender => &mut self.gender,
            MorphFeature::Number => &mut self.number,
            MorphFeature::Case => &mut self.case,
            MorphFeature::Degree => &mut self.degree,
            MorphFeature::VerbForm => &mut self.verb_form,
            MorphFeature::Tense => &mut self.tense,
            MorphFeature::Mood => &mut self.mood,
            MorphFeature::Voice => &mut self.voice,
            MorphFeature::Definiteness => &mut self.definiteness,
            MorphFeature::Person => &mut self.person,
            MorphFeature::Aspect => &mut self.aspect,
            MorphFeature::Animacy => &mut self.animacy,
            MorphFeature::Negative => &mut self.negative,
            MorphFeature::NumType => &mut self.num_type,
            MorphFeature::Possessive => &mut self.possessive,
            MorphFeature::PronType => &mut self.pron_type,
            MorphFeature::Reflex => &mut self.reflex,
            MorphFeature::Transitivity => &mut self.transitivity,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyKind {
    /// The sentence root; its label is always [`Dependency::ROOT_LABEL`]
    Root,
    Regular,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyFlavor {
    Basic,
}

/// A dependency edge between two tokens. The span is the dependent's span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    pub span: Span,
    pub dependent: TokenId,
    pub governor: TokenId,
    pub dependency_type: String,
    pub kind: DependencyKind,
    pub flavor: DependencyFlavor,
}

impl Dependency {
    /// Placeholder label carried by root edges.
    pub const ROOT_LABEL: &'static str = "--";

    pub fn is_root(&self) -> bool {
        self.kind == DependencyKind::Root
    }
}

/// Where an entity annotation came from and how arbitration treated it.
#[derive(Debug, Clone, PartialEq)]
pub struct Provenance {
    /// Name of the producing source (e.g. `Flair`)
    pub source: String,
    /// Set when an incumbent span claimed overlapping text
    pub superseded: bool,
    pub score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NamedEntity {
    pub span: Span,
    pub annotation_type: AnnotationType,
    pub value: String,
    pub provenance: Option<Provenance>,
}

impl NamedEntity {
    pub fn is_superseded(&self) -> bool {
        self.provenance.as_ref().map_or(false, |p| p.superseded)
    }
}

/// A protected span from an earlier pass (e.g. a gazetteer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Taxon {
    pub span: Span,
    pub value: String,
}

/// Predicate or argument of a predicate-argument tuple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub span: Span,
}

/// Labeled relation from a predicate entity (anchor) to an argument entity (target).
pub type SrLink = SpanLink<String, EntityId>;

/// A key-value record attached to the document out of band.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaDataField {
    pub key: String,
    pub value: String,
}

macro_rules! impl_spanned {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Spanned for $ty {
                fn span(&self) -> Span {
                    self.span
                }
            }
        )*
    };
}

impl_spanned!(
    Sentence,
    Token,
    Lemma,
    Pos,
    MorphologicalFeatures,
    Dependency,
    NamedEntity,
    Taxon,
    Entity,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn morph_keys_map_to_slots() {
        assert_eq!(MorphFeature::from_key("Case"), Some(MorphFeature::Case));
        assert_eq!(
            MorphFeature::from_key("Definite"),
            Some(MorphFeature::Definiteness)
        );
        assert_eq!(MorphFeature::from_key("Foreign"), None);
        assert_eq!(MorphFeature::from_key("case"), None);
    }

    #[test]
    fn morph_slots_round_trip() {
        let mut morph = MorphologicalFeatures::new(Span::new(0, 3), "Case=Nom");
        morph.set(MorphFeature::Case, "Nom");
        morph.set(MorphFeature::PronType, "Art");

        assert_eq!(morph.get(MorphFeature::Case), Some("Nom"));
        assert_eq!(morph.pron_type.as_deref(), Some("Art"));
        assert_eq!(morph.get(MorphFeature::Gender), None);
    }

    #[test]
    fn superseded_requires_provenance() {
        let mut entity = NamedEntity {
            span: Span::new(0, 4),
            annotation_type: AnnotationType::named_entity(),
            value: "PER".to_string(),
            provenance: None,
        };
        assert!(!entity.is_superseded());

        entity.provenance = Some(Provenance {
            source: "Flair".to_string(),
            superseded: true,
            score: Some(0.5),
        });
        assert!(entity.is_superseded());
    }
}
