use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{CharSpan, PredicateArgumentTuple};
use crate::errors::MergeResult;

/// Response of the multi-layer tagger.
#[derive(Debug, Clone, Deserialize)]
pub struct MultiTagResponse {
    pub multitag: MultiTagPayload,
}

impl MultiTagResponse {
    /// Convert an already-parsed response. A missing layer is an error.
    pub fn from_value(value: Value) -> MergeResult<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

/// One document's worth of tagger layers, each in tagger order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MultiTagPayload {
    #[serde(alias = "sents")]
    pub sentences: Vec<SentenceRecord>,
    pub tokens: Vec<TokenRecord>,
    pub pos: Vec<PosRecord>,
    pub deps: Vec<DependencyRecord>,
    pub ents: Vec<EntityRecord>,
    pub morphs: Vec<MorphRecord>,
    pub lemmas: Vec<LemmaRecord>,
    pub psrs: Vec<PredicateArgumentTuple>,
}

/// `idx` + `length` position shared by all token-level records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPosition {
    pub idx: usize,
    pub length: usize,
    #[serde(default)]
    pub is_space: bool,
}

impl TokenPosition {
    pub fn new(idx: usize, length: usize) -> Self {
        Self {
            idx,
            length,
            is_space: false,
        }
    }

    pub fn space(idx: usize, length: usize) -> Self {
        Self {
            idx,
            length,
            is_space: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceRecord {
    #[serde(alias = "start_char")]
    pub begin: usize,
    #[serde(alias = "end_char")]
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    #[serde(flatten)]
    pub position: TokenPosition,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PosRecord {
    #[serde(flatten)]
    pub position: TokenPosition,
    pub tag: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LemmaRecord {
    #[serde(flatten)]
    pub position: TokenPosition,
    pub lemma_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MorphRecord {
    #[serde(flatten)]
    pub position: TokenPosition,
    #[serde(default)]
    pub morph: MorphList,
}

/// A dependency record; the governor is the `head` token's own position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyRecord {
    #[serde(flatten)]
    pub position: TokenPosition,
    pub dep: String,
    pub head: TokenPosition,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRecord {
    #[serde(flatten)]
    pub span: CharSpan,
    pub label: String,
}

/// `Key=Value` feature strings of one token.
///
/// Accepts a list (`["Case=Nom", "Number=Sing"]`) or a single pipe-delimited
/// string (`"Case=Nom|Number=Sing"`). List entries are split on `|` as well;
/// empty entries are removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "RawMorph")]
pub struct MorphList(pub Vec<String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawMorph {
    Joined(String),
    List(Vec<String>),
    Missing(()),
}

impl From<RawMorph> for MorphList {
    fn from(raw: RawMorph) -> Self {
        let entries = match raw {
            RawMorph::Joined(joined) => vec![joined],
            RawMorph::List(list) => list,
            RawMorph::Missing(()) => Vec::new(),
        };
        MorphList(
            entries
                .iter()
                .flat_map(|entry| entry.split('|'))
                .map(str::trim)
                .filter(|feature| !feature.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }
}

impl MorphList {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}
