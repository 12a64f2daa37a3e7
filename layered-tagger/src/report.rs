//! Record-level outcomes of a merge.

use std::fmt;

use layered_annotations::IndexCounts;

/// Layer a warning was raised for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerName {
    Sentence,
    Token,
    Lemma,
    Morphology,
    Pos,
    Dependency,
    NamedEntity,
    PredicateArgument,
}

impl fmt::Display for LayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LayerName::Sentence => "sentence",
            LayerName::Token => "token",
            LayerName::Lemma => "lemma",
            LayerName::Morphology => "morphology",
            LayerName::Pos => "pos",
            LayerName::Dependency => "dependency",
            LayerName::NamedEntity => "named-entity",
            LayerName::PredicateArgument => "predicate-argument",
        })
    }
}

/// A record that was dropped or degraded during a merge.
#[derive(Debug, Clone, PartialEq)]
pub enum MergeWarning {
    /// Record boundaries violate `0 <= begin < end <= len(text)`.
    InvalidSpan {
        layer: LayerName,
        begin: usize,
        end: usize,
        reason: String,
    },
    /// No token at the exact span the record refers to.
    UnresolvedToken {
        layer: LayerName,
        begin: usize,
        end: usize,
    },
    /// Dependency head not found; the edge was dropped.
    UnresolvedGovernor { begin: usize, end: usize },
    /// Tag not in the mapping table. `fallback` is set when the base type was used.
    UnmappedTag {
        layer: LayerName,
        tag: String,
        fallback: Option<String>,
    },
    /// Token already linked; the new node was added but not linked.
    LinkAlreadySet {
        layer: LayerName,
        begin: usize,
        end: usize,
    },
    /// Challenger rejected because it touches a protected span.
    Superseded {
        begin: usize,
        end: usize,
        incumbent: (usize, usize),
        dropped: String,
    },
    /// Sentence text in a batched response differs from the document text.
    SentenceTextMismatch {
        response: usize,
        sentence: usize,
        expected: String,
        found: String,
    },
}

impl fmt::Display for MergeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeWarning::InvalidSpan {
                layer,
                begin,
                end,
                reason,
            } => write!(f, "{layer}: dropped record at [{begin}..{end}): {reason}"),
            MergeWarning::UnresolvedToken { layer, begin, end } => {
                write!(f, "{layer}: no token at [{begin}..{end})")
            }
            MergeWarning::UnresolvedGovernor { begin, end } => {
                write!(f, "dependency: no governor token at [{begin}..{end})")
            }
            MergeWarning::UnmappedTag {
                layer,
                tag,
                fallback: Some(fallback),
            } => write!(f, "{layer}: tag {tag:?} unmapped, using {fallback}"),
            MergeWarning::UnmappedTag {
                layer,
                tag,
                fallback: None,
            } => write!(f, "{layer}: tag {tag:?} unmapped, record skipped"),
            MergeWarning::LinkAlreadySet { layer, begin, end } => {
                write!(f, "{layer}: token at [{begin}..{end}) already linked")
            }
            MergeWarning::Superseded {
                begin,
                end,
                incumbent: (ib, ie),
                dropped,
            } => write!(
                f,
                "{dropped} at [{begin}..{end}) dropped, overlaps protected span [{ib}..{ie})"
            ),
            MergeWarning::SentenceTextMismatch {
                response,
                sentence,
                expected,
                found,
            } => write!(
                f,
                "response {response} sentence {sentence}: expected {expected:?}, tagger saw {found:?}"
            ),
        }
    }
}

/// What a merge added and which records it could not apply.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeReport {
    /// Nodes added by this merge, per layer
    pub created: IndexCounts,
    pub warnings: Vec<MergeWarning>,
}

impl MergeReport {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn add_warning(&mut self, warning: MergeWarning) {
        self.warnings.push(warning);
    }

    /// Warnings raised for one layer.
    pub fn warnings_for(&self, layer: LayerName) -> impl Iterator<Item = &MergeWarning> + '_ {
        self.warnings.iter().filter(move |w| w.layer() == Some(layer))
    }
}

impl MergeWarning {
    pub fn layer(&self) -> Option<LayerName> {
        match self {
            MergeWarning::InvalidSpan { layer, .. }
            | MergeWarning::UnresolvedToken { layer, .. }
            | MergeWarning::UnmappedTag { layer, .. }
            | MergeWarning::LinkAlreadySet { layer, .. } => Some(*layer),
            MergeWarning::UnresolvedGovernor { .. } => Some(LayerName::Dependency),
            MergeWarning::Superseded { .. } => Some(LayerName::NamedEntity),
            MergeWarning::SentenceTextMismatch { .. } => None,
        }
    }
}
