//! Overlap arbitration between protected spans and newly proposed entities.
//!
//! Arbitration is two-phase. [`tag_incumbents`] rewrites every protected
//! span's value and snapshots the spans; only then can challengers be
//! checked, through the [`OverlapArbiter`] it returns.

use layered_annotations::{AnnotationIndex, Span};
use serde::{Deserialize, Serialize};

/// Prefix written onto every protected span's value before arbitration.
pub const GAZETTEER_PROVENANCE: &str = "Taxon;Gazetteer;";

/// Appended to a challenger's source tag when it lost arbitration.
pub const SUPERSEDED_SUFFIX: &str = "-REMOVED";

/// What happens to a challenger that touches a protected span.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictPolicy {
    /// Create it anyway, marked as superseded.
    #[default]
    Flag,
    /// Do not create it; report a warning.
    Drop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    /// The first protected span the challenger touched.
    Superseded { incumbent: Span },
}

impl Verdict {
    pub fn is_superseded(&self) -> bool {
        matches!(self, Verdict::Superseded { .. })
    }

    /// `source`, suffixed with `-REMOVED` when superseded.
    pub fn source_tag(&self, source: &str) -> String {
        match self {
            Verdict::Accepted => source.to_string(),
            Verdict::Superseded { .. } => format!("{source}{SUPERSEDED_SUFFIX}"),
        }
    }
}

/// Checks challengers against a fixed snapshot of protected spans.
#[derive(Debug, Clone, Default)]
pub struct OverlapArbiter {
    incumbents: Vec<Span>,
}

impl OverlapArbiter {
    pub fn new(incumbents: Vec<Span>) -> Self {
        Self { incumbents }
    }

    pub fn incumbents(&self) -> &[Span] {
        &self.incumbents
    }

    /// A challenger conflicts when its begin or its end lies in the closed
    /// interval `[pb, pe]` of some protected span. The scan stops at the
    /// first conflict.
    pub fn arbitrate(&self, challenger: Span) -> Verdict {
        self.incumbents
            .iter()
            .find(|incumbent| {
                incumbent.touches(challenger.begin) || incumbent.touches(challenger.end)
            })
            .map_or(Verdict::Accepted, |&incumbent| Verdict::Superseded {
                incumbent,
            })
    }
}

/// Prefix every protected span's value with [`GAZETTEER_PROVENANCE`] and
/// return an arbiter over their spans.
pub fn tag_incumbents(index: &mut AnnotationIndex) -> OverlapArbiter {
    for value in index.taxa_values_mut() {
        value.insert_str(0, GAZETTEER_PROVENANCE);
    }
    OverlapArbiter::new(index.taxa().iter().map(|taxon| taxon.span).collect())
}
