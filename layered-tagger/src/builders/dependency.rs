use layered_annotations::{Dependency, DependencyFlavor, DependencyKind};

use super::{LayerBuilder, MergeContext};
use crate::payload::DependencyRecord;
use crate::report::{LayerName, MergeWarning};

/// Relation label the tagger uses for the sentence root, compared case-insensitively.
pub const ROOT_MARKER: &str = "ROOT";

/// Creates dependency edges between tokens of this merge.
///
/// The dependent is the record's own token and the governor is the token
/// at the `head` position. Root records get the placeholder label
/// [`Dependency::ROOT_LABEL`]; other labels are trimmed and uppercased.
#[derive(Debug, Default)]
pub struct DependencyBuilder;

impl DependencyBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn is_root_label(label: &str) -> bool {
        label.trim().eq_ignore_ascii_case(ROOT_MARKER)
    }
}

impl LayerBuilder for DependencyBuilder {
    type Record = DependencyRecord;

    fn layer(&self) -> LayerName {
        LayerName::Dependency
    }

    fn build(&self, ctx: &mut MergeContext<'_>, records: &[DependencyRecord]) {
        for record in records.iter().filter(|r| !r.position.is_space) {
            let Some(span) = ctx.token_span(self.layer(), &record.position) else {
                continue;
            };
            let Some(head_span) = ctx.token_span(self.layer(), &record.head) else {
                continue;
            };
            let Some(dependent) = ctx.token_at(self.layer(), span) else {
                continue;
            };
            let Ok(governor) = ctx.tokens.get_span(head_span) else {
                ctx.warn(MergeWarning::UnresolvedGovernor {
                    begin: head_span.begin,
                    end: head_span.end,
                });
                continue;
            };

            let (kind, dependency_type) = if Self::is_root_label(&record.dep) {
                (DependencyKind::Root, Dependency::ROOT_LABEL.to_string())
            } else {
                (DependencyKind::Regular, record.dep.trim().to_uppercase())
            };

            let added = ctx.index_mut().add_dependency(Dependency {
                span,
                dependent,
                governor,
                dependency_type,
                kind,
                flavor: DependencyFlavor::Basic,
            });
            if added.is_err() {
                ctx.warn(MergeWarning::UnresolvedToken {
                    layer: self.layer(),
                    begin: span.begin,
                    end: span.end,
                });
            }
        }
    }
}
