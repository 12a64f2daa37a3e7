use layered_annotations::{AnnotationType, NamedEntity, Provenance, Span};

use super::{LayerBuilder, MergeContext};
use crate::arbiter::{ConflictPolicy, OverlapArbiter, Verdict};
use crate::payload::{EntityRecord, FlairSpan};
use crate::report::{LayerName, MergeWarning};
use crate::tag_mapper::TagMapper;

/// Source name of the multi-layer tagger's entities.
pub const MULTITAG_SOURCE: &str = "SpaCy";
/// Source name of the batched sentence tagger's entities.
pub const FLAIR_SOURCE: &str = "Flair";

/// Creates named entities from the multi-layer tagger.
///
/// Spans are taken verbatim and need not align with tokens. Without an
/// arbiter the value is the raw label. With one, the value carries the
/// source tag: `PER;SpaCy` or `PER;SpaCy-REMOVED`.
#[derive(Debug, Default)]
pub struct NamedEntityBuilder<'a> {
    arbitration: Option<(&'a OverlapArbiter, ConflictPolicy)>,
}

impl<'a> NamedEntityBuilder<'a> {
    pub fn new() -> Self {
        Self { arbitration: None }
    }

    pub fn with_arbiter(arbiter: &'a OverlapArbiter, policy: ConflictPolicy) -> Self {
        Self {
            arbitration: Some((arbiter, policy)),
        }
    }
}

impl LayerBuilder for NamedEntityBuilder<'_> {
    type Record = EntityRecord;

    fn layer(&self) -> LayerName {
        LayerName::NamedEntity
    }

    fn build(&self, ctx: &mut MergeContext<'_>, records: &[EntityRecord]) {
        for record in records {
            let Some(span) = ctx.span(self.layer(), record.span.start_char, record.span.end_char)
            else {
                continue;
            };

            let entity = match self.arbitration {
                None => NamedEntity {
                    span,
                    annotation_type: AnnotationType::named_entity(),
                    value: record.label.clone(),
                    provenance: None,
                },
                Some((arbiter, policy)) => {
                    let verdict = arbiter.arbitrate(span);
                    if !admit(ctx, span, verdict, policy, &record.label) {
                        continue;
                    }
                    NamedEntity {
                        span,
                        annotation_type: AnnotationType::named_entity(),
                        value: format!("{};{}", record.label, verdict.source_tag(MULTITAG_SOURCE)),
                        provenance: Some(provenance(MULTITAG_SOURCE, verdict, None)),
                    }
                }
            };
            ctx.index_mut().add_named_entity(entity);
        }
    }
}

/// Creates scored entities from one sentence of the batched sentence tagger.
///
/// Span offsets are relative to the sentence start given at construction.
/// Each label of a span becomes its own entity, typed through the entity
/// mapper, with value `<class>;Flair[-REMOVED];score=<score>`.
#[derive(Debug)]
pub struct ScoredEntityBuilder<'a> {
    mapper: &'a TagMapper,
    arbiter: &'a OverlapArbiter,
    policy: ConflictPolicy,
    sentence_begin: usize,
}

impl<'a> ScoredEntityBuilder<'a> {
    pub fn new(
        mapper: &'a TagMapper,
        arbiter: &'a OverlapArbiter,
        policy: ConflictPolicy,
        sentence_begin: usize,
    ) -> Self {
        Self {
            mapper,
            arbiter,
            policy,
            sentence_begin,
        }
    }
}

impl LayerBuilder for ScoredEntityBuilder<'_> {
    type Record = FlairSpan;

    fn layer(&self) -> LayerName {
        LayerName::NamedEntity
    }

    fn build(&self, ctx: &mut MergeContext<'_>, records: &[FlairSpan]) {
        for record in records {
            let shifted = Span::new(record.begin, record.end).shifted(self.sentence_begin);
            let Some(span) = ctx.span(self.layer(), shifted.begin, shifted.end) else {
                continue;
            };

            let verdict = self.arbiter.arbitrate(span);
            if !admit(ctx, span, verdict, self.policy, &record.text) {
                continue;
            }

            for label in &record.labels {
                let Some(resolved) = ctx.resolve_tag(self.mapper, self.layer(), &label.value)
                else {
                    continue;
                };
                ctx.index_mut().add_named_entity(NamedEntity {
                    span,
                    annotation_type: resolved.annotation_type,
                    value: format!(
                        "{};{};score={:?}",
                        label.value,
                        verdict.source_tag(FLAIR_SOURCE),
                        label.score
                    ),
                    provenance: Some(provenance(FLAIR_SOURCE, verdict, Some(label.score))),
                });
            }
        }
    }
}

/// Whether a challenger may be created under `policy`.
fn admit(
    ctx: &mut MergeContext<'_>,
    span: Span,
    verdict: Verdict,
    policy: ConflictPolicy,
    what: &str,
) -> bool {
    match (verdict, policy) {
        (Verdict::Accepted, _) | (Verdict::Superseded { .. }, ConflictPolicy::Flag) => true,
        (Verdict::Superseded { incumbent }, ConflictPolicy::Drop) => {
            ctx.warn(MergeWarning::Superseded {
                begin: span.begin,
                end: span.end,
                incumbent: (incumbent.begin, incumbent.end),
                dropped: what.to_string(),
            });
            false
        }
    }
}

fn provenance(source: &str, verdict: Verdict, score: Option<f64>) -> Provenance {
    Provenance {
        source: source.to_string(),
        superseded: verdict.is_superseded(),
        score,
    }
}

#[cfg(test)]
mod tests {
    use layered_annotations::AnnotatedDocument;

    use super::*;
    use crate::payload::{CharSpan, FlairLabel};
    use crate::tag_mapper::{MappingTable, UnmappedTagPolicy};

    fn ent(start_char: usize, end_char: usize, label: &str) -> EntityRecord {
        EntityRecord {
            span: CharSpan::new(start_char, end_char),
            label: label.to_string(),
        }
    }

    fn flair(begin: usize, end: usize, labels: &[(&str, f64)]) -> FlairSpan {
        FlairSpan {
            begin,
            end,
            text: String::new(),
            labels: labels
                .iter()
                .map(|(value, score)| FlairLabel {
                    value: value.to_string(),
                    score: *score,
                })
                .collect(),
        }
    }

    const TEXT: &str = "Wir sahen Quercus robur am Rhein bei Köln.";

    #[test]
    fn test_plain_entities_keep_raw_label() {
        let mut doc = AnnotatedDocument::new(TEXT);
        let mut ctx = MergeContext::new(&mut doc);
        NamedEntityBuilder::new().build(&mut ctx, &[ent(27, 32, "LOC"), ent(27, 50, "LOC")]);
        assert_eq!(ctx.into_warnings().len(), 1);

        let entity = &doc.index().named_entities()[0];
        assert_eq!(entity.value, "LOC");
        assert_eq!(entity.annotation_type.name(), "NamedEntity");
        assert_eq!(entity.provenance, None);
    }

    #[test]
    fn test_arbitrated_entities_carry_source_tag() {
        let arbiter = OverlapArbiter::new(vec![Span::new(10, 23)]);
        let mut doc = AnnotatedDocument::new(TEXT);
        let mut ctx = MergeContext::new(&mut doc);
        NamedEntityBuilder::with_arbiter(&arbiter, ConflictPolicy::Flag)
            .build(&mut ctx, &[ent(18, 23, "PER"), ent(27, 32, "LOC")]);
        assert!(ctx.into_warnings().is_empty());

        let values: Vec<&str> = doc
            .index()
            .named_entities()
            .iter()
            .map(|e| e.value.as_str())
            .collect();
        assert_eq!(values, vec!["PER;SpaCy-REMOVED", "LOC;SpaCy"]);
        assert!(doc.index().named_entities()[0].is_superseded());
    }

    #[test]
    fn test_scored_entities_use_sentence_offset() {
        let mapper = TagMapper::new(
            MappingTable::builtin("biofid").unwrap().clone(),
            UnmappedTagPolicy::Skip,
        );
        let arbiter = OverlapArbiter::default();
        let mut doc = AnnotatedDocument::new(TEXT);
        let mut ctx = MergeContext::new(&mut doc);
        ScoredEntityBuilder::new(&mapper, &arbiter, ConflictPolicy::Flag, 10).build(
            &mut ctx,
            &[flair(0, 13, &[("Taxon", 0.98), ("Habitat", 0.25)])],
        );
        assert!(ctx.into_warnings().is_empty());

        let entities = doc.index().named_entities();
        assert_eq!(entities.len(), 2);
        assert_eq!(entities[0].span, Span::new(10, 23));
        assert_eq!(entities[0].annotation_type.name(), "Taxon");
        assert_eq!(entities[0].value, "Taxon;Flair;score=0.98");
        assert_eq!(entities[1].value, "Habitat;Flair;score=0.25");
        assert_eq!(
            entities[0].provenance.as_ref().and_then(|p| p.score),
            Some(0.98)
        );
        assert_eq!(doc.covered_text(entities[0].span), Some("Quercus robur"));
    }

    #[test]
    fn test_scored_entity_past_text_end_is_invalid() {
        let mapper = TagMapper::new(
            MappingTable::builtin("biofid").unwrap().clone(),
            UnmappedTagPolicy::Skip,
        );
        let arbiter = OverlapArbiter::default();
        let mut doc = AnnotatedDocument::new(TEXT);
        let mut ctx = MergeContext::new(&mut doc);
        ScoredEntityBuilder::new(&mapper, &arbiter, ConflictPolicy::Flag, 10).build(
            &mut ctx,
            &[flair(usize::MAX - 4, usize::MAX, &[("Taxon", 0.5)])],
        );

        let warnings = ctx.into_warnings();
        assert_eq!(warnings.len(), 1);
        assert!(matches!(
            warnings[0],
            MergeWarning::InvalidSpan {
                layer: LayerName::NamedEntity,
                begin,
                end,
                ..
            } if begin == usize::MAX && end == usize::MAX
        ));
        assert!(doc.index().named_entities().is_empty());
    }

    #[test]
    fn test_drop_policy_rejects_challenger() {
        let mapper = TagMapper::new(
            MappingTable::builtin("biofid").unwrap().clone(),
            UnmappedTagPolicy::Skip,
        );
        let arbiter = OverlapArbiter::new(vec![Span::new(10, 17)]);
        let mut doc = AnnotatedDocument::new(TEXT);
        let mut ctx = MergeContext::new(&mut doc);
        ScoredEntityBuilder::new(&mapper, &arbiter, ConflictPolicy::Drop, 10).build(
            &mut ctx,
            &[flair(0, 13, &[("Taxon", 1.0)]), flair(17, 22, &[("Location", 0.9)])],
        );

        let warnings = ctx.into_warnings();
        assert_eq!(
            warnings,
            vec![MergeWarning::Superseded {
                begin: 10,
                end: 23,
                incumbent: (10, 17),
                dropped: String::new(),
            }]
        );
        let entities = doc.index().named_entities();
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].value, "Location;Flair;score=0.9");
    }
}
