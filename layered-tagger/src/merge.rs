//! Merge pipelines for the two tagger response shapes.
//!
//! Builders run in a fixed dependency order: tokens must exist before
//! anything attaches to them, and protected spans are tagged before any
//! challenger is arbitrated.

use layered_annotations::{AnnotatedDocument, Span};
use serde_json::Value;
use tracing::{debug, info};

use crate::arbiter::{tag_incumbents, ConflictPolicy, OverlapArbiter};
use crate::batch_size::set_batch_size;
use crate::builders::{
    DependencyBuilder, LayerBuilder, LemmaBuilder, MergeContext, MorphologyBuilder,
    NamedEntityBuilder, PosBuilder, PredicateArgumentBuilder, ScoredEntityBuilder,
    SentenceBuilder, TokenBuilder,
};
use crate::config::MergeConfig;
use crate::errors::{MergeError, MergeResult};
use crate::payload::{FlairResponse, MultiTagPayload, MultiTagResponse};
use crate::report::{MergeReport, MergeWarning};
use crate::request::FlairRequest;
use crate::tag_mapper::TagMapper;

#[derive(Debug, Clone, Copy)]
enum Stage {
    Sentence,
    Token,
    Pos,
    Lemma,
    Morphology,
    Dependency,
    NamedEntity,
    PredicateArgument,
}

/// Stage order of [`MultiTagMerge`].
///
/// 1. Sentence - boundaries (no deps)
/// 2. Token - fills the span index (no deps)
/// 3. Pos - attaches to tokens
/// 4. Lemma - attaches to tokens
/// 5. Morphology - attaches to tokens
/// 6. Dependency - resolves dependent and governor tokens
/// 7. NamedEntity - free spans, optionally arbitrated
/// 8. PredicateArgument - free spans
const MULTITAG_STAGES: [Stage; 8] = [
    Stage::Sentence,
    Stage::Token,
    Stage::Pos,
    Stage::Lemma,
    Stage::Morphology,
    Stage::Dependency,
    Stage::NamedEntity,
    Stage::PredicateArgument,
];

/// Merges the multi-layer tagger's response into a document.
#[derive(Debug)]
pub struct MultiTagMerge {
    pos_mapper: TagMapper,
    conflict: ConflictPolicy,
    arbitrate_entities: bool,
}

impl MultiTagMerge {
    pub fn new(config: &MergeConfig) -> MergeResult<Self> {
        Ok(Self {
            pos_mapper: config.pos_mapper()?,
            conflict: config.conflict,
            arbitrate_entities: config.arbitrate_tagger_entities,
        })
    }

    pub fn with_mapper(pos_mapper: TagMapper) -> Self {
        Self {
            pos_mapper,
            conflict: ConflictPolicy::default(),
            arbitrate_entities: false,
        }
    }

    /// Arbitrate the tagger's entities against the document's taxa.
    pub fn arbitrate_entities(mut self, conflict: ConflictPolicy) -> Self {
        self.arbitrate_entities = true;
        self.conflict = conflict;
        self
    }

    /// Parse an already-decoded response and merge it.
    ///
    /// A response missing any layer fails before the document is touched.
    /// An empty document is never parsed against and yields an empty report.
    pub fn merge_value(
        &self,
        doc: &mut AnnotatedDocument,
        value: Value,
    ) -> MergeResult<MergeReport> {
        if doc.is_empty() {
            debug!("empty document, skipping multi-layer merge");
            return Ok(MergeReport::default());
        }
        let response = MultiTagResponse::from_value(value)?;
        Ok(self.merge(doc, &response.multitag))
    }

    /// Apply every layer of `payload`, appending to whatever the document
    /// already holds.
    pub fn merge(&self, doc: &mut AnnotatedDocument, payload: &MultiTagPayload) -> MergeReport {
        if doc.is_empty() {
            debug!("empty document, skipping multi-layer merge");
            return MergeReport::default();
        }

        let before = doc.index().counts();
        let arbiter = self
            .arbitrate_entities
            .then(|| tag_incumbents(doc.index_mut()));

        let mut ctx = MergeContext::new(doc);
        for stage in MULTITAG_STAGES {
            let stage_before = ctx.index().counts();
            let warnings_before = ctx.warnings().len();
            let records = self.run_stage(stage, &mut ctx, payload, arbiter.as_ref());
            debug!(
                ?stage,
                records,
                created = ctx.index().counts().since(&stage_before).total(),
                dropped = ctx.warnings().len() - warnings_before,
                "stage done"
            );
        }
        let warnings = ctx.into_warnings();

        let report = MergeReport {
            created: doc.index().counts().since(&before),
            warnings,
        };
        info!(
            created = report.created.total(),
            warnings = report.warnings.len(),
            "multi-layer merge done"
        );
        report
    }

    /// Run one stage; returns the number of records it was given.
    fn run_stage(
        &self,
        stage: Stage,
        ctx: &mut MergeContext<'_>,
        payload: &MultiTagPayload,
        arbiter: Option<&OverlapArbiter>,
    ) -> usize {
        match stage {
            Stage::Sentence => run(&SentenceBuilder::new(), ctx, &payload.sentences),
            Stage::Token => run(&TokenBuilder::new(), ctx, &payload.tokens),
            Stage::Pos => run(&PosBuilder::new(&self.pos_mapper), ctx, &payload.pos),
            Stage::Lemma => run(&LemmaBuilder::new(), ctx, &payload.lemmas),
            Stage::Morphology => run(&MorphologyBuilder::new(), ctx, &payload.morphs),
            Stage::Dependency => run(&DependencyBuilder::new(), ctx, &payload.deps),
            Stage::NamedEntity => {
                let builder = match arbiter {
                    Some(arbiter) => NamedEntityBuilder::with_arbiter(arbiter, self.conflict),
                    None => NamedEntityBuilder::new(),
                };
                run(&builder, ctx, &payload.ents)
            }
            Stage::PredicateArgument => {
                run(&PredicateArgumentBuilder::new(), ctx, &payload.psrs)
            }
        }
    }
}

fn run<B: LayerBuilder>(builder: &B, ctx: &mut MergeContext<'_>, records: &[B::Record]) -> usize {
    builder.build(ctx, records);
    records.len()
}

/// Merges batched sentence tagger responses into a document.
///
/// The Nth result of every response belongs to the Nth Sentence of the
/// document. Counts are checked for every response before anything is
/// written.
#[derive(Debug)]
pub struct FlairMerge {
    entity_mapper: TagMapper,
    conflict: ConflictPolicy,
    batch_size: usize,
}

impl FlairMerge {
    pub fn new(config: &MergeConfig) -> MergeResult<Self> {
        Ok(Self {
            entity_mapper: config.entity_mapper()?,
            conflict: config.conflict,
            batch_size: config.batch_size,
        })
    }

    pub fn with_mapper(entity_mapper: TagMapper, conflict: ConflictPolicy) -> Self {
        Self {
            entity_mapper,
            conflict,
            batch_size: 0,
        }
    }

    /// Record the batch size on the document and build the request body.
    pub fn request(&self, doc: &mut AnnotatedDocument) -> Option<FlairRequest> {
        if doc.is_empty() {
            return None;
        }
        set_batch_size(doc, self.batch_size);
        FlairRequest::from_document(doc)
    }

    /// Parse an already-decoded list of responses and merge them.
    ///
    /// An empty document is never parsed against and yields an empty report.
    pub fn merge_value(
        &self,
        doc: &mut AnnotatedDocument,
        value: Value,
    ) -> MergeResult<MergeReport> {
        if doc.is_empty() {
            debug!("empty document, skipping batched merge");
            return Ok(MergeReport::default());
        }
        let responses = FlairResponse::batch_from_value(value)?;
        self.merge(doc, &responses)
    }

    pub fn merge(
        &self,
        doc: &mut AnnotatedDocument,
        responses: &[FlairResponse],
    ) -> MergeResult<MergeReport> {
        if doc.is_empty() {
            debug!("empty document, skipping batched merge");
            return Ok(MergeReport::default());
        }

        let sentences: Vec<Span> = doc.index().sentences().iter().map(|s| s.span).collect();
        for (response, batch) in responses.iter().enumerate() {
            if batch.results.len() != sentences.len() {
                return Err(MergeError::SentenceCountMismatch {
                    response,
                    expected: sentences.len(),
                    found: batch.results.len(),
                });
            }
        }

        let before = doc.index().counts();
        let arbiter = tag_incumbents(doc.index_mut());
        debug!(incumbents = arbiter.incumbents().len(), "protected spans tagged");

        let mut ctx = MergeContext::new(doc);
        for (response, batch) in responses.iter().enumerate() {
            for (sentence, (result, &span)) in batch.results.iter().zip(&sentences).enumerate() {
                let covered = ctx.covered_text(span).unwrap_or_default();
                if covered != result.text {
                    let warning = MergeWarning::SentenceTextMismatch {
                        response,
                        sentence,
                        expected: covered.to_string(),
                        found: result.text.clone(),
                    };
                    ctx.warn(warning);
                }

                ScoredEntityBuilder::new(&self.entity_mapper, &arbiter, self.conflict, span.begin)
                    .build(&mut ctx, &result.spans);
            }
        }
        let warnings = ctx.into_warnings();

        let report = MergeReport {
            created: doc.index().counts().since(&before),
            warnings,
        };
        info!(
            responses = responses.len(),
            created = report.created.total(),
            warnings = report.warnings.len(),
            "batched merge done"
        );
        Ok(report)
    }
}
