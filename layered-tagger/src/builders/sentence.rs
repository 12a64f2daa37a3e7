use super::{LayerBuilder, MergeContext};
use crate::payload::SentenceRecord;
use crate::report::LayerName;

/// Creates one Sentence per record. Sentences do not reference other layers.
#[derive(Debug, Default)]
pub struct SentenceBuilder;

impl SentenceBuilder {
    pub fn new() -> Self {
        Self
    }
}

impl LayerBuilder for SentenceBuilder {
    type Record = SentenceRecord;

    fn layer(&self) -> LayerName {
        LayerName::Sentence
    }

    fn build(&self, ctx: &mut MergeContext<'_>, records: &[SentenceRecord]) {
        for record in records {
            if let Some(span) = ctx.span(self.layer(), record.begin, record.end) {
                ctx.index_mut().add_sentence(span);
            }
        }
    }
}
