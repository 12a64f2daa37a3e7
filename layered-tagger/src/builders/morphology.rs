use layered_annotations::{MorphFeature, MorphologicalFeatures, Span};
use tracing::debug;

use super::{LayerBuilder, MergeContext};
use crate::payload::{MorphList, MorphRecord};
use crate::report::LayerName;

/// Parses `Key=Value` features onto named slots.
///
/// Keys without a slot are ignored. A record left with no recognized
/// feature creates no node and no link.
#[derive(Debug, Default)]
pub struct MorphologyBuilder;

impl MorphologyBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Recognized features of `list`, or `None` if there are none.
    pub fn parse(span: Span, list: &MorphList) -> Option<MorphologicalFeatures> {
        let mut features = MorphologicalFeatures::new(span, "");
        let mut recognized = Vec::new();

        for entry in list.iter() {
            let Some((key, value)) = entry.split_once('=') else {
                continue;
            };
            let (key, value) = (key.trim(), value.trim());
            let Some(feature) = MorphFeature::from_key(key) else {
                continue;
            };
            features.set(feature, value);
            recognized.push(format!("{key}={value}"));
        }

        if recognized.is_empty() {
            return None;
        }
        features.value = recognized.join("|");
        Some(features)
    }
}

impl LayerBuilder for MorphologyBuilder {
    type Record = MorphRecord;

    fn layer(&self) -> LayerName {
        LayerName::Morphology
    }

    fn build(&self, ctx: &mut MergeContext<'_>, records: &[MorphRecord]) {
        for record in records.iter().filter(|r| !r.position.is_space) {
            let Some(span) = ctx.token_span(self.layer(), &record.position) else {
                continue;
            };
            let Some(token) = ctx.token_at(self.layer(), span) else {
                continue;
            };
            let Some(features) = Self::parse(span, &record.morph) else {
                debug!(%span, "no recognized morphological features");
                continue;
            };

            let index = ctx.index_mut();
            let morphology = index.add_morphology(features);
            let linked = index.link_morphology(token, morphology);
            ctx.check_link(self.layer(), span, linked);
        }
    }
}
