use layered_annotations::Pos;

use super::{LayerBuilder, MergeContext};
use crate::payload::PosRecord;
use crate::report::LayerName;
use crate::tag_mapper::TagMapper;

/// Creates POS tags typed through the configured [`TagMapper`].
#[derive(Debug)]
pub struct PosBuilder<'m> {
    mapper: &'m TagMapper,
}

impl<'m> PosBuilder<'m> {
    pub fn new(mapper: &'m TagMapper) -> Self {
        Self { mapper }
    }
}

impl LayerBuilder for PosBuilder<'_> {
    type Record = PosRecord;

    fn layer(&self) -> LayerName {
        LayerName::Pos
    }

    fn build(&self, ctx: &mut MergeContext<'_>, records: &[PosRecord]) {
        for record in records.iter().filter(|r| !r.position.is_space) {
            let Some(span) = ctx.token_span(self.layer(), &record.position) else {
                continue;
            };
            let Some(token) = ctx.token_at(self.layer(), span) else {
                continue;
            };
            let Some(resolved) = ctx.resolve_tag(self.mapper, self.layer(), &record.tag) else {
                continue;
            };

            let index = ctx.index_mut();
            let pos = index.add_pos(Pos {
                span,
                annotation_type: resolved.annotation_type,
                pos_value: record.tag.clone(),
                coarse_value: resolved.coarse,
            });
            let linked = index.link_pos(token, pos);
            ctx.check_link(self.layer(), span, linked);
        }
    }
}
