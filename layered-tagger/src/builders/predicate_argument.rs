use layered_annotations::SrLink;

use super::{LayerBuilder, MergeContext};
use crate::payload::PredicateArgumentTuple;
use crate::report::LayerName;

/// Creates a predicate Entity per tuple, plus an argument Entity and a
/// role-labeled link from the predicate for every argument.
#[derive(Debug, Default)]
pub struct PredicateArgumentBuilder;

impl PredicateArgumentBuilder {
    pub fn new() -> Self {
        Self
    }
}

impl LayerBuilder for PredicateArgumentBuilder {
    type Record = PredicateArgumentTuple;

    fn layer(&self) -> LayerName {
        LayerName::PredicateArgument
    }

    fn build(&self, ctx: &mut MergeContext<'_>, records: &[PredicateArgumentTuple]) {
        for tuple in records {
            let pred = tuple.predicate;
            let Some(pred_span) = ctx.span(self.layer(), pred.start_char, pred.end_char) else {
                continue;
            };
            let predicate = ctx.index_mut().add_entity(pred_span);

            for argument in &tuple.arguments {
                let arg = argument.span;
                let Some(arg_span) = ctx.span(self.layer(), arg.start_char, arg.end_char) else {
                    continue;
                };
                let index = ctx.index_mut();
                let target = index.add_entity(arg_span);
                index.add_sr_link(SrLink::new(argument.role.clone(), predicate, target));
            }
        }
    }
}
