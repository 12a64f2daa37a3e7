use tracing::debug;

use super::{LayerBuilder, MergeContext};
use crate::payload::TokenRecord;
use crate::report::LayerName;

/// Creates Tokens and registers them in the merge's span index.
///
/// Must run before every builder that attaches to tokens. When two records
/// share a span both tokens are created, but lookups resolve to the first.
#[derive(Debug, Default)]
pub struct TokenBuilder;

impl TokenBuilder {
    pub fn new() -> Self {
        Self
    }
}

impl LayerBuilder for TokenBuilder {
    type Record = TokenRecord;

    fn layer(&self) -> LayerName {
        LayerName::Token
    }

    fn build(&self, ctx: &mut MergeContext<'_>, records: &[TokenRecord]) {
        for record in records.iter().filter(|r| !r.position.is_space) {
            let Some(span) = ctx.token_span(self.layer(), &record.position) else {
                continue;
            };
            let token = ctx.index_mut().add_token(span);
            if !ctx.tokens.put(span, token) {
                debug!(%span, "duplicate token span, keeping the first token for lookups");
            }
        }
    }
}
