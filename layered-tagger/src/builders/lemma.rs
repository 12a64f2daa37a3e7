use layered_annotations::Lemma;

use super::{LayerBuilder, MergeContext};
use crate::payload::LemmaRecord;
use crate::report::LayerName;

#[derive(Debug, Default)]
pub struct LemmaBuilder;

impl LemmaBuilder {
    pub fn new() -> Self {
        Self
    }
}

impl LayerBuilder for LemmaBuilder {
    type Record = LemmaRecord;

    fn layer(&self) -> LayerName {
        LayerName::Lemma
    }

    fn build(&self, ctx: &mut MergeContext<'_>, records: &[LemmaRecord]) {
        for record in records.iter().filter(|r| !r.position.is_space) {
            let Some(span) = ctx.token_span(self.layer(), &record.position) else {
                continue;
            };
            let Some(token) = ctx.token_at(self.layer(), span) else {
                continue;
            };

            let index = ctx.index_mut();
            let lemma = index.add_lemma(Lemma {
                span,
                value: record.lemma_text.clone(),
            });
            let linked = index.link_lemma(token, lemma);
            ctx.check_link(self.layer(), span, linked);
        }
    }
}

#[cfg(test)]
mod tests {
    use layered_annotations::AnnotatedDocument;

    use super::*;
    use crate::builders::TokenBuilder;
    use crate::payload::{TokenPosition, TokenRecord};
    use crate::report::MergeWarning;

    fn lemma(idx: usize, length: usize, text: &str) -> LemmaRecord {
        LemmaRecord {
            position: TokenPosition::new(idx, length),
            lemma_text: text.to_string(),
        }
    }

    #[test]
    fn test_lemma_links_to_token() {
        let mut doc = AnnotatedDocument::new("Bäume blühen");
        let mut ctx = MergeContext::new(&mut doc);
        TokenBuilder::new().build(
            &mut ctx,
            &[
                TokenRecord { position: TokenPosition::new(0, 5) },
                TokenRecord { position: TokenPosition::new(6, 6) },
            ],
        );
        LemmaBuilder::new().build(&mut ctx, &[lemma(0, 5, "Baum"), lemma(6, 6, "blühen")]);
        assert!(ctx.into_warnings().is_empty());

        let index = doc.index();
        let first = index.tokens()[0].lemma().and_then(|id| index.lemma(id)).unwrap();
        assert_eq!(first.value, "Baum");
        assert_eq!(index.lemmas().len(), 2);
    }

    #[test]
    fn test_missing_token_drops_record() {
        let mut doc = AnnotatedDocument::new("Bäume blühen");
        let mut ctx = MergeContext::new(&mut doc);
        TokenBuilder::new().build(
            &mut ctx,
            &[TokenRecord { position: TokenPosition::new(0, 5) }],
        );
        LemmaBuilder::new().build(&mut ctx, &[lemma(0, 4, "Bau"), lemma(0, 5, "Baum")]);

        assert_eq!(
            ctx.into_warnings(),
            vec![MergeWarning::UnresolvedToken {
                layer: LayerName::Lemma,
                begin: 0,
                end: 4,
            }]
        );
        assert_eq!(doc.index().lemmas().len(), 1);
    }

    #[test]
    fn test_second_lemma_keeps_first_link() {
        let mut doc = AnnotatedDocument::new("went");
        let mut ctx = MergeContext::new(&mut doc);
        TokenBuilder::new().build(
            &mut ctx,
            &[TokenRecord { position: TokenPosition::new(0, 4) }],
        );
        LemmaBuilder::new().build(&mut ctx, &[lemma(0, 4, "go"), lemma(0, 4, "went")]);

        let warnings = ctx.into_warnings();
        assert!(matches!(
            warnings.as_slice(),
            [MergeWarning::LinkAlreadySet { layer: LayerName::Lemma, .. }]
        ));

        let index = doc.index();
        assert_eq!(index.lemmas().len(), 2);
        let linked = index.tokens()[0].lemma().and_then(|id| index.lemma(id)).unwrap();
        assert_eq!(linked.value, "go");
    }
}
