use std::collections::{HashMap, HashSet};
use std::fmt::{self, Write};

use unicode_width::UnicodeWidthChar;

use crate::association::{AssociatedSpan, Governor, SemanticArgument};
use crate::{AnnotatedDocument, Span};

/// Convert a zero-based index to a base-26 label: A, B, ..., Z, AA, AB, ..., AZ, BA, ...
/// Similar to Excel column naming.
fn index_to_base26_label(mut n: usize) -> String {
    let mut result = String::new();
    loop {
        let remainder = n % 26;
        result.insert(0, (b'A' + remainder as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    result
}

/// Annotation layers that can be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    Sentence,
    Token,
    Lemma,
    Morphology,
    Pos,
    Dependency,
    NamedEntity,
    Taxon,
    Entity,
}

/// Internal representation of an included annotation for display.
struct IncludedAttr {
    span: Span,
    debug_value: String,
    associations: Vec<AssociatedSpan>,
    show_associations: bool,
}

/// Renders a document's annotations underneath its text.
///
/// ```text
/// The cat sat
/// ╰─╯Token
///     ╰─╯Token
///         ╰─╯[A] Token
///     ╰─╯Dependency(nsubj)
///       └─governor─>[A]
/// ```
pub struct IndexDisplay<'a> {
    doc: &'a AnnotatedDocument,
    include_attrs: Vec<IncludedAttr>,
}

impl<'a> fmt::Display for IndexDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // display column of every char offset, plus one for the end of text
        let mut columns = Vec::with_capacity(self.doc.char_len() + 1);
        let mut opening_line = String::new();
        let mut width = 0;
        for ch in self.doc.text().chars() {
            columns.push(width);
            let ch = if ch.is_whitespace() { ' ' } else { ch };
            opening_line.push(ch);
            width += UnicodeWidthChar::width(ch).unwrap_or(0);
        }
        columns.push(width);

        f.write_str(&opening_line)?;

        let column = |offset: usize| columns.get(offset).copied().unwrap_or(width);
        let span_labels = self.build_span_labels();

        for attr in self.include_attrs.iter() {
            f.write_char('\n')?;

            let start_col = column(attr.span.begin);
            for _ in 0..start_col {
                f.write_char(' ')?;
            }

            f.write_char('╰')?;

            let end_col = column(attr.span.end);
            for _ in (start_col + 1)..end_col.saturating_sub(1) {
                f.write_char('─')?;
            }

            if end_col.saturating_sub(start_col) > 1 {
                f.write_char('╯')?;
            }

            if let Some(label) = span_labels.get(&attr.span) {
                write!(f, "{} ", label)?;
            }

            f.write_str(&attr.debug_value)?;

            if attr.show_associations {
                for assoc in &attr.associations {
                    f.write_char('\n')?;

                    for _ in 0..start_col + 2 {
                        f.write_char(' ')?;
                    }

                    let glyph = assoc.glyph().unwrap_or("");
                    let target = match span_labels.get(&assoc.span) {
                        Some(label) => label.clone(),
                        None => assoc.span.to_string(),
                    };

                    write!(f, "└─{}{}─>{}", glyph, assoc.label(), target)?;
                }
            }
        }

        Ok(())
    }
}

impl<'a> IndexDisplay<'a> {
    pub fn new(doc: &'a AnnotatedDocument) -> Self {
        IndexDisplay {
            doc,
            include_attrs: Vec::new(),
        }
    }

    /// Map each association target that is itself displayed to "[A]", "[B]", ...
    fn build_span_labels(&self) -> HashMap<Span, String> {
        let included: HashSet<Span> = self.include_attrs.iter().map(|attr| attr.span).collect();

        let mut targets: Vec<Span> = self
            .include_attrs
            .iter()
            .filter(|attr| attr.show_associations)
            .flat_map(|attr| &attr.associations)
            .map(|assoc| assoc.span)
            .filter(|span| included.contains(span))
            .collect();

        targets.sort();
        targets.dedup();

        targets
            .into_iter()
            .enumerate()
            .map(|(i, span)| (span, format!("[{}]", index_to_base26_label(i))))
            .collect()
    }

    fn push_layer(&mut self, layer: Layer, show_associations: bool) {
        let index = self.doc.index();
        let rows: Vec<(Span, String, Vec<AssociatedSpan>)> = match layer {
            Layer::Sentence => index
                .sentences()
                .iter()
                .map(|s| (s.span, "Sentence".to_string(), Vec::new()))
                .collect(),
            Layer::Token => index
                .tokens()
                .iter()
                .map(|t| (t.span, "Token".to_string(), Vec::new()))
                .collect(),
            Layer::Lemma => index
                .lemmas()
                .iter()
                .map(|l| (l.span, format!("Lemma({})", l.value), Vec::new()))
                .collect(),
            Layer::Morphology => index
                .morphologies()
                .iter()
                .map(|m| (m.span, format!("Morph({})", m.value), Vec::new()))
                .collect(),
            Layer::Pos => index
                .pos()
                .iter()
                .map(|p| (p.span, format!("{}({})", p.annotation_type, p.pos_value), Vec::new()))
                .collect(),
            Layer::Dependency => index
                .dependencies()
                .iter()
                .map(|d| {
                    let label = if d.is_root() {
                        format!("ROOT({})", d.dependency_type)
                    } else {
                        format!("Dependency({})", d.dependency_type)
                    };
                    let governor = index
                        .token(d.governor)
                        .map(|t| AssociatedSpan::new(Governor, t.span));
                    (d.span, label, governor.into_iter().collect())
                })
                .collect(),
            Layer::NamedEntity => index
                .named_entities()
                .iter()
                .map(|e| (e.span, format!("{}({})", e.annotation_type, e.value), Vec::new()))
                .collect(),
            Layer::Taxon => index
                .taxa()
                .iter()
                .map(|t| (t.span, format!("Taxon({})", t.value), Vec::new()))
                .collect(),
            Layer::Entity => index
                .entities()
                .iter()
                .enumerate()
                .map(|(i, e)| {
                    let arguments = index
                        .sr_links()
                        .iter()
                        .filter(|link| link.anchor.index() == i)
                        .filter_map(|link| {
                            let target = index.entity(link.target)?;
                            Some(AssociatedSpan::new(
                                SemanticArgument {
                                    role: link.role.clone(),
                                },
                                target.span,
                            ))
                        })
                        .collect();
                    (e.span, "Entity".to_string(), arguments)
                })
                .collect(),
        };

        for (span, debug_value, associations) in rows {
            self.include_attrs.push(IncludedAttr {
                span,
                debug_value,
                associations,
                show_associations,
            });
        }
    }

    pub fn include(&mut self, layer: Layer) {
        self.push_layer(layer, false);
    }

    /// Include a layer with its edges rendered as arrows below each span.
    ///
    /// Only dependencies (to their governor) and entities (to their
    /// arguments) carry edges.
    pub fn include_with_associations(&mut self, layer: Layer) {
        self.push_layer(layer, true);
    }

    /// Takes self
    pub fn with(mut self, layer: Layer) -> Self {
        self.include(layer);
        self
    }

    /// Takes self, includes associations
    pub fn with_associations(mut self, layer: Layer) -> Self {
        self.include_with_associations(layer);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Dependency, DependencyFlavor, DependencyKind, SrLink};

    #[test]
    fn test_index_to_base26_label() {
        assert_eq!(index_to_base26_label(0), "A");
        assert_eq!(index_to_base26_label(25), "Z");
        assert_eq!(index_to_base26_label(26), "AA");
        assert_eq!(index_to_base26_label(51), "AZ");
        assert_eq!(index_to_base26_label(52), "BA");
        assert_eq!(index_to_base26_label(701), "ZZ");
        assert_eq!(index_to_base26_label(702), "AAA");
    }

    fn the_cat_sat() -> AnnotatedDocument {
        let mut doc = AnnotatedDocument::new("The cat sat");
        let index = doc.index_mut();
        index.add_token(Span::new(0, 3));
        let cat = index.add_token(Span::new(4, 7));
        let sat = index.add_token(Span::new(8, 11));
        index
            .add_dependency(Dependency {
                span: Span::new(4, 7),
                dependent: cat,
                governor: sat,
                dependency_type: "nsubj".to_string(),
                kind: DependencyKind::Regular,
                flavor: DependencyFlavor::Basic,
            })
            .unwrap();
        index
            .add_dependency(Dependency {
                span: Span::new(8, 11),
                dependent: sat,
                governor: sat,
                dependency_type: Dependency::ROOT_LABEL.to_string(),
                kind: DependencyKind::Root,
                flavor: DependencyFlavor::Basic,
            })
            .unwrap();
        doc
    }

    #[test]
    fn test_tokens_only() {
        let doc = the_cat_sat();
        let display = IndexDisplay::new(&doc).with(Layer::Token);

        insta::assert_snapshot!(display, @r###"
        The cat sat
        ╰─╯Token
            ╰─╯Token
                ╰─╯Token
        "###);
    }

    #[test]
    fn test_dependencies_point_at_governor() {
        let doc = the_cat_sat();
        let display = IndexDisplay::new(&doc)
            .with(Layer::Token)
            .with_associations(Layer::Dependency);

        insta::assert_snapshot!(display, @r###"
        The cat sat
        ╰─╯Token
            ╰─╯Token
                ╰─╯[A] Token
            ╰─╯Dependency(nsubj)
              └─governor─>[A]
                ╰─╯[A] ROOT(--)
                  └─governor─>[A]
        "###);
    }

    #[test]
    fn test_entity_arguments() {
        let mut doc = AnnotatedDocument::new("Birds sing");
        let index = doc.index_mut();
        let pred = index.add_entity(Span::new(6, 10));
        let arg = index.add_entity(Span::new(0, 5));
        index.add_sr_link(SrLink::new("ARG0".to_string(), pred, arg));

        let display = IndexDisplay::new(&doc).with_associations(Layer::Entity);
        insta::assert_snapshot!(display, @r###"
        Birds sing
              ╰──╯Entity
                └─@ARG0─>[A]
        ╰───╯[A] Entity
        "###);
    }

    #[test]
    fn test_hidden_target_falls_back_to_span() {
        let mut doc = AnnotatedDocument::new("cat sat");
        let index = doc.index_mut();
        let cat = index.add_token(Span::new(0, 3));
        let sat = index.add_token(Span::new(4, 7));
        index
            .add_dependency(Dependency {
                span: Span::new(0, 3),
                dependent: cat,
                governor: sat,
                dependency_type: "nsubj".to_string(),
                kind: DependencyKind::Regular,
                flavor: DependencyFlavor::Basic,
            })
            .unwrap();

        let display = IndexDisplay::new(&doc).with_associations(Layer::Dependency);
        insta::assert_snapshot!(display, @r###"
        cat sat
        ╰─╯Dependency(nsubj)
          └─governor─>[4..7)
        "###);
    }

    #[test]
    fn test_wide_chars_shift_columns() {
        let mut doc = AnnotatedDocument::new("日本 語");
        doc.index_mut().add_token(Span::new(3, 4));
        let display = IndexDisplay::new(&doc).with(Layer::Token);
        insta::assert_snapshot!(display, @r###"
        日本 語
             ╰╯Token
        "###);
    }
}
