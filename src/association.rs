//! Association types for rendering edges between spans.
//!
//! Edges in the annotation index point at node ids. For display, an edge is
//! flattened into an [`AssociatedSpan`]: the target span plus a typed label
//! describing the relationship.

use std::fmt::Debug;
use std::sync::Arc;

use crate::Span;

/// A typed semantic label for an edge between spans.
///
/// # Example
///
/// ```
/// use layered_annotations::Association;
///
/// #[derive(Debug, Clone)]
/// pub struct Antecedent;
///
/// impl Association for Antecedent {
///     fn label(&self) -> &str { "antecedent" }
///     fn glyph(&self) -> Option<&'static str> { Some("^") }
/// }
/// ```
pub trait Association: Debug + Send + Sync + 'static {
    /// Returns the semantic label for this association.
    fn label(&self) -> &str;

    /// Returns an optional glyph rendered before the label.
    fn glyph(&self) -> Option<&'static str> {
        None
    }
}

/// Dependent → governor edge of a dependency.
#[derive(Debug, Clone)]
pub struct Governor;

impl Association for Governor {
    fn label(&self) -> &str {
        "governor"
    }
}

/// Predicate → argument edge; the label is the argument's role.
#[derive(Debug, Clone)]
pub struct SemanticArgument {
    pub role: String,
}

impl Association for SemanticArgument {
    fn label(&self) -> &str {
        &self.role
    }

    fn glyph(&self) -> Option<&'static str> {
        Some("@")
    }
}

/// An edge to a target span with a typed semantic label.
#[derive(Clone)]
pub struct AssociatedSpan {
    /// The target span being referenced
    pub span: Span,
    association: Arc<dyn Association>,
}

impl Debug for AssociatedSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssociatedSpan")
            .field("span", &self.span)
            .field("label", &self.label())
            .field("glyph", &self.glyph())
            .finish()
    }
}

impl AssociatedSpan {
    pub fn new<A: Association>(association: A, span: Span) -> Self {
        Self {
            span,
            association: Arc::new(association),
        }
    }

    pub fn label(&self) -> &str {
        self.association.label()
    }

    pub fn glyph(&self) -> Option<&'static str> {
        self.association.glyph()
    }
}
