//! Generic binary relation between two annotation nodes.
//!
//! A `SpanLink` is a typed edge from an anchor node to a target node, used
//! for predicate-argument relations where the role is the tuple key the
//! tagger reported.

/// Binary relation from `anchor` to `target`.
///
/// # Type Parameters
/// - `R`: Role of the target with respect to the anchor
/// - `N`: Node id type of both endpoints
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct SpanLink<R, N> {
    /// Semantic role of target with respect to anchor
    pub role: R,
    /// The node the relation starts at (e.g. the predicate)
    pub anchor: N,
    /// The node the relation points to (e.g. the argument)
    pub target: N,
}

impl<R, N> SpanLink<R, N> {
    pub fn new(role: R, anchor: N, target: N) -> Self {
        Self {
            role,
            anchor,
            target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_link_construction() {
        let link = SpanLink::new("ARG0".to_string(), 0usize, 1usize);
        assert_eq!(link.role, "ARG0");
        assert_eq!(link.anchor, 0);
        assert_eq!(link.target, 1);
    }

    #[test]
    fn test_span_link_equality() {
        let link1 = SpanLink::new("ARG0", 0u8, 1u8);
        let link2 = SpanLink::new("ARG0", 0u8, 1u8);
        let link3 = SpanLink::new("ARG1", 0u8, 1u8);
        let link4 = SpanLink::new("ARG0", 0u8, 2u8);

        assert_eq!(link1, link2);
        assert_ne!(link1, link3); // different role
        assert_ne!(link1, link4); // different target
    }
}
