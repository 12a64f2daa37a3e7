//! Tag set remapping.
//!
//! A [`TagMapper`] is built per merge from configuration and passed to the
//! builders that need it; there is no process-wide mapping state.

mod table;

use std::fmt;

use layered_annotations::AnnotationType;
use serde::{Deserialize, Serialize};

pub use table::{MappingTable, FALLBACK_KEY};

use crate::errors::MappingError;

/// Resolves raw tagger tags to annotation types.
pub trait MappingProvider: Send + Sync {
    /// Name used in warnings and errors.
    fn name(&self) -> &str;

    /// The most generic type this provider produces.
    fn base_type(&self) -> AnnotationType;

    fn resolve_tag(&self, tag: &str) -> Result<AnnotationType, MappingError>;
}

/// What to do with a record whose tag the provider cannot resolve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnmappedTagPolicy {
    /// Drop the record.
    #[default]
    Skip,
    /// Keep the record, typed with the provider's base type.
    Fallback,
}

/// A resolved tag with its coarse class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTag {
    pub annotation_type: AnnotationType,
    /// `NOUN` for `POS_NOUN`; `None` for types without a coarse class
    pub coarse: Option<String>,
}

impl ResolvedTag {
    const COARSE_PREFIX: &'static str = "POS_";

    pub fn new(annotation_type: AnnotationType) -> Self {
        let coarse = annotation_type
            .name()
            .strip_prefix(Self::COARSE_PREFIX)
            .filter(|class| !class.is_empty())
            .map(str::to_string);
        Self {
            annotation_type,
            coarse,
        }
    }
}

pub struct TagMapper {
    provider: Box<dyn MappingProvider>,
    policy: UnmappedTagPolicy,
}

impl fmt::Debug for TagMapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TagMapper")
            .field("provider", &self.provider.name())
            .field("policy", &self.policy)
            .finish()
    }
}

impl TagMapper {
    pub fn new(provider: impl MappingProvider + 'static, policy: UnmappedTagPolicy) -> Self {
        Self {
            provider: Box::new(provider),
            policy,
        }
    }

    pub fn name(&self) -> &str {
        self.provider.name()
    }

    /// Resolve a tag and derive its coarse class.
    pub fn resolve(&self, tag: &str) -> Result<ResolvedTag, MappingError> {
        self.provider.resolve_tag(tag).map(ResolvedTag::new)
    }

    /// Replacement for an unresolvable tag under the configured policy.
    pub fn fallback(&self) -> Option<ResolvedTag> {
        match self.policy {
            UnmappedTagPolicy::Skip => None,
            UnmappedTagPolicy::Fallback => Some(ResolvedTag::new(self.provider.base_type())),
        }
    }
}
