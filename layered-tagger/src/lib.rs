#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Merges the output of external linguistic taggers into a
//! [`layered_annotations`] document index.
//!
//! Two response shapes are supported:
//!
//! - the multi-layer tagger (sentences, tokens, POS, lemmas, morphology,
//!   dependencies, named entities and predicate-argument tuples), merged by
//!   [`MultiTagMerge`];
//! - the batched sentence tagger (scored entity spans per sentence), merged
//!   by [`FlairMerge`] with overlap arbitration against protected spans.
//!
//! Record-level problems never abort a merge; they are collected in the
//! returned [`MergeReport`] and logged through `tracing`.
//!
//! ## Modules
//!
//! - [`payload`] - Typed tagger responses
//! - [`tag_mapper`] - Tag set remapping
//! - [`builders`] - One builder per annotation layer
//! - [`arbiter`] - Overlap arbitration
//! - [`batch_size`] - Batch size side channel
//! - [`request`] - Request bodies
//! - [`config`] - TOML configuration

pub mod arbiter;
pub mod batch_size;
pub mod builders;
pub mod config;
mod errors;
mod merge;
pub mod payload;
mod report;
pub mod request;
pub mod tag_mapper;


pub use arbiter::{ConflictPolicy, OverlapArbiter, Verdict};
pub use batch_size::{effective_batch_size, set_batch_size, BatchSizePolicy, BATCH_SIZE_KEY};
pub use config::MergeConfig;
pub use errors::{ConfigError, MappingError, MergeError, MergeResult};
pub use merge::{FlairMerge, MultiTagMerge};
pub use report::{LayerName, MergeReport, MergeWarning};
pub use request::{FlairRequest, MultiTagRequest};
pub use tag_mapper::{MappingProvider, MappingTable, TagMapper, UnmappedTagPolicy};
