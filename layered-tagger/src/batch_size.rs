//! Batch size for the batched sentence tagger.
//!
//! The size travels as a metadata record on the document, written before the
//! request is built and read back when building it.

use layered_annotations::AnnotatedDocument;
use tracing::warn;

/// Metadata key of the batch size record.
pub const BATCH_SIZE_KEY: &str = "biofid_flair.dynamic_configuration.batch_size";

pub const DEFAULT_BATCH_SIZE: usize = 16;
pub const MAX_BATCH_SIZE: usize = 128;

pub struct BatchSizePolicy;

impl BatchSizePolicy {
    /// `0` means unset and becomes the default; anything above the ceiling is capped.
    pub fn clamp(requested: usize) -> usize {
        match requested {
            0 => DEFAULT_BATCH_SIZE,
            n if n > MAX_BATCH_SIZE => MAX_BATCH_SIZE,
            n => n,
        }
    }
}

/// Record the clamped batch size on the document and return it.
pub fn set_batch_size(doc: &mut AnnotatedDocument, requested: usize) -> usize {
    let batch_size = BatchSizePolicy::clamp(requested);
    doc.index_mut()
        .add_metadata(BATCH_SIZE_KEY, batch_size.to_string());
    batch_size
}

/// Batch size recorded on the document; the last record wins.
pub fn effective_batch_size(doc: &AnnotatedDocument) -> usize {
    let Some(field) = doc
        .index()
        .metadata()
        .iter()
        .rev()
        .find(|field| field.key.trim() == BATCH_SIZE_KEY)
    else {
        return DEFAULT_BATCH_SIZE;
    };

    match field.value.trim().parse::<usize>() {
        Ok(requested) => BatchSizePolicy::clamp(requested),
        Err(err) => {
            warn!(
                value = %field.value,
                error = %err,
                "unparsable batch size, using default {DEFAULT_BATCH_SIZE}"
            );
            DEFAULT_BATCH_SIZE
        }
    }
}
