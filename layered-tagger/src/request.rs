//! Request payloads for the external taggers.
//!
//! Transport is up to the caller; these are the bodies it sends.

use layered_annotations::AnnotatedDocument;
use serde::{Deserialize, Serialize};

use crate::batch_size::effective_batch_size;

/// Body for the multi-layer tagger: the whole document text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiTagRequest {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

impl MultiTagRequest {
    /// `None` for an empty document, which is never sent.
    pub fn from_document(doc: &AnnotatedDocument) -> Option<Self> {
        if doc.is_empty() {
            return None;
        }
        Some(Self {
            text: doc.text().to_string(),
            lang: doc.language().map(str::to_string),
        })
    }
}

/// Body for the batched sentence tagger: one entry per Sentence, in index order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlairRequest {
    pub sentences: Vec<String>,
    pub batch_size: usize,
}

impl FlairRequest {
    /// `None` for an empty document, which is never sent.
    ///
    /// The batch size is read from the document's metadata record.
    pub fn from_document(doc: &AnnotatedDocument) -> Option<Self> {
        if doc.is_empty() {
            return None;
        }
        let sentences = doc
            .index()
            .sentences()
            .iter()
            .filter_map(|sentence| doc.covered_text(sentence.span))
            .map(str::to_string)
            .collect();
        Some(Self {
            sentences,
            batch_size: effective_batch_size(doc),
        })
    }
}
