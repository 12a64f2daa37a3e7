use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::MergeResult;

/// One response of the batched sentence tagger.
///
/// A document is tagged in batches, so a merge consumes a sequence of these;
/// every response carries one result per document sentence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlairResponse {
    pub results: Vec<FlairSentence>,
}

impl FlairResponse {
    /// Convert an already-parsed list of responses.
    pub fn batch_from_value(value: Value) -> MergeResult<Vec<FlairResponse>> {
        Ok(serde_json::from_value(value)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlairSentence {
    /// The sentence text as the tagger received it
    pub text: String,
    pub spans: Vec<FlairSpan>,
}

/// A tagged span; `begin`/`end` are relative to the sentence start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlairSpan {
    pub begin: usize,
    pub end: usize,
    #[serde(default)]
    pub text: String,
    pub labels: Vec<FlairLabel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlairLabel {
    pub value: String,
    pub score: f64,
}
