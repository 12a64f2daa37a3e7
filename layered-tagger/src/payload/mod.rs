//! Typed shapes of tagger responses.
//!
//! Responses arrive already parsed as [`serde_json::Value`]; everything past
//! this module works on the typed records below.

mod flair;
mod multitag;
mod predicate;

use serde::{Deserialize, Serialize};

pub use flair::{FlairLabel, FlairResponse, FlairSentence, FlairSpan};
pub use multitag::{
    DependencyRecord, EntityRecord, LemmaRecord, MorphList, MorphRecord, MultiTagPayload,
    MultiTagResponse, PosRecord, SentenceRecord, TokenPosition, TokenRecord,
};
pub use predicate::{PredicateArgumentTuple, RoleArgument, PREDICATE_KEY};

/// `start_char`/`end_char` boundaries as reported for entity-like records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharSpan {
    pub start_char: usize,
    pub end_char: usize,
}

impl CharSpan {
    pub fn new(start_char: usize, end_char: usize) -> Self {
        Self {
            start_char,
            end_char,
        }
    }
}
