use serde::Deserialize;
use serde_json::{Map, Value};

use super::CharSpan;

/// Key of the predicate inside a raw tuple object.
pub const PREDICATE_KEY: &str = "pred";

/// One predicate with its role-labeled arguments.
///
/// The tagger sends tuples as flat objects (`{"pred": {..}, "ARG0": {..},
/// "sent_id": 3}`); object-valued keys other than `pred` are arguments and
/// scalar values are ignored. Arguments keep the tagger's key order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct PredicateArgumentTuple {
    pub predicate: CharSpan,
    pub arguments: Vec<RoleArgument>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleArgument {
    pub role: String,
    pub span: CharSpan,
}

impl TryFrom<Map<String, Value>> for PredicateArgumentTuple {
    type Error = String;

    fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
        let mut predicate = None;
        let mut arguments = Vec::new();

        for (key, value) in map {
            if !value.is_object() {
                continue;
            }
            let span: CharSpan = serde_json::from_value(value)
                .map_err(|e| format!("predicate-argument key {key:?}: {e}"))?;
            if key == PREDICATE_KEY {
                predicate = Some(span);
            } else {
                arguments.push(RoleArgument { role: key, span });
            }
        }

        let predicate = predicate
            .ok_or_else(|| format!("predicate-argument tuple has no {PREDICATE_KEY:?} object"))?;

        Ok(Self {
            predicate,
            arguments,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_object_keys_become_arguments_in_order() {
        let tuple: PredicateArgumentTuple = serde_json::from_value(json!({
            "ARG1": {"start_char": 10, "end_char": 15, "text": "seeds"},
            "pred": {"start_char": 6, "end_char": 9, "text": "ate"},
            "sent_id": 0,
            "ARG0": {"start_char": 0, "end_char": 5, "text": "Birds"}
        }))
        .unwrap();

        assert_eq!(tuple.predicate, CharSpan::new(6, 9));
        let roles: Vec<&str> = tuple.arguments.iter().map(|a| a.role.as_str()).collect();
        assert_eq!(roles, vec!["ARG1", "ARG0"]);
        assert_eq!(tuple.arguments[1].span, CharSpan::new(0, 5));
    }

    #[test]
    fn test_missing_predicate_is_rejected() {
        let err = serde_json::from_value::<PredicateArgumentTuple>(json!({
            "ARG0": {"start_char": 0, "end_char": 5}
        }))
        .unwrap_err();
        assert!(err.to_string().contains("no \"pred\" object"));
    }

    #[test]
    fn test_argument_without_offsets_is_rejected() {
        let err = serde_json::from_value::<PredicateArgumentTuple>(json!({
            "pred": {"start_char": 6, "end_char": 9},
            "ARG0": {"text": "Birds"}
        }))
        .unwrap_err();
        assert!(err.to_string().contains("\"ARG0\""));
    }
}
