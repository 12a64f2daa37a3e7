//! Tag mapping tables: built-in tag sets and TOML-loaded tables.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use layered_annotations::AnnotationType;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::MappingProvider;
use crate::errors::{ConfigError, MappingError};

/// Key of a table's catch-all entry.
pub const FALLBACK_KEY: &str = "*";

/// A tag → annotation type table.
///
/// ```toml
/// name = "custom"
/// base_type = "POS"
///
/// [tags]
/// NN = "POS_NOUN"
/// "*" = "POS"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingTable {
    pub name: String,
    /// Most generic type of the table, used by the `Fallback` policy
    pub base_type: String,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl MappingTable {
    pub fn new(name: impl Into<String>, base_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_type: base_type.into(),
            tags: BTreeMap::new(),
        }
    }

    /// Add or replace one entry.
    pub fn with_tag(mut self, tag: impl Into<String>, target: impl Into<String>) -> Self {
        self.tags.insert(tag.into(), target.into());
        self
    }

    fn from_pairs(name: &str, base_type: &str, pairs: &[(&str, &str)]) -> Self {
        Self {
            name: name.to_string(),
            base_type: base_type.to_string(),
            tags: pairs
                .iter()
                .map(|(tag, target)| (tag.to_string(), target.to_string()))
                .collect(),
        }
    }

    /// Load a table from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// A built-in table by name: `ptb`, `stts`, `universal` or `biofid`.
    pub fn builtin(name: &str) -> Result<&'static MappingTable, ConfigError> {
        match name {
            "ptb" => Ok(&*PTB),
            "stts" => Ok(&*STTS),
            "universal" => Ok(&*UNIVERSAL),
            "biofid" => Ok(&*BIOFID),
            other => Err(ConfigError::UnknownTable(other.to_string())),
        }
    }

    /// Default POS table for a document language.
    pub fn for_language(language: Option<&str>) -> &'static MappingTable {
        match language {
            Some("en") => &*PTB,
            Some("de") => &*STTS,
            _ => &*UNIVERSAL,
        }
    }
}

impl MappingProvider for MappingTable {
    fn name(&self) -> &str {
        &self.name
    }

    fn base_type(&self) -> AnnotationType {
        AnnotationType::new(self.base_type.as_str())
    }

    fn resolve_tag(&self, tag: &str) -> Result<AnnotationType, MappingError> {
        self.tags
            .get(tag)
            .or_else(|| self.tags.get(FALLBACK_KEY))
            .map(|target| AnnotationType::new(target.as_str()))
            .ok_or_else(|| MappingError::Unmapped {
                tag: tag.to_string(),
                table: self.name.clone(),
            })
    }
}

static PTB: Lazy<MappingTable> = Lazy::new(|| {
    MappingTable::from_pairs(
        "ptb",
        "POS",
        &[
            ("CC", "POS_CONJ"),
            ("CD", "POS_NUM"),
            ("DT", "POS_DET"),
            ("EX", "POS_PRON"),
            ("FW", "POS_X"),
            ("IN", "POS_ADP"),
            ("JJ", "POS_ADJ"),
            ("JJR", "POS_ADJ"),
            ("JJS", "POS_ADJ"),
            ("LS", "POS_X"),
            ("MD", "POS_VERB"),
            ("NN", "POS_NOUN"),
            ("NNS", "POS_NOUN"),
            ("NNP", "POS_PROPN"),
            ("NNPS", "POS_PROPN"),
            ("PDT", "POS_DET"),
            ("POS", "POS_PART"),
            ("PRP", "POS_PRON"),
            ("PRP$", "POS_PRON"),
            ("RB", "POS_ADV"),
            ("RBR", "POS_ADV"),
            ("RBS", "POS_ADV"),
            ("RP", "POS_PART"),
            ("SYM", "POS_SYM"),
            ("TO", "POS_PART"),
            ("UH", "POS_INTJ"),
            ("VB", "POS_VERB"),
            ("VBD", "POS_VERB"),
            ("VBG", "POS_VERB"),
            ("VBN", "POS_VERB"),
            ("VBP", "POS_VERB"),
            ("VBZ", "POS_VERB"),
            ("WDT", "POS_DET"),
            ("WP", "POS_PRON"),
            ("WP$", "POS_PRON"),
            ("WRB", "POS_ADV"),
            (".", "POS_PUNCT"),
            (",", "POS_PUNCT"),
            (":", "POS_PUNCT"),
            ("``", "POS_PUNCT"),
            ("''", "POS_PUNCT"),
            ("-LRB-", "POS_PUNCT"),
            ("-RRB-", "POS_PUNCT"),
            ("HYPH", "POS_PUNCT"),
            ("NFP", "POS_PUNCT"),
            ("$", "POS_SYM"),
            ("#", "POS_SYM"),
            ("ADD", "POS_X"),
            ("AFX", "POS_ADJ"),
            ("XX", "POS_X"),
            ("_SP", "POS_SPACE"),
            (FALLBACK_KEY, "POS"),
        ],
    )
});

static STTS: Lazy<MappingTable> = Lazy::new(|| {
    MappingTable::from_pairs(
        "stts",
        "POS",
        &[
            ("ADJA", "POS_ADJ"),
            ("ADJD", "POS_ADJ"),
            ("ADV", "POS_ADV"),
            ("APPR", "POS_ADP"),
            ("APPRART", "POS_ADP"),
            ("APPO", "POS_ADP"),
            ("APZR", "POS_ADP"),
            ("ART", "POS_DET"),
            ("CARD", "POS_NUM"),
            ("FM", "POS_X"),
            ("ITJ", "POS_INTJ"),
            ("KOUI", "POS_CONJ"),
            ("KOUS", "POS_CONJ"),
            ("KON", "POS_CONJ"),
            ("KOKOM", "POS_CONJ"),
            ("NN", "POS_NOUN"),
            ("NE", "POS_PROPN"),
            ("PDS", "POS_PRON"),
            ("PDAT", "POS_PRON"),
            ("PIS", "POS_PRON"),
            ("PIAT", "POS_PRON"),
            ("PIDAT", "POS_PRON"),
            ("PPER", "POS_PRON"),
            ("PPOSS", "POS_PRON"),
            ("PPOSAT", "POS_PRON"),
            ("PRELS", "POS_PRON"),
            ("PRELAT", "POS_PRON"),
            ("PRF", "POS_PRON"),
            ("PWS", "POS_PRON"),
            ("PWAT", "POS_PRON"),
            ("PWAV", "POS_PRON"),
            ("PAV", "POS_PRON"),
            ("PROAV", "POS_PRON"),
            ("PTKZU", "POS_PART"),
            ("PTKNEG", "POS_PART"),
            ("PTKVZ", "POS_PART"),
            ("PTKANT", "POS_PART"),
            ("PTKA", "POS_PART"),
            ("TRUNC", "POS_X"),
            ("VVFIN", "POS_VERB"),
            ("VVIMP", "POS_VERB"),
            ("VVINF", "POS_VERB"),
            ("VVIZU", "POS_VERB"),
            ("VVPP", "POS_VERB"),
            ("VAFIN", "POS_VERB"),
            ("VAIMP", "POS_VERB"),
            ("VAINF", "POS_VERB"),
            ("VAPP", "POS_VERB"),
            ("VMFIN", "POS_VERB"),
            ("VMINF", "POS_VERB"),
            ("VMPP", "POS_VERB"),
            ("XY", "POS_X"),
            ("$,", "POS_PUNCT"),
            ("$.", "POS_PUNCT"),
            ("$(", "POS_PUNCT"),
            ("_SP", "POS_SPACE"),
            (FALLBACK_KEY, "POS"),
        ],
    )
});

static UNIVERSAL: Lazy<MappingTable> = Lazy::new(|| {
    MappingTable::from_pairs(
        "universal",
        "POS",
        &[
            ("ADJ", "POS_ADJ"),
            ("ADP", "POS_ADP"),
            ("ADV", "POS_ADV"),
            ("AUX", "POS_AUX"),
            ("CCONJ", "POS_CONJ"),
            ("CONJ", "POS_CONJ"),
            ("DET", "POS_DET"),
            ("INTJ", "POS_INTJ"),
            ("NOUN", "POS_NOUN"),
            ("NUM", "POS_NUM"),
            ("PART", "POS_PART"),
            ("PRON", "POS_PRON"),
            ("PROPN", "POS_PROPN"),
            ("PUNCT", "POS_PUNCT"),
            ("SCONJ", "POS_CONJ"),
            ("SPACE", "POS_SPACE"),
            ("SYM", "POS_SYM"),
            ("VERB", "POS_VERB"),
            ("X", "POS_X"),
            (FALLBACK_KEY, "POS"),
        ],
    )
});

static BIOFID: Lazy<MappingTable> = Lazy::new(|| {
    MappingTable::from_pairs(
        "biofid",
        AnnotationType::NAMED_ENTITY,
        &[
            ("Taxon", "Taxon"),
            ("Habitat", "Habitat"),
            ("Location", "Location"),
            ("LOC", "Location"),
            ("Person", "Person"),
            ("PER", "Person"),
            ("Organization", "Organization"),
            ("ORG", "Organization"),
            ("Time", "Time"),
            ("Reproduction", "Reproduction"),
            (FALLBACK_KEY, AnnotationType::NAMED_ENTITY),
        ],
    )
});

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_builtin_lookup() {
        let stts = MappingTable::builtin("stts").unwrap();
        assert_eq!(stts.resolve_tag("NN").unwrap().name(), "POS_NOUN");
        assert_eq!(stts.resolve_tag("VAFIN").unwrap().name(), "POS_VERB");
        // catch-all entry
        assert_eq!(stts.resolve_tag("UNKNOWN").unwrap().name(), "POS");

        assert!(matches!(
            MappingTable::builtin("brown"),
            Err(ConfigError::UnknownTable(name)) if name == "brown"
        ));
    }

    #[test]
    fn test_language_defaults() {
        assert_eq!(MappingTable::for_language(Some("en")).name, "ptb");
        assert_eq!(MappingTable::for_language(Some("de")).name, "stts");
        assert_eq!(MappingTable::for_language(Some("fr")).name, "universal");
        assert_eq!(MappingTable::for_language(None).name, "universal");
    }

    #[test]
    fn test_table_without_fallback_reports_unmapped() {
        let table = MappingTable::new("tiny", "POS").with_tag("NN", "POS_NOUN");
        assert_eq!(
            table.resolve_tag("VB"),
            Err(MappingError::Unmapped {
                tag: "VB".to_string(),
                table: "tiny".to_string(),
            })
        );
    }

    #[test]
    fn test_load_from_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
name = "custom"
base_type = "POS"

[tags]
NN = "POS_NOUN"
"*" = "POS"
"#
        )
        .unwrap();

        let table = MappingTable::load(file.path()).unwrap();
        assert_eq!(table.name, "custom");
        assert_eq!(table.resolve_tag("NN").unwrap().name(), "POS_NOUN");
        assert_eq!(table.resolve_tag("XY").unwrap().name(), "POS");
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(matches!(
            MappingTable::load(&missing),
            Err(ConfigError::Read { .. })
        ));

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "name = ").unwrap();
        assert!(matches!(
            MappingTable::load(&broken),
            Err(ConfigError::Parse { .. })
        ));
    }
}
