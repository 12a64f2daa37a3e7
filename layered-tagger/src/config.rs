//! Merge configuration loaded from TOML.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::arbiter::ConflictPolicy;
use crate::batch_size::DEFAULT_BATCH_SIZE;
use crate::errors::ConfigError;
use crate::tag_mapper::{MappingTable, TagMapper, UnmappedTagPolicy};

/// Settings shared by both merge pipelines.
///
/// ```toml
/// language = "de"
/// unmapped_tag = "fallback"
/// conflict = "flag"
/// batch_size = 32
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Language used to pick the default POS table (`en`, `de`, ...)
    pub language: Option<String>,
    /// Name of a built-in POS table, overriding the language default
    pub variant: Option<String>,
    /// POS table file, overriding `variant` and `language`
    pub pos_mapping_location: Option<PathBuf>,
    /// Entity table file for the batched sentence tagger
    pub entity_mapping_location: Option<PathBuf>,
    pub unmapped_tag: UnmappedTagPolicy,
    pub conflict: ConflictPolicy,
    /// Arbitrate the multi-layer tagger's entities against existing taxa
    pub arbitrate_tagger_entities: bool,
    /// Requested batch size for the batched sentence tagger
    pub batch_size: usize,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            language: None,
            variant: None,
            pos_mapping_location: None,
            entity_mapping_location: None,
            unmapped_tag: UnmappedTagPolicy::default(),
            conflict: ConflictPolicy::default(),
            arbitrate_tagger_entities: false,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl MergeConfig {
    /// Load from a TOML file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// POS mapper: explicit file, else named built-in, else language default.
    pub fn pos_mapper(&self) -> Result<TagMapper, ConfigError> {
        let table = if let Some(path) = &self.pos_mapping_location {
            MappingTable::load(path)?
        } else if let Some(variant) = &self.variant {
            MappingTable::builtin(variant)?.clone()
        } else {
            MappingTable::for_language(self.language.as_deref()).clone()
        };
        Ok(TagMapper::new(table, self.unmapped_tag))
    }

    /// Entity mapper: explicit file, else the built-in `biofid` table.
    pub fn entity_mapper(&self) -> Result<TagMapper, ConfigError> {
        let table = match &self.entity_mapping_location {
            Some(path) => MappingTable::load(path)?,
            None => MappingTable::builtin("biofid")?.clone(),
        };
        Ok(TagMapper::new(table, self.unmapped_tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = MergeConfig::load(&dir.path().join("merge.toml")).unwrap();
        assert_eq!(config, MergeConfig::default());
        assert_eq!(config.batch_size, 16);
        assert_eq!(config.unmapped_tag, UnmappedTagPolicy::Skip);
        assert_eq!(config.conflict, ConflictPolicy::Flag);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config = MergeConfig::from_toml_str(
            r#"
language = "de"
unmapped_tag = "fallback"
conflict = "drop"
"#,
        )
        .unwrap();
        assert_eq!(config.language.as_deref(), Some("de"));
        assert_eq!(config.unmapped_tag, UnmappedTagPolicy::Fallback);
        assert_eq!(config.conflict, ConflictPolicy::Drop);
        assert!(!config.arbitrate_tagger_entities);
        assert_eq!(config.batch_size, 16);
    }

    #[test]
    fn test_unparsable_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("merge.toml");
        std::fs::write(&path, "conflict = \"maybe\"").unwrap();

        let err = MergeConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("merge.toml"));
    }

    #[test]
    fn test_pos_mapper_precedence() {
        let mut config = MergeConfig {
            language: Some("de".to_string()),
            ..Default::default()
        };
        assert_eq!(config.pos_mapper().unwrap().name(), "stts");

        config.variant = Some("universal".to_string());
        assert_eq!(config.pos_mapper().unwrap().name(), "universal");

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "name = \"custom\"\nbase_type = \"POS\"\n").unwrap();
        config.pos_mapping_location = Some(path);
        assert_eq!(config.pos_mapper().unwrap().name(), "custom");

        config.pos_mapping_location = None;
        config.variant = Some("brown".to_string());
        assert!(matches!(
            config.pos_mapper(),
            Err(ConfigError::UnknownTable(_))
        ));
    }

    #[test]
    fn test_entity_mapper_defaults_to_biofid() {
        let mapper = MergeConfig::default().entity_mapper().unwrap();
        assert_eq!(mapper.name(), "biofid");
        assert_eq!(
            mapper.resolve("Taxon").unwrap().annotation_type.name(),
            "Taxon"
        );
    }
}
