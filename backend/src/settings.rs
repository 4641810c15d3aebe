//! # Mapping Settings
//!
//! Optional YAML file that overrides the built-in field lists and adds
//! per-entity field declarations without a rebuild.
//!
//! ## YAML Format
//!
//! ```yaml
//! builtin:
//!   date_fields: [createdAt, updatedAt, date]
//!   json_fields: [metadata]
//! entities:
//!   post:
//!     date_fields: [createdAt, updatedAt]
//!     json_fields: [mediaUrls, tags]
//! ```
//!
//! Both sections are optional. A missing `builtin` section keeps the standard
//! lists; an empty list switches that kind of implicit field off.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::domain::{
    BuiltinFields, MapperConfig, RecordMapper, STANDARD_DATE_FIELDS, STANDARD_JSON_FIELDS,
};
use crate::io::EntityKind;

/// Environment variable naming a settings file for the CLI.
pub const SETTINGS_ENV_VAR: &str = "SBB_MAPPING_SETTINGS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuiltinSettings {
    pub date_fields: Vec<String>,
    pub json_fields: Vec<String>,
}

impl Default for BuiltinSettings {
    fn default() -> Self {
        Self {
            date_fields: STANDARD_DATE_FIELDS.iter().map(|s| s.to_string()).collect(),
            json_fields: STANDARD_JSON_FIELDS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Date and JSON field declarations for one entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityFieldSettings {
    pub date_fields: Vec<String>,
    pub json_fields: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingSettings {
    pub builtin: BuiltinSettings,
    pub entities: BTreeMap<String, EntityFieldSettings>,
}

impl MappingSettings {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let settings: MappingSettings =
            serde_yaml::from_str(yaml).context("Failed to parse mapping settings")?;

        for name in settings.entities.keys() {
            if EntityKind::from_name(name).is_none() {
                warn!("Mapping settings declare fields for unknown entity '{}'", name);
            }
        }

        Ok(settings)
    }

    /// Load settings from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let yaml = fs::read_to_string(path)
            .with_context(|| format!("Failed to read mapping settings from {:?}", path))?;
        let settings = Self::from_yaml_str(&yaml)
            .with_context(|| format!("Invalid mapping settings in {:?}", path))?;

        info!(
            "Loaded mapping settings from {:?} ({} entity profiles)",
            path,
            settings.entities.len()
        );
        Ok(settings)
    }

    /// Load from `path` when given, otherwise fall back to the defaults.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                debug!("No mapping settings file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Save settings to a YAML file, writing to a temp file first and
    /// renaming it into place.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.exists() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory {:?}", parent))?;
            }
        }

        let yaml = serde_yaml::to_string(self).context("Failed to serialize mapping settings")?;

        let temp_path: PathBuf = path.with_extension("tmp");
        fs::write(&temp_path, yaml)
            .with_context(|| format!("Failed to write {:?}", temp_path))?;
        fs::rename(&temp_path, path)
            .with_context(|| format!("Failed to move settings into place at {:?}", path))?;

        debug!("Saved mapping settings to {:?}", path);
        Ok(())
    }

    pub fn builtin_fields(&self) -> BuiltinFields {
        BuiltinFields {
            date_fields: self.builtin.date_fields.iter().cloned().collect::<BTreeSet<_>>(),
            json_fields: self.builtin.json_fields.iter().cloned().collect::<BTreeSet<_>>(),
        }
    }

    pub fn record_mapper(&self) -> RecordMapper {
        RecordMapper::new(self.builtin_fields())
    }

    /// Field declarations for `entity`, if the settings carry a profile for it.
    pub fn entity_config(&self, entity: &str) -> Option<MapperConfig> {
        self.entities.get(entity).map(|fields| {
            MapperConfig::new()
                .with_date_fields(fields.date_fields.iter().cloned())
                .with_json_fields(fields.json_fields.iter().cloned())
        })
    }

    /// A settings document with a profile for every known entity, as a
    /// starting point for customisation.
    pub fn with_entity_defaults() -> Self {
        let entities = EntityKind::ALL
            .iter()
            .map(|kind| {
                let config = kind.profile().read_config;
                (
                    kind.name().to_string(),
                    EntityFieldSettings {
                        date_fields: config.date_fields.into_iter().collect(),
                        json_fields: config.json_fields.into_iter().collect(),
                    },
                )
            })
            .collect();

        Self {
            builtin: BuiltinSettings::default(),
            entities,
        }
    }
}
