//! Learning resource catalog.
//!
//! The catalog maps a skill name to an ordered list of learning resources.
//! It is loaded once (from TOML, JSON, or the built-in default) and is
//! read-only afterwards; the recommendation engine receives it by value.

use serde::Deserialize;
use skillbridge_model::{Resource, ResourceCost, SkillKey};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

const BUILTIN_CATALOG: &str = include_str!("../data/default_catalog.toml");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid TOML catalog: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid JSON catalog: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unsupported catalog format: {0}")]
    UnsupportedFormat(String),
    #[error("Catalog entry has an empty skill name")]
    EmptySkillName,
}

/// Trait for anything that can answer "which resources teach this skill".
pub trait ResourceLookup {
    /// Resources for a skill in recommended order, `None` on a miss.
    fn resources_for(&self, skill: &str) -> Option<&[Resource]>;
}

/// Resources for one skill.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    /// Skill name as spelled in the catalog
    pub skill: String,
    pub resources: Vec<Resource>,
}

/// Immutable skill → resources mapping.
#[derive(Debug, Clone, Default)]
pub struct ResourceCatalog {
    entries: HashMap<SkillKey, CatalogEntry>,
}

impl ResourceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the catalog compiled into the binary.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    /// Add or replace the resources for a skill.
    pub fn insert(
        &mut self,
        skill: impl Into<String>,
        resources: Vec<Resource>,
    ) -> Result<(), CatalogError> {
        let skill = skill.into();
        let key = SkillKey::new(&skill);
        if key.is_blank() {
            return Err(CatalogError::EmptySkillName);
        }

        let entry = CatalogEntry {
            skill: skill.trim().to_string(),
            resources,
        };
        if let Some(previous) = self.entries.insert(key, entry) {
            warn!(skill = %previous.skill, "Duplicate catalog entry, keeping the later one");
        }
        Ok(())
    }

    /// Builder form of [`insert`](Self::insert); blank skill names are skipped.
    pub fn with_skill(mut self, skill: impl Into<String>, resources: Vec<Resource>) -> Self {
        if let Err(e) = self.insert(skill, resources) {
            warn!(error = %e, "Skipping catalog entry");
        }
        self
    }

    pub fn entry(&self, skill: &str) -> Option<&CatalogEntry> {
        self.entries.get(&SkillKey::new(skill))
    }

    /// Skill names in the catalog, sorted.
    pub fn skills(&self) -> Vec<&str> {
        let mut skills: Vec<&str> = self.entries.values().map(|e| e.skill.as_str()).collect();
        skills.sort_unstable();
        skills
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load a catalog file, choosing the format by extension.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let extension = path.extension().and_then(|s| s.to_str()).unwrap_or("<none>");
        let catalog = if extension.eq_ignore_ascii_case("toml") {
            Self::from_toml_str(&content)?
        } else if extension.eq_ignore_ascii_case("json") {
            Self::from_json_str(&content)?
        } else {
            return Err(CatalogError::UnsupportedFormat(extension.to_string()));
        };

        info!(
            skills = catalog.len(),
            path = %path.display(),
            "Loaded resource catalog"
        );
        Ok(catalog)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(content)?;
        Self::from_file(file)
    }

    pub fn from_json_str(content: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(content)?;
        Self::from_file(file)
    }

    fn from_file(file: CatalogFile) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for skill in file.skills {
            let resources = skill.resources.into_iter().map(Resource::from).collect();
            catalog.insert(skill.name, resources)?;
        }
        debug!(skills = catalog.len(), "Parsed resource catalog");
        Ok(catalog)
    }
}

impl ResourceLookup for ResourceCatalog {
    fn resources_for(&self, skill: &str) -> Option<&[Resource]> {
        self.entry(skill).map(|e| e.resources.as_slice())
    }
}

/// On-disk catalog shape, shared by the TOML and JSON formats.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    skills: Vec<SkillSection>,
}

#[derive(Debug, Deserialize)]
struct SkillSection {
    name: String,
    #[serde(default)]
    resources: Vec<ResourceSection>,
}

#[derive(Debug, Deserialize)]
struct ResourceSection {
    title: String,
    #[serde(default)]
    provider: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    hours: f64,
    #[serde(default)]
    cost: ResourceCost,
}

impl From<ResourceSection> for Resource {
    fn from(section: ResourceSection) -> Self {
        Resource {
            title: section.title,
            provider: section.provider,
            url: section.url,
            estimated_hours: section.hours,
            cost: section.cost,
        }
    }
}
