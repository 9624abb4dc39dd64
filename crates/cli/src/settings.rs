//! Engine settings loaded from an optional TOML file.

use anyhow::{Context, Result};
use serde::Deserialize;
use skillbridge_gaps::GapPenalties;
use skillbridge_recommend::RecommendConfig;
use skillbridge_scoring::ScoreWeights;
use std::path::Path;

/// Tunables for all three engines. Every section and field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub scoring: ScoreWeights,
    pub penalties: GapPenalties,
    pub recommend: RecommendConfig,
}

impl Settings {
    /// Load settings from `path`, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings {}", path.display()))?;
        let settings = Self::from_toml_str(&raw)
            .with_context(|| format!("failed to parse settings {}", path.display()))?;

        tracing::debug!(path = %path.display(), ?settings, "Loaded settings");
        Ok(settings)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }
}
