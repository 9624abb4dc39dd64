//! Learning plan generation.
//!
//! Turns the ordered gap set from `skillbridge-gaps` into a learning plan:
//! one phase per gap, each backed by a bounded prefix of the catalog's
//! resources for that skill. The catalog is injected at construction and
//! only read afterwards, so a `Recommender` can be shared across threads.

use serde::{Deserialize, Serialize};
use skillbridge_catalog::{ResourceCatalog, ResourceLookup};
use skillbridge_gaps::analyze;
use skillbridge_model::{
    CandidateProfile, GapAnalysisResult, JobRequirements, LearningPhase, LearningPlan, Resource,
    SkillGap, UserPreferences,
};
use std::sync::Arc;
use tracing::debug;

/// Configuration for resource selection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendConfig {
    /// Upper bound on resources per phase (at least one is always taken)
    pub max_resources_per_skill: usize,
    /// Stop adding resources once a phase reaches this many hours
    pub hours_budget_per_skill: f64,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            max_resources_per_skill: 3,
            hours_budget_per_skill: 40.0,
        }
    }
}

/// Builds learning plans from a resource catalog.
#[derive(Debug, Clone)]
pub struct Recommender<C = ResourceCatalog> {
    catalog: Arc<C>,
    config: RecommendConfig,
}

impl<C: ResourceLookup> Recommender<C> {
    pub fn new(catalog: C) -> Self {
        Self::from_shared(Arc::new(catalog))
    }

    /// Use a catalog already shared with other components.
    pub fn from_shared(catalog: Arc<C>) -> Self {
        Self {
            catalog,
            config: RecommendConfig::default(),
        }
    }

    pub fn with_config(mut self, config: RecommendConfig) -> Self {
        self.config = config;
        self
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Analyze gaps and plan learning for them.
    ///
    /// Uses the default gap analysis; penalties only move readiness, never
    /// gap categories.
    pub fn generate(
        &self,
        profile: &CandidateProfile,
        job: &JobRequirements,
        preferences: &UserPreferences,
    ) -> LearningPlan {
        let analysis = analyze(profile, job);
        self.plan_for(&analysis, preferences)
    }

    /// Plan learning for an existing gap analysis.
    ///
    /// Phases follow gap order. Gaps without catalog resources are listed in
    /// `uncovered_skills` instead of producing a phase.
    pub fn plan_for(
        &self,
        analysis: &GapAnalysisResult,
        preferences: &UserPreferences,
    ) -> LearningPlan {
        let mut plan = LearningPlan::empty(preferences.weekly_hours_available);

        for gap in &analysis.gaps {
            match self.build_phase(gap, preferences.prefer_free) {
                Some(phase) => plan.phases.push(phase),
                None => {
                    debug!(skill = %gap.skill_name, "No catalog resources for gap, skipping");
                    plan.uncovered_skills.push(gap.skill_name.clone());
                }
            }
        }

        plan.total_estimated_hours = plan
            .phases
            .iter()
            .fold(0.0, |total, phase| total + phase.estimated_hours);

        debug!(
            phases = plan.phases.len(),
            uncovered = plan.uncovered_skills.len(),
            total_hours = plan.total_estimated_hours,
            "Generated learning plan"
        );

        plan
    }

    fn build_phase(&self, gap: &SkillGap, prefer_free: bool) -> Option<LearningPhase> {
        let resources = self
            .catalog
            .resources_for(&gap.skill_name)
            .filter(|resources| !resources.is_empty())?;

        let candidates = candidate_resources(resources, prefer_free);
        let selected = select_resources(&candidates, &self.config);
        let estimated_hours = selected
            .iter()
            .fold(0.0, |total, resource| total + resource.effective_hours());

        Some(LearningPhase {
            skill_name: gap.skill_name.clone(),
            category: gap.category,
            resources: selected,
            estimated_hours,
        })
    }
}

/// Free resources when preferred and available, otherwise everything.
fn candidate_resources(resources: &[Resource], prefer_free: bool) -> Vec<&Resource> {
    if prefer_free {
        let free: Vec<&Resource> = resources.iter().filter(|r| r.is_free()).collect();
        if !free.is_empty() {
            return free;
        }
    }
    resources.iter().collect()
}

/// Take resources in catalog order until the hour budget or count cap is hit.
fn select_resources(candidates: &[&Resource], config: &RecommendConfig) -> Vec<Resource> {
    let max = config.max_resources_per_skill.max(1);
    let budget = if config.hours_budget_per_skill.is_finite() {
        config.hours_budget_per_skill.max(0.0)
    } else {
        RecommendConfig::default().hours_budget_per_skill
    };

    let mut selected = Vec::new();
    let mut hours = 0.0_f64;

    for resource in candidates {
        if selected.len() >= max || (!selected.is_empty() && hours >= budget) {
            break;
        }
        hours += resource.effective_hours();
        selected.push((*resource).clone());
    }

    selected
}
