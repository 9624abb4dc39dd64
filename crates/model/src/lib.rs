//! Core domain model for SkillBridge candidate/job matching.
//!
//! This crate defines the fundamental types used throughout the system:
//! - `CandidateProfile`: The structured profile produced by the document parser
//! - `JobRequirements`: The extracted requirements of one job posting
//! - `ScoreBreakdown`, `GapAnalysisResult`, `LearningPlan`: Engine outputs
//! - `Resource`: One learning resource from the catalog

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Self-reported proficiency for a skill.
///
/// Deserialization never fails: unrecognized strings clamp to `Beginner`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Proficiency {
    /// Default for unknown input
    #[default]
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl Proficiency {
    /// Contribution of a held skill to the skill match score.
    pub fn weight(&self) -> f64 {
        match self {
            Self::Beginner => 0.4,
            Self::Intermediate => 0.6,
            Self::Advanced => 0.8,
            Self::Expert => 1.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
            Self::Expert => "expert",
        }
    }
}

impl From<&str> for Proficiency {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "intermediate" => Self::Intermediate,
            "advanced" => Self::Advanced,
            "expert" => Self::Expert,
            _ => Self::Beginner,
        }
    }
}

impl From<String> for Proficiency {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl fmt::Display for Proficiency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Case-insensitive lookup key for a skill name.
///
/// Every engine compares skills through this key, so "present" means the
/// same thing to scoring, gap analysis and the catalog.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SkillKey(String);

impl SkillKey {
    /// Trim and lowercase a skill name.
    pub fn new(name: &str) -> Self {
        Self(name.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Blank names never identify a skill.
    pub fn is_blank(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for SkillKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One skill held by a candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateSkill {
    pub name: String,

    #[serde(default)]
    pub proficiency: Proficiency,
}

impl CandidateSkill {
    pub fn new(name: impl Into<String>, proficiency: Proficiency) -> Self {
        Self {
            name: name.into(),
            proficiency,
        }
    }

    pub fn key(&self) -> SkillKey {
        SkillKey::new(&self.name)
    }
}

/// A past or current position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkHistoryEntry {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub employer: String,

    /// Duration in years (fractional allowed)
    #[serde(default)]
    pub years: f64,
}

impl WorkHistoryEntry {
    pub fn new(title: impl Into<String>, employer: impl Into<String>, years: f64) -> Self {
        Self {
            title: title.into(),
            employer: employer.into(),
            years,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    #[serde(default)]
    pub institution: String,

    #[serde(default)]
    pub degree: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graduation_year: Option<u16>,
}

/// A candidate's self-reported state, as produced by the document parser.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateProfile {
    /// Skills; duplicate names (case-insensitive) resolve to the last entry
    #[serde(default)]
    pub skills: Vec<CandidateSkill>,

    #[serde(default)]
    pub work_history: Vec<WorkHistoryEntry>,

    #[serde(default)]
    pub education: Vec<EducationEntry>,

    /// Explicit total experience; derived from `work_history` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub years_of_experience: Option<f64>,
}

impl CandidateProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a skill, replacing any existing entry with the same name.
    pub fn with_skill(mut self, name: impl Into<String>, proficiency: Proficiency) -> Self {
        let skill = CandidateSkill::new(name, proficiency);
        let key = skill.key();
        self.skills.retain(|s| s.key() != key);
        self.skills.push(skill);
        self
    }

    pub fn with_years(mut self, years: f64) -> Self {
        self.years_of_experience = Some(years);
        self
    }

    pub fn with_work(mut self, entry: WorkHistoryEntry) -> Self {
        self.work_history.push(entry);
        self
    }

    /// Years of experience used for scoring, never negative or NaN.
    pub fn effective_years(&self) -> f64 {
        let years = match self.years_of_experience {
            Some(years) => years,
            None => self
                .work_history
                .iter()
                .map(|entry| non_negative(entry.years))
                .sum(),
        };
        non_negative(years)
    }
}

/// Requirements extracted from one job posting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRequirements {
    /// Ordered by importance (earlier = more important)
    #[serde(default)]
    pub required_skills: Vec<String>,

    #[serde(default)]
    pub preferred_skills: Vec<String>,

    /// 0 means no experience requirement
    #[serde(default)]
    pub min_years_experience: f64,

    /// Optional per-skill minimum proficiency for required skills
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub minimum_proficiency: BTreeMap<String, Proficiency>,
}

impl JobRequirements {
    pub fn new<I, S>(required: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            required_skills: required.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn with_preferred<I, S>(mut self, preferred: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.preferred_skills = preferred.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_min_years(mut self, years: f64) -> Self {
        self.min_years_experience = years;
        self
    }

    pub fn with_minimum_proficiency(
        mut self,
        skill: impl Into<String>,
        level: Proficiency,
    ) -> Self {
        self.minimum_proficiency.insert(skill.into(), level);
        self
    }

    /// Minimum years, with negative or NaN input treated as "no requirement".
    pub fn effective_min_years(&self) -> f64 {
        non_negative(self.min_years_experience)
    }

    /// Look up an explicit minimum proficiency by normalized skill name.
    pub fn minimum_for(&self, key: &SkillKey) -> Option<Proficiency> {
        self.minimum_proficiency
            .iter()
            .find(|(name, _)| SkillKey::new(name) == *key)
            .map(|(_, level)| *level)
    }
}

/// Result of one scoring call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    /// 0.0 - 1.0
    pub skill_match_score: f64,

    /// 0.0 - 1.0
    pub experience_match_score: f64,

    /// 0.0 - 100.0
    pub overall_score: f64,

    /// Required skills the candidate holds, in `required_skills` order
    pub matched_required_skills: Vec<String>,
}

/// Severity tier of a skill gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GapCategory {
    /// A required skill is missing
    Critical,
    /// Secondary gap for a candidate who already misses required skills
    Important,
    /// A preferred skill is missing
    NiceToHave,
}

impl GapCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::Important => "Important",
            Self::NiceToHave => "Nice to Have",
        }
    }
}

/// One missing or insufficient skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillGap {
    pub skill_name: String,
    pub category: GapCategory,
    /// The candidate holds the skill, below the level the job asks for
    #[serde(default)]
    pub has_partial_proficiency: bool,
}

impl SkillGap {
    pub fn new(skill_name: impl Into<String>, category: GapCategory) -> Self {
        Self {
            skill_name: skill_name.into(),
            category,
            has_partial_proficiency: false,
        }
    }

    pub fn partial(skill_name: impl Into<String>, category: GapCategory) -> Self {
        Self {
            has_partial_proficiency: true,
            ..Self::new(skill_name, category)
        }
    }
}

/// All gaps for one profile/job pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GapAnalysisResult {
    /// Critical first, then important, then nice-to-have
    pub gaps: Vec<SkillGap>,
    pub total_gaps: usize,
    pub critical_gap_count: usize,
    /// 0 - 100
    pub readiness_score: u32,
}

impl GapAnalysisResult {
    pub fn is_empty(&self) -> bool {
        self.gaps.is_empty()
    }
}

/// Scheduling constraints supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    /// Advisory; never used to truncate a plan
    #[serde(default = "default_weekly_hours")]
    pub weekly_hours_available: f64,

    #[serde(default)]
    pub prefer_free: bool,
}

fn default_weekly_hours() -> f64 {
    10.0
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            weekly_hours_available: default_weekly_hours(),
            prefer_free: false,
        }
    }
}

impl UserPreferences {
    pub fn new(weekly_hours_available: f64, prefer_free: bool) -> Self {
        Self {
            weekly_hours_available,
            prefer_free,
        }
    }
}

/// Whether a resource costs money.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceCost {
    Free,
    #[default]
    Paid,
}

/// One learning resource from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Estimated completion time in hours
    #[serde(default)]
    pub estimated_hours: f64,

    #[serde(default)]
    pub cost: ResourceCost,
}

impl Resource {
    pub fn new(title: impl Into<String>, estimated_hours: f64, cost: ResourceCost) -> Self {
        Self {
            title: title.into(),
            provider: None,
            url: None,
            estimated_hours,
            cost,
        }
    }

    pub fn free(title: impl Into<String>, estimated_hours: f64) -> Self {
        Self::new(title, estimated_hours, ResourceCost::Free)
    }

    pub fn paid(title: impl Into<String>, estimated_hours: f64) -> Self {
        Self::new(title, estimated_hours, ResourceCost::Paid)
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn is_free(&self) -> bool {
        self.cost == ResourceCost::Free
    }

    /// Hours used for planning, never negative or NaN.
    pub fn effective_hours(&self) -> f64 {
        non_negative(self.estimated_hours)
    }
}

/// One unit of a learning plan, addressing a single skill gap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningPhase {
    pub skill_name: String,
    pub category: GapCategory,
    pub resources: Vec<Resource>,
    pub estimated_hours: f64,
}

/// Output of the recommendation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningPlan {
    /// Same order as the gaps they address
    pub phases: Vec<LearningPhase>,

    pub total_estimated_hours: f64,

    /// Gap skills the catalog had no resources for
    #[serde(default)]
    pub uncovered_skills: Vec<String>,

    pub weekly_hours_available: f64,
}

impl LearningPlan {
    pub fn empty(weekly_hours_available: f64) -> Self {
        Self {
            phases: Vec::new(),
            total_estimated_hours: 0.0,
            uncovered_skills: Vec::new(),
            weekly_hours_available,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// Calendar weeks at the advertised weekly pace.
    ///
    /// `None` when the weekly figure is not a positive number.
    pub fn estimated_weeks(&self) -> Option<f64> {
        let weekly = self.weekly_hours_available;
        if weekly.is_finite() && weekly > 0.0 {
            Some(self.total_estimated_hours / weekly)
        } else {
            None
        }
    }
}

/// Clamp negative, NaN and infinite values to zero.
fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
