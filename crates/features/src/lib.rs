//! Skill matching features shared by every engine.
//!
//! Provides pure functions for deciding whether a candidate holds a skill:
//! - Skill name normalization
//! - Order-preserving deduplication of job skill lists
//! - A case-insensitive index over a candidate's skills
//!
//! Matching is exact normalized equality only. "JS" and "JavaScript" are
//! different skills.

use skillbridge_model::{CandidateProfile, JobRequirements, Proficiency, SkillKey};
use std::collections::{HashMap, HashSet};

/// Normalize a skill name for comparison.
pub fn normalize_skill_name(name: &str) -> String {
    SkillKey::new(name).as_str().to_string()
}

/// A job skill with its lookup key and the exact spelling the job used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedSkill {
    pub key: SkillKey,
    pub name: String,
}

/// Collapse duplicate skill names, keeping the first occurrence and its order.
///
/// Blank names are dropped.
pub fn dedup_skills(names: &[String]) -> Vec<NamedSkill> {
    let mut seen = HashSet::new();
    names
        .iter()
        .filter_map(|name| {
            let key = SkillKey::new(name);
            if key.is_blank() || !seen.insert(key.clone()) {
                return None;
            }
            Some(NamedSkill {
                key,
                name: name.clone(),
            })
        })
        .collect()
}

/// Job skill lists after normalization.
#[derive(Debug, Clone, Default)]
pub struct NormalizedJob {
    pub required: Vec<NamedSkill>,
    /// Preferred skills that are not also required
    pub preferred: Vec<NamedSkill>,
}

/// Normalize a job's skill lists.
pub fn normalize_job(job: &JobRequirements) -> NormalizedJob {
    let required = dedup_skills(&job.required_skills);
    let required_keys: HashSet<&SkillKey> = required.iter().map(|s| &s.key).collect();

    let preferred = dedup_skills(&job.preferred_skills)
        .into_iter()
        .filter(|skill| !required_keys.contains(&skill.key))
        .collect();

    NormalizedJob {
        required,
        preferred,
    }
}

/// Case-insensitive view of a candidate's skills.
#[derive(Debug, Clone, Default)]
pub struct SkillIndex {
    by_key: HashMap<SkillKey, Proficiency>,
}

impl SkillIndex {
    /// Build the index; a later entry for the same name wins.
    pub fn from_profile(profile: &CandidateProfile) -> Self {
        let mut by_key = HashMap::with_capacity(profile.skills.len());
        for skill in &profile.skills {
            let key = skill.key();
            if key.is_blank() {
                continue;
            }
            by_key.insert(key, skill.proficiency);
        }
        Self { by_key }
    }

    pub fn proficiency(&self, key: &SkillKey) -> Option<Proficiency> {
        self.by_key.get(key).copied()
    }

    pub fn contains(&self, key: &SkillKey) -> bool {
        self.by_key.contains_key(key)
    }

    /// Look up by raw name.
    pub fn proficiency_of(&self, name: &str) -> Option<Proficiency> {
        self.proficiency(&SkillKey::new(name))
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}
