//! Skill gap analysis.
//!
//! Derives the missing and insufficient skills for a profile/job pair,
//! classifies each by severity and folds them into a readiness score.
//! Uses the same skill matching as the scoring engine, so a skill reported
//! as matched there never shows up as a gap here.
//!
//! Gap order is part of the contract: critical gaps in required-skill
//! order, then important gaps, then nice-to-have gaps in preferred-skill
//! order. The recommendation engine builds its phases in this order.

use serde::{Deserialize, Serialize};
use skillbridge_features::{normalize_job, NormalizedJob, SkillIndex};
use skillbridge_model::{
    CandidateProfile, GapAnalysisResult, GapCategory, JobRequirements, SkillGap,
};
use tracing::debug;

/// Readiness points deducted per gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GapPenalties {
    pub critical: u32,
    pub important: u32,
    pub nice_to_have: u32,
}

impl Default for GapPenalties {
    fn default() -> Self {
        Self {
            critical: 15,
            important: 7,
            nice_to_have: 2,
        }
    }
}

impl GapPenalties {
    pub fn for_category(&self, category: GapCategory) -> u32 {
        match category {
            GapCategory::Critical => self.critical,
            GapCategory::Important => self.important,
            GapCategory::NiceToHave => self.nice_to_have,
        }
    }

    /// Fall back to the defaults unless `critical >= important >= nice_to_have`.
    pub fn sanitized(self) -> Self {
        if self.critical >= self.important && self.important >= self.nice_to_have {
            self
        } else {
            Self::default()
        }
    }
}

/// Analyze gaps with the default penalties.
pub fn analyze(profile: &CandidateProfile, job: &JobRequirements) -> GapAnalysisResult {
    analyze_with(&GapPenalties::default(), profile, job)
}

/// Analyze the gaps between a profile and a job.
///
/// Penalties out of severity order are replaced by the defaults.
pub fn analyze_with(
    penalties: &GapPenalties,
    profile: &CandidateProfile,
    job: &JobRequirements,
) -> GapAnalysisResult {
    let penalties = penalties.sanitized();
    let index = SkillIndex::from_profile(profile);
    let NormalizedJob {
        required,
        preferred,
    } = normalize_job(job);

    let mut critical = Vec::new();
    let mut important = Vec::new();
    let mut nice_to_have = Vec::new();

    for skill in &required {
        match index.proficiency(&skill.key) {
            None => critical.push(SkillGap::new(skill.name.clone(), GapCategory::Critical)),
            Some(held) => {
                // Held skills only become gaps under an explicit per-skill minimum
                if let Some(minimum) = job.minimum_for(&skill.key) {
                    if held < minimum {
                        important.push(SkillGap::partial(
                            skill.name.clone(),
                            GapCategory::Important,
                        ));
                    }
                }
            }
        }
    }

    let struggling = !critical.is_empty() || !important.is_empty();

    for skill in preferred.iter().filter(|s| !index.contains(&s.key)) {
        if struggling {
            important.push(SkillGap::new(skill.name.clone(), GapCategory::Important));
        } else {
            nice_to_have.push(SkillGap::new(skill.name.clone(), GapCategory::NiceToHave));
        }
    }

    let critical_gap_count = critical.len();
    let mut gaps = critical;
    gaps.append(&mut important);
    gaps.append(&mut nice_to_have);

    let readiness_score = readiness_score(&penalties, &gaps);

    debug!(
        total_gaps = gaps.len(),
        critical_gap_count, readiness_score, "Analyzed skill gaps"
    );

    GapAnalysisResult {
        total_gaps: gaps.len(),
        critical_gap_count,
        readiness_score,
        gaps,
    }
}

/// 100 minus the summed penalties, floored at 0.
pub fn readiness_score(penalties: &GapPenalties, gaps: &[SkillGap]) -> u32 {
    let penalties = penalties.sanitized();
    let penalty = gaps
        .iter()
        .map(|gap| penalties.for_category(gap.category))
        .fold(0_u32, u32::saturating_add);
    100_u32.saturating_sub(penalty)
}
