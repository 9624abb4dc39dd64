//! Match scoring between a candidate profile and a job.
//!
//! Combines a proficiency-weighted skill match with an experience match
//! into a single 0-100 overall score. Pure and total: any input, including
//! empty profiles and jobs, yields in-range scores.

use serde::{Deserialize, Serialize};
use skillbridge_features::{dedup_skills, NamedSkill, SkillIndex};
use skillbridge_model::{CandidateProfile, JobRequirements, ScoreBreakdown};
use tracing::debug;

/// Weights for combining the component scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    /// Weight for the skill match component
    pub skill: f64,
    /// Weight for the experience match component
    pub experience: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            skill: 0.6,
            experience: 0.4,
        }
    }
}

impl ScoreWeights {
    /// Scale the weights to sum to 1.
    ///
    /// Falls back to the defaults when either weight is negative or not
    /// finite, or when both are zero.
    pub fn sanitized(self) -> Self {
        let valid = |w: f64| w.is_finite() && w >= 0.0;
        let total = self.skill + self.experience;
        if valid(self.skill) && valid(self.experience) && total > 0.0 && total.is_finite() {
            Self {
                skill: self.skill / total,
                experience: self.experience / total,
            }
        } else {
            Self::default()
        }
    }
}

/// Score a profile against a job with the default weights.
pub fn calculate(profile: &CandidateProfile, job: &JobRequirements) -> ScoreBreakdown {
    calculate_with(&ScoreWeights::default(), profile, job)
}

/// Score a profile against a job.
pub fn calculate_with(
    weights: &ScoreWeights,
    profile: &CandidateProfile,
    job: &JobRequirements,
) -> ScoreBreakdown {
    let index = SkillIndex::from_profile(profile);
    let required = dedup_skills(&job.required_skills);

    let (skill_match_score, matched_required_skills) = skill_match(&index, &required);
    let experience_match_score =
        experience_match(profile.effective_years(), job.effective_min_years());

    let weights = weights.sanitized();
    let raw = (skill_match_score * weights.skill + experience_match_score * weights.experience)
        * 100.0;
    let overall_score = if raw.is_finite() {
        raw.clamp(0.0, 100.0)
    } else {
        0.0
    };

    debug!(
        required = required.len(),
        matched = matched_required_skills.len(),
        skill_match_score,
        experience_match_score,
        overall_score,
        "Scored profile against job"
    );

    ScoreBreakdown {
        skill_match_score,
        experience_match_score,
        overall_score,
        matched_required_skills,
    }
}

/// Average proficiency weight over the required skills.
///
/// No required skills means nothing to fail: 1.0.
fn skill_match(index: &SkillIndex, required: &[NamedSkill]) -> (f64, Vec<String>) {
    if required.is_empty() {
        return (1.0, Vec::new());
    }

    let mut total = 0.0_f64;
    let mut matched = Vec::new();

    for skill in required {
        if let Some(proficiency) = index.proficiency(&skill.key) {
            total += proficiency.weight();
            matched.push(skill.name.clone());
        }
    }

    let score = (total / required.len() as f64).clamp(0.0, 1.0);
    (score, matched)
}

/// Ratio of held to required years, capped at 1.0.
fn experience_match(years: f64, min_years: f64) -> f64 {
    if min_years <= 0.0 {
        return 1.0;
    }
    (years / min_years).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use skillbridge_model::{CandidateSkill, Proficiency};

    fn go_expert() -> CandidateProfile {
        CandidateProfile::new().with_skill("Go", Proficiency::Expert)
    }

    #[test]
    fn test_partial_skill_match() {
        let job = JobRequirements::new(["Go", "Python"]);
        let score = calculate(&go_expert(), &job);

        assert_eq!(score.matched_required_skills, vec!["Go".to_string()]);
        assert_eq!(score.skill_match_score, 0.5);
        assert_eq!(score.experience_match_score, 1.0);
        assert!((score.overall_score - 70.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_inputs_score_perfectly() {
        let score = calculate(&CandidateProfile::new(), &JobRequirements::default());
        assert_eq!(score.skill_match_score, 1.0);
        assert_eq!(score.experience_match_score, 1.0);
        assert!((score.overall_score - 100.0).abs() < 1e-9);
        assert!(score.matched_required_skills.is_empty());
    }

    #[test]
    fn test_proficiency_weights() {
        let job = JobRequirements::new(["Rust"]);
        for (level, expected) in [
            (Proficiency::Beginner, 0.4),
            (Proficiency::Intermediate, 0.6),
            (Proficiency::Advanced, 0.8),
            (Proficiency::Expert, 1.0),
        ] {
            let profile = CandidateProfile::new().with_skill("rust", level);
            assert_eq!(calculate(&profile, &job).skill_match_score, expected);
        }
    }

    #[test]
    fn test_case_insensitive_match_keeps_job_spelling() {
        let profile = CandidateProfile::new().with_skill("  kubernetes", Proficiency::Advanced);
        let job = JobRequirements::new(["Kubernetes"]);
        let score = calculate(&profile, &job);
        assert_eq!(score.matched_required_skills, vec!["Kubernetes".to_string()]);
    }

    #[test]
    fn test_duplicate_required_skills_collapse() {
        let job = JobRequirements::new(["Go", "go", "Python"]);
        let score = calculate(&go_expert(), &job);
        assert_eq!(score.skill_match_score, 0.5);
        assert_eq!(score.matched_required_skills.len(), 1);
    }

    #[test]
    fn test_no_synonym_matching() {
        let profile = CandidateProfile::new().with_skill("JavaScript", Proficiency::Expert);
        let score = calculate(&profile, &JobRequirements::new(["JS"]));
        assert_eq!(score.skill_match_score, 0.0);
        assert!(score.matched_required_skills.is_empty());
    }

    #[test]
    fn test_experience_match() {
        let job = JobRequirements::new(Vec::<String>::new()).with_min_years(4.0);
        let junior = CandidateProfile::new().with_years(1.0);
        let senior = CandidateProfile::new().with_years(10.0);

        assert_eq!(calculate(&junior, &job).experience_match_score, 0.25);
        assert_eq!(calculate(&senior, &job).experience_match_score, 1.0);
    }

    #[test]
    fn test_negative_inputs_are_clamped() {
        let profile = CandidateProfile::new().with_years(-5.0);
        let job = JobRequirements::new(Vec::<String>::new()).with_min_years(-2.0);
        let score = calculate(&profile, &job);
        assert_eq!(score.experience_match_score, 1.0);

        let job = job.with_min_years(3.0);
        assert_eq!(calculate(&profile, &job).experience_match_score, 0.0);
    }

    #[test]
    fn test_unknown_proficiency_counts_as_beginner() {
        let mut profile = CandidateProfile::new();
        profile
            .skills
            .push(CandidateSkill::new("SQL", Proficiency::from("ninja")));
        let score = calculate(&profile, &JobRequirements::new(["SQL"]));
        assert_eq!(score.skill_match_score, 0.4);
    }

    #[test]
    fn test_invalid_weights_fall_back_to_defaults() {
        let weights = ScoreWeights {
            skill: f64::NAN,
            experience: -1.0,
        };
        let job = JobRequirements::new(["Go", "Python"]);
        assert_eq!(
            calculate_with(&weights, &go_expert(), &job),
            calculate(&go_expert(), &job)
        );
    }

    #[test]
    fn test_oversized_weights_are_normalized() {
        let weights = ScoreWeights {
            skill: 2.0,
            experience: 2.0,
        };
        let score = calculate_with(&weights, &go_expert(), &JobRequirements::new(["Go"]));
        assert_eq!(score.overall_score, 100.0);
    }

    #[test]
    fn test_undersized_weights_still_reach_full_score() {
        let weights = ScoreWeights {
            skill: 0.3,
            experience: 0.3,
        };
        let score = calculate_with(&weights, &CandidateProfile::new(), &JobRequirements::default());
        assert!((score.overall_score - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_weights_scale_to_unit_sum() {
        let weights = ScoreWeights {
            skill: 3.0,
            experience: 2.0,
        };
        assert_eq!(weights.sanitized(), ScoreWeights::default());

        let zero = ScoreWeights {
            skill: 0.0,
            experience: 0.0,
        };
        assert_eq!(zero.sanitized(), ScoreWeights::default());
    }

    const POOL: &[&str] = &["Go", "python", "Rust", "SQL", "docker", "AWS"];

    fn arb_profile() -> impl Strategy<Value = CandidateProfile> {
        (
            prop::collection::vec((0..POOL.len(), 0..4usize), 0..8),
            prop::option::of(-5.0..30.0_f64),
        )
            .prop_map(|(skills, years)| {
                let levels = [
                    Proficiency::Beginner,
                    Proficiency::Intermediate,
                    Proficiency::Advanced,
                    Proficiency::Expert,
                ];
                let mut profile = CandidateProfile::new();
                for (i, level) in skills {
                    profile.skills.push(CandidateSkill::new(POOL[i], levels[level]));
                }
                profile.years_of_experience = years;
                profile
            })
    }

    fn arb_job() -> impl Strategy<Value = JobRequirements> {
        (
            prop::collection::vec(0..POOL.len(), 0..8),
            -5.0..15.0_f64,
        )
            .prop_map(|(required, min_years)| {
                JobRequirements::new(required.into_iter().map(|i| POOL[i].to_uppercase()))
                    .with_min_years(min_years)
            })
    }

    proptest! {
        #[test]
        fn scores_stay_in_bounds(profile in arb_profile(), job in arb_job()) {
            let score = calculate(&profile, &job);
            prop_assert!((0.0..=1.0).contains(&score.skill_match_score));
            prop_assert!((0.0..=1.0).contains(&score.experience_match_score));
            prop_assert!((0.0..=100.0).contains(&score.overall_score));
        }

        #[test]
        fn matched_skills_are_required(profile in arb_profile(), job in arb_job()) {
            let score = calculate(&profile, &job);
            prop_assert!(score.matched_required_skills.len() <= job.required_skills.len());
            for name in &score.matched_required_skills {
                prop_assert!(job.required_skills.contains(name));
            }
        }

        #[test]
        fn scoring_is_idempotent(profile in arb_profile(), job in arb_job()) {
            prop_assert_eq!(calculate(&profile, &job), calculate(&profile, &job));
        }

        #[test]
        fn any_positive_weights_score_a_perfect_match_at_100(
            skill in 0.0..10.0_f64,
            experience in 0.01..10.0_f64,
        ) {
            let weights = ScoreWeights { skill, experience };
            let score = calculate_with(&weights, &go_expert(), &JobRequirements::new(["Go"]));
            prop_assert!((score.overall_score - 100.0).abs() < 1e-9);
        }
    }
}
