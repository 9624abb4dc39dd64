//! Explanation generation for match results.
//!
//! Converts scores, gaps and learning plans into human-readable text
//! suitable for display in a terminal or web interface.

use serde::{Deserialize, Serialize};
use skillbridge_model::{
    GapAnalysisResult, GapCategory, LearningPhase, LearningPlan, ScoreBreakdown, SkillGap,
};

/// A structured explanation for one skill gap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explanation {
    /// Short summary (1 line)
    pub summary: String,

    /// Detailed explanation (1-2 sentences)
    pub detail: String,

    /// Severity level (0.0 - 1.0)
    pub severity: f32,

    /// Evidence items supporting this explanation
    pub evidence: Vec<EvidenceItem>,
}

/// A piece of evidence supporting an explanation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceItem {
    /// Type of evidence
    pub kind: String,

    /// The specific value
    pub value: String,

    /// Optional context
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

/// Severity on a 0-1 scale, for sorting and colouring.
pub fn category_severity(category: GapCategory) -> f32 {
    match category {
        GapCategory::Critical => 1.0,
        GapCategory::Important => 0.6,
        GapCategory::NiceToHave => 0.3,
    }
}

/// Generate explanations for every gap in an analysis.
pub fn explain_gaps(result: &GapAnalysisResult) -> Vec<Explanation> {
    result.gaps.iter().map(explain_gap).collect()
}

/// Generate an explanation for a single gap.
pub fn explain_gap(gap: &SkillGap) -> Explanation {
    let skill = &gap.skill_name;
    let severity = category_severity(gap.category);

    match (gap.category, gap.has_partial_proficiency) {
        (GapCategory::Critical, _) => Explanation {
            summary: format!("Missing required skill '{}'", skill),
            detail: format!(
                "The job lists '{}' as a requirement and it does not appear in your profile. \
                 Closing this gap has the largest effect on readiness.",
                skill
            ),
            severity,
            evidence: vec![EvidenceItem {
                kind: "required_skill".to_string(),
                value: skill.clone(),
                context: None,
            }],
        },

        (GapCategory::Important, true) => Explanation {
            summary: format!("'{}' below the expected level", skill),
            detail: format!(
                "You list '{}', but the job asks for a higher proficiency. \
                 Deepening existing knowledge is usually faster than starting fresh.",
                skill
            ),
            severity,
            evidence: vec![EvidenceItem {
                kind: "partial_proficiency".to_string(),
                value: skill.clone(),
                context: Some("held below the job's minimum".to_string()),
            }],
        },

        (GapCategory::Important, false) => Explanation {
            summary: format!("Missing preferred skill '{}'", skill),
            detail: format!(
                "'{}' is preferred for this role. Because required skills are also \
                 missing, it carries more weight than it otherwise would.",
                skill
            ),
            severity,
            evidence: vec![EvidenceItem {
                kind: "preferred_skill".to_string(),
                value: skill.clone(),
                context: Some("elevated by missing required skills".to_string()),
            }],
        },

        (GapCategory::NiceToHave, _) => Explanation {
            summary: format!("Nice to have: '{}'", skill),
            detail: format!(
                "'{}' is preferred but not required. It can strengthen an application \
                 that already meets the requirements.",
                skill
            ),
            severity,
            evidence: vec![EvidenceItem {
                kind: "preferred_skill".to_string(),
                value: skill.clone(),
                context: None,
            }],
        },
    }
}

/// One-line summary of a score breakdown.
pub fn explain_score(score: &ScoreBreakdown) -> String {
    format!(
        "Overall {:.0}/100 (skills {:.0}%, experience {:.0}%)",
        score.overall_score,
        score.skill_match_score * 100.0,
        score.experience_match_score * 100.0
    )
}

/// Generate a combined readiness summary for an analysis.
pub fn summarize_readiness(result: &GapAnalysisResult) -> String {
    if result.gaps.is_empty() {
        return format!("READY ({}/100): no skill gaps found.", result.readiness_score);
    }

    let level = if result.readiness_score >= 85 && result.critical_gap_count == 0 {
        "READY"
    } else if result.readiness_score >= 60 {
        "NEARLY READY"
    } else {
        "NOT READY"
    };

    let skills: Vec<&str> = result.gaps.iter().map(|g| g.skill_name.as_str()).collect();
    format!(
        "{} ({}/100): {}",
        level,
        result.readiness_score,
        skills.join(", ")
    )
}

/// One-line description of a learning phase.
pub fn describe_phase(phase: &LearningPhase) -> String {
    let titles: Vec<&str> = phase.resources.iter().map(|r| r.title.as_str()).collect();
    format!(
        "[{}] {} - {:.1}h: {}",
        phase.category.label(),
        phase.skill_name,
        phase.estimated_hours,
        titles.join("; ")
    )
}

/// Total hours plus the advisory calendar estimate.
pub fn summarize_plan(plan: &LearningPlan) -> String {
    if plan.phases.is_empty() {
        return "Nothing to learn for this role.".to_string();
    }

    let mut summary = format!(
        "{} phase(s), {:.1} hours total",
        plan.phases.len(),
        plan.total_estimated_hours
    );
    if let Some(weeks) = plan.estimated_weeks() {
        summary.push_str(&format!(
            " (~{:.1} weeks at {:.0}h/week)",
            weeks, plan.weekly_hours_available
        ));
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use skillbridge_model::Resource;

    fn analysis(gaps: Vec<SkillGap>, readiness_score: u32) -> GapAnalysisResult {
        let critical_gap_count = gaps
            .iter()
            .filter(|g| g.category == GapCategory::Critical)
            .count();
        GapAnalysisResult {
            total_gaps: gaps.len(),
            critical_gap_count,
            readiness_score,
            gaps,
        }
    }

    #[test]
    fn test_explain_critical_gap() {
        let explanation = explain_gap(&SkillGap::new("Python", GapCategory::Critical));
        assert_eq!(explanation.severity, 1.0);
        assert!(explanation.summary.contains("Missing required"));
        assert_eq!(explanation.evidence[0].value, "Python");
    }

    #[test]
    fn test_explain_partial_gap() {
        let explanation = explain_gap(&SkillGap::partial("Rust", GapCategory::Important));
        assert!(explanation.summary.contains("below the expected level"));
        assert_eq!(explanation.evidence[0].kind, "partial_proficiency");
    }

    #[test]
    fn test_summarize_readiness_levels() {
        let ready = analysis(vec![], 100);
        assert!(summarize_readiness(&ready).starts_with("READY"));

        let nearly = analysis(vec![SkillGap::new("Python", GapCategory::Critical)], 85);
        assert_eq!(summarize_readiness(&nearly), "NEARLY READY (85/100): Python");

        let not_ready = analysis(
            vec![
                SkillGap::new("Python", GapCategory::Critical),
                SkillGap::new("SQL", GapCategory::Critical),
                SkillGap::new("Go", GapCategory::Critical),
            ],
            55,
        );
        assert!(summarize_readiness(&not_ready).starts_with("NOT READY"));
    }

    #[test]
    fn test_explain_score() {
        let score = ScoreBreakdown {
            skill_match_score: 0.5,
            experience_match_score: 1.0,
            overall_score: 70.0,
            matched_required_skills: vec!["Go".to_string()],
        };
        assert_eq!(
            explain_score(&score),
            "Overall 70/100 (skills 50%, experience 100%)"
        );
    }

    #[test]
    fn test_describe_phase_and_plan() {
        let phase = LearningPhase {
            skill_name: "Python".to_string(),
            category: GapCategory::Critical,
            resources: vec![Resource::free("The Python Tutorial", 10.0)],
            estimated_hours: 10.0,
        };
        assert_eq!(
            describe_phase(&phase),
            "[Critical] Python - 10.0h: The Python Tutorial"
        );

        let mut plan = LearningPlan::empty(5.0);
        plan.phases.push(phase);
        plan.total_estimated_hours = 10.0;
        assert_eq!(
            summarize_plan(&plan),
            "1 phase(s), 10.0 hours total (~2.0 weeks at 5h/week)"
        );
    }
}
