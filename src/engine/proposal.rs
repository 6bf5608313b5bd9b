use super::rules::{
    BASE_PROPOSAL_SCORE, BASE_SUPPORT, Criterion, FEASIBLE_SKILL_COUNT,
    FEASIBLE_SKILLS_BONUS, PASS_THRESHOLD, PATTERN_CONFIDENCE_WEIGHT, PROPOSAL_RULES,
    ProposalRule, URGENT_PROJECT_TYPES, URGENT_TYPE_BONUS,
};
use crate::model::{InsightFilter, InsightType, ProjectProposal, ProposerContext};
use crate::storage::PatternInsightProvider;
use std::collections::HashSet;
use std::sync::Arc;

/// How a single rule scored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    pub rule: &'static str,
    pub satisfied: bool,
    pub delta: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposalAssessment {
    pub passes: bool,
    /// Clamped to 0..=100.
    pub score: u8,
    pub feedback: Vec<String>,
    pub outcomes: Vec<RuleOutcome>,
}

pub fn clamp_score(raw: i32) -> u8 {
    raw.clamp(0, 100) as u8
}

fn count_distinct(items: &[String]) -> usize {
    items.iter().collect::<HashSet<_>>().len()
}

fn criterion_holds(
    criterion: &Criterion,
    proposal: &ProjectProposal,
    context: &ProposerContext,
) -> bool {
    match *criterion {
        Criterion::LiberationKeywords {
            keywords,
            min_matches,
        } => {
            let description = proposal.description.to_lowercase();
            let objectives: Vec<String> = proposal
                .liberation_objectives
                .iter()
                .map(|o| o.to_lowercase())
                .collect();
            let matched = keywords
                .iter()
                .filter(|k| description.contains(*k) || objectives.iter().any(|o| o.contains(*k)))
                .count();
            matched >= min_matches
        }
        Criterion::ImpactGoals { min } => count_distinct(&proposal.community_impact_goals) >= min,
        Criterion::ResourceCategories { min, max } => {
            (min..=max).contains(&proposal.resource_needs.len())
        }
        Criterion::CommunityParticipation { skill_keywords } => {
            proposal.collaboration_requirements.includes_community_input
                || proposal
                    .skills_needed
                    .iter()
                    .any(|skill| skill_keywords.iter().any(|k| skill.contains(k)))
        }
        Criterion::LocalRelevance => {
            context.has_location() && !proposal.community_need_areas.is_empty()
        }
    }
}

/// Scores a proposal against a rule table.
pub fn assess_with(
    rules: &[ProposalRule],
    proposal: &ProjectProposal,
    context: &ProposerContext,
) -> ProposalAssessment {
    let mut raw = BASE_PROPOSAL_SCORE;
    let mut feedback = Vec::new();
    let mut outcomes = Vec::with_capacity(rules.len());

    for rule in rules {
        let satisfied = criterion_holds(&rule.criterion, proposal, context);
        let delta = if satisfied { rule.reward } else { rule.penalty };
        if !satisfied {
            if let Some(message) = rule.feedback {
                feedback.push(message.to_string());
            }
        }
        raw += delta;
        outcomes.push(RuleOutcome {
            rule: rule.name,
            satisfied,
            delta,
        });
    }

    ProposalAssessment {
        passes: raw >= PASS_THRESHOLD,
        score: clamp_score(raw),
        feedback,
        outcomes,
    }
}

/// Scores proposals and estimates their initial community support.
#[derive(Clone)]
pub struct ProposalValidator {
    insights: Arc<dyn PatternInsightProvider>,
}

impl ProposalValidator {
    pub fn new(insights: Arc<dyn PatternInsightProvider>) -> Self {
        Self { insights }
    }

    pub fn validate(
        &self,
        proposal: &ProjectProposal,
        context: &ProposerContext,
    ) -> ProposalAssessment {
        let assessment = assess_with(PROPOSAL_RULES, proposal, context);
        tracing::debug!(
            title = %proposal.title,
            score = assessment.score,
            passes = assessment.passes,
            "Proposal assessed"
        );
        assessment
    }

    /// Starts at 50, adds the average confidence of matching patterns, the
    /// urgent-type bonus and the small-team bonus. An unreadable insight
    /// store only drops the pattern component.
    pub fn community_support(&self, proposal: &ProjectProposal) -> u8 {
        let mut support = BASE_SUPPORT;

        let filter = InsightFilter {
            insight_types: vec![InsightType::Pattern],
            category: Some(proposal.project_type.as_str().to_string()),
            ..InsightFilter::default()
        };
        match self.insights.get_insights(&filter) {
            Ok(patterns) if !patterns.is_empty() => {
                let average = patterns.iter().map(|p| p.confidence_score).sum::<f64>()
                    / patterns.len() as f64;
                support += (average * PATTERN_CONFIDENCE_WEIGHT).round() as i32;
            }
            Ok(_) => {}
            Err(e) => tracing::warn!(
                project_type = %proposal.project_type,
                error = %e,
                "Pattern insights unavailable, estimating support without them"
            ),
        }

        if URGENT_PROJECT_TYPES.contains(&proposal.project_type) {
            support += URGENT_TYPE_BONUS;
        }
        if proposal.skills_needed.len() <= FEASIBLE_SKILL_COUNT {
            support += FEASIBLE_SKILLS_BONUS;
        }

        clamp_score(support)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{StoreError, StoreResult};
    use crate::model::{CommunityInsight, ProjectType};
    use crate::storage::MemoryStore;

    struct OfflineInsights;

    impl PatternInsightProvider for OfflineInsights {
        fn get_insights(&self, _filter: &InsightFilter) -> StoreResult<Vec<CommunityInsight>> {
            Err(StoreError::Backend("insights offline".to_string()))
        }
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn full_marks() -> (ProjectProposal, ProposerContext) {
        let proposal = ProjectProposal::new("Tenant union", ProjectType::Housing)
            .with_description("community empowerment collective justice liberation")
            .with_impact_goals(strings(&["a", "b", "c"]))
            .with_community_input(true)
            .with_resource_need("funding", "x")
            .with_need_areas(strings(&["Leeds"]));
        (proposal, ProposerContext::new("s1").with_location("Leeds"))
    }

    fn validator() -> ProposalValidator {
        ProposalValidator::new(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn test_full_marks_clamped_to_100() {
        let (proposal, context) = full_marks();
        let assessment = validator().validate(&proposal, &context);
        assert!(assessment.passes);
        assert_eq!(assessment.score, 100);
        assert!(assessment.feedback.is_empty());
        let raw: i32 = 50 + assessment.outcomes.iter().map(|o| o.delta).sum::<i32>();
        assert_eq!(raw, 120);
    }

    #[test]
    fn test_bare_proposal_fails_with_feedback() {
        let proposal = ProjectProposal::new("Something", ProjectType::Policy);
        let assessment = validator().validate(&proposal, &ProposerContext::default());
        assert!(!assessment.passes);
        assert_eq!(assessment.score, 40);
        assert_eq!(assessment.feedback.len(), 4);
        assert_eq!(
            assessment.feedback[0],
            "Consider strengthening liberation and empowerment focus"
        );
    }

    #[test]
    fn test_keywords_counted_across_objectives() {
        let proposal = ProjectProposal::new("Clinic", ProjectType::Healthcare)
            .with_description("Justice for patients")
            .with_liberation_objectives(strings(&["Collective care", "EQUALITY of access"]));
        let assessment = validator().validate(&proposal, &ProposerContext::default());
        assert!(assessment.outcomes[0].satisfied);
        assert_eq!(assessment.outcomes[0].delta, 20);
    }

    #[test]
    fn test_keyword_is_counted_once_even_if_repeated() {
        let proposal = ProjectProposal::new("Clinic", ProjectType::Healthcare)
            .with_description("community community community justice");
        let assessment = validator().validate(&proposal, &ProposerContext::default());
        assert!(!assessment.outcomes[0].satisfied);
        assert_eq!(assessment.outcomes[0].delta, -10);
    }

    #[test]
    fn test_duplicate_impact_goals_do_not_count() {
        let proposal = ProjectProposal::new("Clinic", ProjectType::Healthcare)
            .with_impact_goals(strings(&["access", "access", "care"]));
        let assessment = validator().validate(&proposal, &ProposerContext::default());
        assert!(!assessment.outcomes[1].satisfied);
    }

    #[test]
    fn test_resource_categories_bounds() {
        let mut proposal = ProjectProposal::new("Co-op", ProjectType::Economic);
        for category in ["a", "b", "c", "d", "e", "f"] {
            proposal = proposal.with_resource_need(category, "some");
        }
        let assessment = validator().validate(&proposal, &ProposerContext::default());
        assert!(!assessment.outcomes[2].satisfied);
        assert!(
            assessment
                .feedback
                .contains(&"Specify realistic resource needs (1-5 categories)".to_string())
        );
    }

    #[test]
    fn test_participation_through_skills() {
        let proposal = ProjectProposal::new("Co-op", ProjectType::Economic)
            .with_skills(strings(&["youth leadership"]));
        let assessment = validator().validate(&proposal, &ProposerContext::default());
        assert!(assessment.outcomes[3].satisfied);

        let capitalised = ProjectProposal::new("Co-op", ProjectType::Economic)
            .with_skills(strings(&["Organizing"]));
        let assessment = validator().validate(&capitalised, &ProposerContext::default());
        assert!(!assessment.outcomes[3].satisfied);
    }

    #[test]
    fn test_local_relevance_needs_both_parts() {
        let (proposal, _) = full_marks();
        let without_location = validator().validate(&proposal, &ProposerContext::new("s"));
        assert!(!without_location.outcomes[4].satisfied);
        assert!(without_location.feedback.is_empty());
    }

    #[test]
    fn test_support_for_urgent_small_team() {
        let (proposal, _) = full_marks();
        assert_eq!(validator().community_support(&proposal), 80);
    }

    #[test]
    fn test_support_with_matching_patterns() {
        let store = Arc::new(MemoryStore::new());
        for (id, confidence) in [("ins-1", 0.9), ("ins-2", 0.7)] {
            store
                .insert_insight(
                    CommunityInsight::new(id.to_string(), InsightType::Pattern, confidence)
                        .with_categories(&["economic"]),
                )
                .unwrap();
        }
        store
            .insert_insight(
                CommunityInsight::new("ins-3".to_string(), InsightType::Gap, 0.1)
                    .with_categories(&["economic"]),
            )
            .unwrap();

        let validator = ProposalValidator::new(store);
        let proposal = ProjectProposal::new("Co-op", ProjectType::Economic)
            .with_skills(strings(&["a", "b", "c", "d"]));
        // 50 + round(0.8 * 30)
        assert_eq!(validator.community_support(&proposal), 74);
    }

    #[test]
    fn test_support_clamped() {
        let store = Arc::new(MemoryStore::new());
        store
            .insert_insight(
                CommunityInsight::new("ins-1".to_string(), InsightType::Pattern, 1.0)
                    .with_categories(&["housing"]),
            )
            .unwrap();
        let (proposal, _) = full_marks();
        assert_eq!(ProposalValidator::new(store).community_support(&proposal), 100);
    }

    #[test]
    fn test_support_survives_insight_outage() {
        let validator = ProposalValidator::new(Arc::new(OfflineInsights));
        let (proposal, _) = full_marks();
        assert_eq!(validator.community_support(&proposal), 80);
    }
}
