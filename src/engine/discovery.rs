use super::rules::{
    COLLABORATION_BASE, COLLABORATION_BONUS_CAP, DEFAULT_AFFECTED_POPULATION, category_profile,
    impact_timeline, resource_profile, timeline_estimate,
};
use crate::model::{
    CommunityInsight, ExpectedImpact, InsightFilter, InsightType, OrganizingOpportunity,
    OrganizingProject, UrgencyLevel,
};
use crate::storage::{PatternInsightProvider, ProjectFilter, ProjectStore};
use std::sync::Arc;

pub const MIN_CONFIDENCE: f64 = 0.6;
pub const INSIGHT_LIMIT: usize = 20;
pub const OPPORTUNITY_LIMIT: usize = 10;
pub const DEFAULT_AREA: &str = "local";

const ORGANIZATION_BONUS: f64 = 5.0;
const POPULATION_BONUS: f64 = 5.0;

/// Base 60, plus a log-scaled bonus for the affected population and a bonus
/// per existing organization. Each bonus is capped at 20.
pub fn collaboration_potential(insight: &CommunityInsight) -> u32 {
    let data = &insight.pattern_data;
    let population = data
        .affected_population_estimate
        .filter(|p| *p > 0)
        .unwrap_or(DEFAULT_AFFECTED_POPULATION);
    let size_bonus = ((population as f64).log10() * POPULATION_BONUS).min(COLLABORATION_BONUS_CAP);
    let org_bonus =
        (data.existing_organizations.len() as f64 * ORGANIZATION_BONUS).min(COLLABORATION_BONUS_CAP);
    (COLLABORATION_BASE + size_bonus + org_bonus).round() as u32
}

/// Turns one insight category into a candidate opportunity.
pub fn expand_category(insight: &CommunityInsight, category: &str) -> OrganizingOpportunity {
    let profile = category_profile(category);
    let data = &insight.pattern_data;
    let opportunity_type = profile.opportunity_type;
    let confidence = insight.confidence_score;

    let urgency_level = profile
        .fixed_urgency
        .unwrap_or_else(|| UrgencyLevel::from_severity(data.severity_level.as_deref()));

    OrganizingOpportunity {
        opportunity_type,
        urgency_level,
        geographic_area: insight
            .geographic_area
            .clone()
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| DEFAULT_AREA.to_string()),
        community_readiness_score: (confidence * 100.0).round().max(0.0) as u32,
        required_skills: profile.required_skills.iter().map(|s| s.to_string()).collect(),
        expected_impact: ExpectedImpact {
            community_reach: data
                .affected_population_estimate
                .filter(|p| *p > 0)
                .unwrap_or(DEFAULT_AFFECTED_POPULATION),
            timeline: impact_timeline(opportunity_type).to_string(),
            liberation_outcomes: profile
                .liberation_outcomes
                .iter()
                .map(|s| s.to_string())
                .collect(),
        },
        collaboration_potential: collaboration_potential(insight),
        liberation_relevance: (confidence * 100.0 + 20.0).min(100.0),
        timeline_estimate: timeline_estimate(opportunity_type, data.complexity_level.as_deref())
            .to_string(),
        resource_requirements: resource_profile(opportunity_type),
        source_category: category.to_string(),
    }
}

/// True when an engaged project of the same type already serves the area.
pub fn already_covered(opportunity: &OrganizingOpportunity, projects: &[OrganizingProject]) -> bool {
    let project_type = opportunity.opportunity_type.project_type();
    projects.iter().any(|p| {
        p.status.is_engaged()
            && p.project_type == project_type
            && p.covers_area(&opportunity.geographic_area)
    })
}

/// Stable, highest rank first, truncated to the top ten.
pub fn rank_opportunities(mut opportunities: Vec<OrganizingOpportunity>) -> Vec<OrganizingOpportunity> {
    opportunities.sort_by_key(|o| std::cmp::Reverse(o.rank_score()));
    opportunities.truncate(OPPORTUNITY_LIMIT);
    opportunities
}

/// Surfaces ranked organizing opportunities from community patterns.
#[derive(Clone)]
pub struct OpportunityDiscoverer {
    insights: Arc<dyn PatternInsightProvider>,
    projects: Arc<dyn ProjectStore>,
}

impl OpportunityDiscoverer {
    pub fn new(insights: Arc<dyn PatternInsightProvider>, projects: Arc<dyn ProjectStore>) -> Self {
        Self { insights, projects }
    }

    /// Never fails: an unreadable store yields an empty list.
    pub fn discover(&self, area: Option<&str>, focus_areas: &[String]) -> Vec<OrganizingOpportunity> {
        let filter = InsightFilter {
            insight_types: vec![InsightType::Pattern, InsightType::Gap, InsightType::Opportunity],
            min_confidence: Some(MIN_CONFIDENCE),
            geographic_area: area.filter(|a| !a.is_empty()).map(str::to_string),
            category: None,
            limit: Some(INSIGHT_LIMIT),
        };

        let insights = match self.insights.get_insights(&filter) {
            Ok(insights) => insights,
            Err(e) => {
                tracing::warn!(error = %e, "Insight store unavailable, no opportunities identified");
                return Vec::new();
            }
        };

        let focus: Vec<String> = focus_areas.iter().map(|f| f.to_lowercase()).collect();
        let candidates: Vec<OrganizingOpportunity> = insights
            .iter()
            .flat_map(|insight| {
                insight
                    .organizing_opportunities
                    .iter()
                    .filter(|c| focus.is_empty() || focus.contains(&c.to_lowercase()))
                    .map(move |category| expand_category(insight, category))
            })
            .collect();
        tracing::debug!(
            insights = insights.len(),
            candidates = candidates.len(),
            "Expanded insight categories"
        );

        let engaged = match self.projects.list_projects(&ProjectFilter::engaged()) {
            Ok(projects) => projects,
            Err(e) => {
                tracing::warn!(error = %e, "Project store unavailable, no opportunities identified");
                return Vec::new();
            }
        };

        let fresh: Vec<OrganizingOpportunity> = candidates
            .into_iter()
            .filter(|o| !already_covered(o, &engaged))
            .collect();
        let ranked = rank_opportunities(fresh);
        tracing::info!(
            area = area.unwrap_or(DEFAULT_AREA),
            opportunities = ranked.len(),
            "Organizing opportunities identified"
        );
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OpportunityType, PatternData, ProjectProposal, ProjectStatus, ProjectType};

    fn insight(confidence: f64, categories: &[&str]) -> CommunityInsight {
        CommunityInsight::new("ins-1".to_string(), InsightType::Pattern, confidence)
            .with_area("Leeds")
            .with_categories(categories)
    }

    #[test]
    fn test_housing_expansion() {
        let opportunity = expand_category(&insight(0.85, &["housing"]), "housing");
        assert_eq!(opportunity.opportunity_type, OpportunityType::CampaignLaunch);
        assert_eq!(opportunity.urgency_level, UrgencyLevel::High);
        assert_eq!(opportunity.community_readiness_score, 85);
        assert_eq!(opportunity.liberation_relevance, 100.0);
        assert_eq!(opportunity.expected_impact.community_reach, 100);
        assert_eq!(opportunity.expected_impact.timeline, "3-6 months");
        assert_eq!(opportunity.timeline_estimate, "3-6 months");
        assert_eq!(opportunity.rank_score(), 115);
        // profile follows the mapped type, not the raw category
        assert_eq!(opportunity.resource_requirements.volunteers, "high");
        assert_eq!(opportunity.resource_requirements.funding, "medium");
    }

    #[test]
    fn test_severity_drives_urgency_for_other_categories() {
        let data = PatternData {
            severity_level: Some("critical".to_string()),
            complexity_level: Some("low".to_string()),
            ..PatternData::default()
        };
        let source = insight(0.6, &["education"]).with_pattern_data(data);
        let opportunity = expand_category(&source, "education");
        assert_eq!(opportunity.urgency_level, UrgencyLevel::Critical);
        assert_eq!(opportunity.timeline_estimate, "1-3 months");
        assert_eq!(opportunity.resource_requirements.expertise, "high");
        assert_eq!(opportunity.liberation_relevance, 80.0);
    }

    #[test]
    fn test_missing_area_defaults_to_local() {
        let source = CommunityInsight::new("ins-2".to_string(), InsightType::Gap, 0.7);
        assert_eq!(expand_category(&source, "policy").geographic_area, "local");
    }

    #[test]
    fn test_collaboration_potential() {
        // 60 + log10(100) * 5
        assert_eq!(collaboration_potential(&insight(0.7, &[])), 70);

        let data = PatternData {
            affected_population_estimate: Some(1_000_000_000),
            existing_organizations: (0..6).map(|i| format!("org {}", i)).collect(),
            ..PatternData::default()
        };
        assert_eq!(
            collaboration_potential(&insight(0.7, &[]).with_pattern_data(data)),
            100
        );
    }

    #[test]
    fn test_covered_by_engaged_project() {
        let opportunity = expand_category(&insight(0.9, &["housing"]), "housing");
        let project = OrganizingProject::from_proposal(
            "org-1".to_string(),
            ProjectProposal::new("Tenants", ProjectType::Policy)
                .with_need_areas(vec!["Leeds".to_string()]),
        )
        .with_status(ProjectStatus::Active);
        assert!(already_covered(&opportunity, &[project.clone()]));

        let pending = project.clone().with_status(ProjectStatus::Proposed);
        assert!(!already_covered(&opportunity, &[pending]));

        let elsewhere = OrganizingProject {
            community_need_areas: vec!["Bradford".to_string()],
            ..project
        };
        assert!(!already_covered(&opportunity, &[elsewhere]));
    }

    #[test]
    fn test_ranking_is_stable_and_truncated() {
        let mut candidates = Vec::new();
        for category in ["economic"; 12] {
            candidates.push(expand_category(&insight(0.7, &[category]), category));
        }
        let mut top = expand_category(&insight(0.7, &["safety"]), "safety");
        top.source_category = "first".to_string();
        candidates.push(top);

        let ranked = rank_opportunities(candidates);
        assert_eq!(ranked.len(), 10);
        assert_eq!(ranked[0].source_category, "first");
        assert!(
            ranked
                .windows(2)
                .all(|w| w[0].rank_score() >= w[1].rank_score())
        );
    }
}
