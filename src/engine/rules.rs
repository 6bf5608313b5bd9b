//! Scoring rule tables.
//!
//! Every heuristic the engine applies is listed here as data: the proposal
//! criteria with their weights and feedback, and the per-category lookup
//! tables used when turning community patterns into opportunities. Matching
//! is literal substring matching against fixed lists.

use crate::model::{OpportunityType, ProjectType, ResourceProfile, UrgencyLevel};

/// Every proposal starts here before rules are applied.
pub const BASE_PROPOSAL_SCORE: i32 = 50;

/// A proposal passes at or above this score.
pub const PASS_THRESHOLD: i32 = 60;

pub const LIBERATION_KEYWORDS: &[&str] = &[
    "empowerment",
    "liberation",
    "justice",
    "equality",
    "community",
    "collective",
];

/// A required skill mentioning any of these counts as democratic
/// participation.
pub const PARTICIPATION_SKILL_KEYWORDS: &[&str] = &["organizing", "leadership"];

/// What a proposal rule inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criterion {
    /// At least `min_matches` keywords appear in the description or any
    /// liberation objective.
    LiberationKeywords {
        keywords: &'static [&'static str],
        min_matches: usize,
    },
    /// At least `min` distinct community-impact goals.
    ImpactGoals { min: usize },
    /// Number of resource-need categories within `min..=max`.
    ResourceCategories { min: usize, max: usize },
    /// Community input flagged, or a skill mentions one of `skill_keywords`.
    CommunityParticipation {
        skill_keywords: &'static [&'static str],
    },
    /// Proposer gave a location and the project lists a need area.
    LocalRelevance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProposalRule {
    pub name: &'static str,
    pub criterion: Criterion,
    /// Added when the criterion holds.
    pub reward: i32,
    /// Added when it does not (zero or negative).
    pub penalty: i32,
    /// Reported to the proposer when the criterion does not hold.
    pub feedback: Option<&'static str>,
}

pub const PROPOSAL_RULES: &[ProposalRule] = &[
    ProposalRule {
        name: "liberation_alignment",
        criterion: Criterion::LiberationKeywords {
            keywords: LIBERATION_KEYWORDS,
            min_matches: 3,
        },
        reward: 20,
        penalty: -10,
        feedback: Some("Consider strengthening liberation and empowerment focus"),
    },
    ProposalRule {
        name: "impact_specificity",
        criterion: Criterion::ImpactGoals { min: 3 },
        reward: 15,
        penalty: 0,
        feedback: Some("Define more specific community impact goals"),
    },
    ProposalRule {
        name: "resource_feasibility",
        criterion: Criterion::ResourceCategories { min: 1, max: 5 },
        reward: 10,
        penalty: 0,
        feedback: Some("Specify realistic resource needs (1-5 categories)"),
    },
    ProposalRule {
        name: "democratic_participation",
        criterion: Criterion::CommunityParticipation {
            skill_keywords: PARTICIPATION_SKILL_KEYWORDS,
        },
        reward: 15,
        penalty: 0,
        feedback: Some("Include community participation and democratic decision-making"),
    },
    ProposalRule {
        name: "local_relevance",
        criterion: Criterion::LocalRelevance,
        reward: 10,
        penalty: 0,
        feedback: None,
    },
];

/// Support estimation: start value, bonus for urgent project types, and the
/// skills-count feasibility bonus.
pub const BASE_SUPPORT: i32 = 50;
pub const PATTERN_CONFIDENCE_WEIGHT: f64 = 30.0;
pub const URGENT_PROJECT_TYPES: &[ProjectType] =
    &[ProjectType::Housing, ProjectType::Healthcare, ProjectType::Safety];
pub const URGENT_TYPE_BONUS: i32 = 20;
pub const FEASIBLE_SKILL_COUNT: usize = 3;
pub const FEASIBLE_SKILLS_BONUS: i32 = 10;

/// Static per-category data used during opportunity discovery.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryProfile {
    pub opportunity_type: OpportunityType,
    /// Set for categories that are always urgent; otherwise urgency comes
    /// from the pattern's recorded severity.
    pub fixed_urgency: Option<UrgencyLevel>,
    pub required_skills: &'static [&'static str],
    pub liberation_outcomes: &'static [&'static str],
}

const DEFAULT_SKILLS: &[&str] = &["community_organizing", "leadership_development"];
const DEFAULT_OUTCOMES: &[&str] = &["community_empowerment", "collective_liberation"];

pub fn category_profile(category: &str) -> CategoryProfile {
    match category {
        "housing" => CategoryProfile {
            opportunity_type: OpportunityType::CampaignLaunch,
            fixed_urgency: Some(UrgencyLevel::High),
            required_skills: &["tenant_organizing", "legal_advocacy", "community_outreach"],
            liberation_outcomes: &[
                "housing_security",
                "tenant_empowerment",
                "gentrification_resistance",
            ],
        },
        "healthcare" => CategoryProfile {
            opportunity_type: OpportunityType::CampaignLaunch,
            fixed_urgency: Some(UrgencyLevel::High),
            required_skills: &[
                "healthcare_advocacy",
                "policy_research",
                "community_education",
            ],
            liberation_outcomes: &[
                "healthcare_access",
                "community_wellness",
                "health_sovereignty",
            ],
        },
        "safety" => CategoryProfile {
            opportunity_type: OpportunityType::CoalitionBuilding,
            fixed_urgency: Some(UrgencyLevel::High),
            required_skills: &[
                "safety_planning",
                "crisis_intervention",
                "community_defense",
            ],
            liberation_outcomes: &[
                "community_safety",
                "police_accountability",
                "transformative_justice",
            ],
        },
        "economic" => CategoryProfile {
            opportunity_type: OpportunityType::ResourceMobilization,
            fixed_urgency: None,
            required_skills: &[
                "financial_literacy",
                "cooperative_development",
                "resource_coordination",
            ],
            liberation_outcomes: &[
                "economic_empowerment",
                "cooperative_ownership",
                "wealth_building",
            ],
        },
        "education" => CategoryProfile {
            opportunity_type: OpportunityType::CommunityEducation,
            fixed_urgency: None,
            required_skills: &[
                "popular_education",
                "curriculum_development",
                "peer_facilitation",
            ],
            liberation_outcomes: &[
                "educational_justice",
                "cultural_curriculum",
                "leadership_development",
            ],
        },
        "policy" => CategoryProfile {
            opportunity_type: OpportunityType::CampaignLaunch,
            fixed_urgency: None,
            required_skills: &[
                "policy_analysis",
                "legislative_advocacy",
                "campaign_strategy",
            ],
            liberation_outcomes: DEFAULT_OUTCOMES,
        },
        _ => CategoryProfile {
            opportunity_type: OpportunityType::CoalitionBuilding,
            fixed_urgency: None,
            required_skills: DEFAULT_SKILLS,
            liberation_outcomes: DEFAULT_OUTCOMES,
        },
    }
}

pub fn impact_timeline(opportunity_type: OpportunityType) -> &'static str {
    match opportunity_type {
        OpportunityType::CampaignLaunch => "3-6 months",
        OpportunityType::CoalitionBuilding => "6-12 months",
        OpportunityType::ResourceMobilization => "1-3 months",
        OpportunityType::CommunityEducation => "2-4 months",
        OpportunityType::SkillSharing => "1-2 months",
    }
}

/// Delivery estimate by complexity (`low`, `medium`, `high`); unknown
/// complexity reads as medium.
pub fn timeline_estimate(opportunity_type: OpportunityType, complexity: Option<&str>) -> &'static str {
    let [low, medium, high] = match opportunity_type {
        OpportunityType::CampaignLaunch => ["2-3 months", "3-6 months", "6-12 months"],
        OpportunityType::CoalitionBuilding => ["3-6 months", "6-12 months", "12-18 months"],
        OpportunityType::ResourceMobilization => ["1-2 months", "2-4 months", "4-8 months"],
        OpportunityType::CommunityEducation => ["1-3 months", "3-6 months", "6-9 months"],
        OpportunityType::SkillSharing => ["2-4 weeks", "1-2 months", "2-4 months"],
    };
    match complexity {
        Some("low") => low,
        Some("high") => high,
        _ => medium,
    }
}

pub fn resource_profile(opportunity_type: OpportunityType) -> ResourceProfile {
    let [funding, volunteers, expertise, materials] = match opportunity_type {
        OpportunityType::CampaignLaunch => ["medium", "high", "medium", "medium"],
        OpportunityType::CoalitionBuilding => ["low", "medium", "high", "low"],
        OpportunityType::ResourceMobilization => ["high", "medium", "medium", "high"],
        OpportunityType::CommunityEducation => ["low", "high", "high", "medium"],
        OpportunityType::SkillSharing => ["low", "medium", "high", "low"],
    };
    ResourceProfile {
        funding: funding.to_string(),
        volunteers: volunteers.to_string(),
        expertise: expertise.to_string(),
        materials: materials.to_string(),
    }
}

/// Collaboration potential inputs.
pub const COLLABORATION_BASE: f64 = 60.0;
pub const COLLABORATION_BONUS_CAP: f64 = 20.0;
pub const DEFAULT_AFFECTED_POPULATION: u64 = 100;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_weights_sum_to_full_marks() {
        let max: i32 = PROPOSAL_RULES.iter().map(|r| r.reward).sum();
        assert_eq!(BASE_PROPOSAL_SCORE + max, 120);
    }

    #[test]
    fn test_penalties_never_positive() {
        assert!(PROPOSAL_RULES.iter().all(|r| r.penalty <= 0));
    }

    #[test]
    fn test_urgent_categories_have_fixed_urgency() {
        for category in ["housing", "healthcare", "safety"] {
            assert_eq!(
                category_profile(category).fixed_urgency,
                Some(UrgencyLevel::High)
            );
        }
        assert_eq!(category_profile("economic").fixed_urgency, None);
    }

    #[test]
    fn test_unknown_category_falls_back() {
        let profile = category_profile("transport");
        assert_eq!(profile.opportunity_type, OpportunityType::CoalitionBuilding);
        assert_eq!(profile.required_skills, DEFAULT_SKILLS);
        assert_eq!(profile.liberation_outcomes, DEFAULT_OUTCOMES);
    }

    #[test]
    fn test_policy_uses_default_outcomes() {
        assert_eq!(category_profile("policy").liberation_outcomes, DEFAULT_OUTCOMES);
    }

    #[test]
    fn test_timeline_estimate_by_complexity() {
        let t = OpportunityType::SkillSharing;
        assert_eq!(timeline_estimate(t, Some("low")), "2-4 weeks");
        assert_eq!(timeline_estimate(t, None), "1-2 months");
        assert_eq!(timeline_estimate(t, Some("extreme")), "1-2 months");
        assert_eq!(
            timeline_estimate(OpportunityType::CoalitionBuilding, Some("high")),
            "12-18 months"
        );
    }

    #[test]
    fn test_resource_profile_lookup() {
        let profile = resource_profile(OpportunityType::ResourceMobilization);
        assert_eq!(profile.funding, "high");
        assert_eq!(profile.materials, "high");
    }
}
