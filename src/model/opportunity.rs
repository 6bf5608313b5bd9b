use super::types::{OpportunityType, UrgencyLevel};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpectedImpact {
    pub community_reach: u64,
    pub timeline: String,
    pub liberation_outcomes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceProfile {
    pub funding: String,
    pub volunteers: String,
    pub expertise: String,
    pub materials: String,
}

/// A ranked candidate initiative derived from pattern data. Recomputed on
/// every discovery run and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizingOpportunity {
    pub opportunity_type: OpportunityType,
    pub urgency_level: UrgencyLevel,
    pub geographic_area: String,
    pub community_readiness_score: u32,
    pub required_skills: Vec<String>,
    pub expected_impact: ExpectedImpact,
    pub collaboration_potential: u32,
    pub liberation_relevance: f64,
    pub timeline_estimate: String,
    pub resource_requirements: ResourceProfile,

    /// The insight category this opportunity was expanded from.
    pub source_category: String,
}

impl OrganizingOpportunity {
    pub fn rank_score(&self) -> u32 {
        self.urgency_level.weight() * 10 + self.community_readiness_score
    }
}
