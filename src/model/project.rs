use super::types::{OrganizingStage, ProjectStatus, ProjectType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Free-form collaboration settings; only `includes_community_input` is
/// interpreted by the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollaborationRequirements {
    #[serde(default)]
    pub includes_community_input: bool,

    #[serde(default, flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// A project as submitted, before scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectProposal {
    pub title: String,

    #[serde(default)]
    pub description: String,

    pub project_type: ProjectType,

    #[serde(default)]
    pub organizing_stage: OrganizingStage,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub journey_stage: Option<String>,

    #[serde(default)]
    pub community_need_areas: Vec<String>,

    #[serde(default)]
    pub collaboration_requirements: CollaborationRequirements,

    #[serde(default)]
    pub resource_needs: BTreeMap<String, String>,

    #[serde(default)]
    pub skills_needed: Vec<String>,

    #[serde(default)]
    pub community_impact_goals: Vec<String>,

    #[serde(default)]
    pub liberation_objectives: Vec<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub success_metrics: BTreeMap<String, serde_json::Value>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub coordinator_info: BTreeMap<String, serde_json::Value>,
}

impl ProjectProposal {
    pub fn new(title: impl Into<String>, project_type: ProjectType) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            project_type,
            organizing_stage: OrganizingStage::default(),
            journey_stage: None,
            community_need_areas: Vec::new(),
            collaboration_requirements: CollaborationRequirements::default(),
            resource_needs: BTreeMap::new(),
            skills_needed: Vec::new(),
            community_impact_goals: Vec::new(),
            liberation_objectives: Vec::new(),
            success_metrics: BTreeMap::new(),
            coordinator_info: BTreeMap::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_stage(mut self, stage: OrganizingStage) -> Self {
        self.organizing_stage = stage;
        self
    }

    pub fn with_need_areas(mut self, areas: Vec<String>) -> Self {
        self.community_need_areas = areas;
        self
    }

    pub fn with_community_input(mut self, includes: bool) -> Self {
        self.collaboration_requirements.includes_community_input = includes;
        self
    }

    pub fn with_resource_need(mut self, category: &str, requirement: &str) -> Self {
        self.resource_needs
            .insert(category.to_string(), requirement.to_string());
        self
    }

    pub fn with_skills(mut self, skills: Vec<String>) -> Self {
        self.skills_needed = skills;
        self
    }

    pub fn with_impact_goals(mut self, goals: Vec<String>) -> Self {
        self.community_impact_goals = goals;
        self
    }

    pub fn with_liberation_objectives(mut self, objectives: Vec<String>) -> Self {
        self.liberation_objectives = objectives;
        self
    }
}

/// Who is proposing, as far as scoring cares.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProposerContext {
    #[serde(default)]
    pub session_id: String,

    #[serde(default)]
    pub empowerment_goals: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl ProposerContext {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            ..Self::default()
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// An empty string counts as no location.
    pub fn has_location(&self) -> bool {
        self.location.as_deref().is_some_and(|l| !l.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizingProject {
    pub id: String,
    pub title: String,

    pub project_type: ProjectType,

    #[serde(default)]
    pub organizing_stage: OrganizingStage,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub journey_stage: Option<String>,

    #[serde(default)]
    pub community_need_areas: Vec<String>,

    #[serde(default)]
    pub collaboration_requirements: CollaborationRequirements,

    #[serde(default)]
    pub resource_needs: BTreeMap<String, String>,

    #[serde(default)]
    pub skills_needed: Vec<String>,

    #[serde(default)]
    pub community_impact_goals: Vec<String>,

    #[serde(default)]
    pub liberation_objectives: Vec<String>,

    #[serde(default)]
    pub democratic_validation_score: u8,

    #[serde(default)]
    pub community_support_level: u8,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub success_metrics: BTreeMap<String, serde_json::Value>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub coordinator_info: BTreeMap<String, serde_json::Value>,

    #[serde(default)]
    pub status: ProjectStatus,

    /// Bumped by the store on every successful write.
    #[serde(default)]
    pub version: u64,

    #[serde(default)]
    pub created: DateTime<Utc>,

    #[serde(default)]
    pub updated: DateTime<Utc>,

    #[serde(skip)]
    pub description: String,
}

impl OrganizingProject {
    pub fn from_proposal(id: String, proposal: ProjectProposal) -> Self {
        let now = Utc::now();
        Self {
            id,
            title: proposal.title,
            project_type: proposal.project_type,
            organizing_stage: proposal.organizing_stage,
            journey_stage: proposal.journey_stage,
            community_need_areas: proposal.community_need_areas,
            collaboration_requirements: proposal.collaboration_requirements,
            resource_needs: proposal.resource_needs,
            skills_needed: proposal.skills_needed,
            community_impact_goals: proposal.community_impact_goals,
            liberation_objectives: proposal.liberation_objectives,
            democratic_validation_score: 0,
            community_support_level: 0,
            success_metrics: proposal.success_metrics,
            coordinator_info: proposal.coordinator_info,
            status: ProjectStatus::default(),
            version: 0,
            created: now,
            updated: now,
            description: proposal.description,
        }
    }

    pub fn with_status(mut self, status: ProjectStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_scores(mut self, validation_score: u8, support_level: u8) -> Self {
        self.democratic_validation_score = validation_score;
        self.community_support_level = support_level;
        self
    }

    pub fn touch(&mut self) {
        self.updated = Utc::now();
    }

    /// The `validated` gate: strong initial support or a passing aggregate
    /// of community reviews. The stored validation score is not enough on
    /// its own since it starts out as the proposal score.
    pub fn meets_validation_gate(&self, review_score: u8) -> bool {
        self.community_support_level > 60 || review_score >= 75
    }

    /// Substring containment in either direction against any need area.
    pub fn covers_area(&self, area: &str) -> bool {
        self.community_need_areas
            .iter()
            .any(|need| area.contains(need.as_str()) || need.contains(area))
    }
}
