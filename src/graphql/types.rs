use crate::engine::{ProjectCreated, ValidationOutcome};
use crate::model::{
    self, CommunityValidation as ModelValidation, CrossDomainEvent,
    OrganizingOpportunity as ModelOpportunity, OrganizingProject, ResourceAllocation,
};
use async_graphql::{Enum, InputObject, Json, SimpleObject};

#[derive(Enum, Copy, Clone, Eq, PartialEq)]
#[graphql(remote = "model::ProjectType")]
pub enum ProjectType {
    Housing,
    Healthcare,
    Safety,
    Economic,
    Education,
    Policy,
}

#[derive(Enum, Copy, Clone, Eq, PartialEq)]
#[graphql(remote = "model::OrganizingStage")]
pub enum OrganizingStage {
    Awareness,
    Education,
    Action,
    Leadership,
    SystemChange,
}

#[derive(Enum, Copy, Clone, Eq, PartialEq)]
#[graphql(remote = "model::ProjectStatus")]
pub enum ProjectStatus {
    Proposed,
    Validated,
    Active,
    Completed,
    Archived,
}

#[derive(Enum, Copy, Clone, Eq, PartialEq)]
#[graphql(remote = "model::ValidationType")]
pub enum ValidationType {
    PeerReview,
    CommunityConsensus,
    ExpertValidation,
    LivedExperience,
}

#[derive(Enum, Copy, Clone, Eq, PartialEq)]
#[graphql(remote = "model::ValidationStatus")]
pub enum ValidationStatus {
    Pending,
    Approved,
    NeedsRevision,
    Rejected,
}

#[derive(Enum, Copy, Clone, Eq, PartialEq)]
#[graphql(remote = "model::RequestPriority")]
pub enum RequestPriority {
    Low,
    Medium,
    High,
}

#[derive(Enum, Copy, Clone, Eq, PartialEq)]
#[graphql(remote = "model::UrgencyLevel")]
pub enum UrgencyLevel {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Enum, Copy, Clone, Eq, PartialEq)]
#[graphql(remote = "model::OpportunityType")]
pub enum OpportunityType {
    CampaignLaunch,
    CoalitionBuilding,
    ResourceMobilization,
    SkillSharing,
    CommunityEducation,
}

#[derive(SimpleObject)]
pub struct ResourceNeed {
    pub category: String,
    pub requirement: String,
}

#[derive(SimpleObject)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    pub project_type: ProjectType,
    pub organizing_stage: OrganizingStage,
    pub journey_stage: Option<String>,
    pub community_need_areas: Vec<String>,
    pub includes_community_input: bool,
    pub resource_needs: Vec<ResourceNeed>,
    pub skills_needed: Vec<String>,
    pub community_impact_goals: Vec<String>,
    pub liberation_objectives: Vec<String>,
    pub democratic_validation_score: u8,
    pub community_support_level: u8,
    pub status: ProjectStatus,
    pub version: u64,
    pub created: String,
    pub updated: String,
}

impl From<OrganizingProject> for Project {
    fn from(p: OrganizingProject) -> Self {
        Self {
            id: p.id,
            title: p.title,
            description: p.description,
            project_type: p.project_type.into(),
            organizing_stage: p.organizing_stage.into(),
            journey_stage: p.journey_stage,
            community_need_areas: p.community_need_areas,
            includes_community_input: p.collaboration_requirements.includes_community_input,
            resource_needs: p
                .resource_needs
                .into_iter()
                .map(|(category, requirement)| ResourceNeed {
                    category,
                    requirement,
                })
                .collect(),
            skills_needed: p.skills_needed,
            community_impact_goals: p.community_impact_goals,
            liberation_objectives: p.liberation_objectives,
            democratic_validation_score: p.democratic_validation_score,
            community_support_level: p.community_support_level,
            status: p.status.into(),
            version: p.version,
            created: p.created.to_rfc3339(),
            updated: p.updated.to_rfc3339(),
        }
    }
}

#[derive(SimpleObject)]
pub struct ProjectConnection {
    pub nodes: Vec<Project>,
    pub total_count: usize,
}

#[derive(SimpleObject)]
pub struct Validation {
    pub id: String,
    pub project_id: String,
    pub validator_id: String,
    pub validation_type: ValidationType,
    pub cultural_authenticity_score: u8,
    pub liberation_alignment_score: u8,
    pub feedback_text: String,
    pub validation_status: ValidationStatus,
    pub created: String,
}

impl From<ModelValidation> for Validation {
    fn from(v: ModelValidation) -> Self {
        Self {
            id: v.id,
            project_id: v.project_id,
            validator_id: v.validator_id,
            validation_type: v.validation_type.into(),
            cultural_authenticity_score: v.cultural_authenticity_score,
            liberation_alignment_score: v.liberation_alignment_score,
            feedback_text: v.feedback_text,
            validation_status: v.validation_status.into(),
            created: v.created.to_rfc3339(),
        }
    }
}

#[derive(SimpleObject)]
pub struct Allocation {
    pub id: String,
    pub project_id: String,
    pub resource_id: String,
    pub resource_type: String,
    pub quantity_allocated: u32,
    pub priority: RequestPriority,
    pub community_validation_required: bool,
    pub created: String,
}

impl From<ResourceAllocation> for Allocation {
    fn from(a: ResourceAllocation) -> Self {
        Self {
            id: a.id,
            project_id: a.project_id,
            resource_id: a.resource_id,
            resource_type: a.resource_type,
            quantity_allocated: a.quantity_allocated,
            priority: a.priority.into(),
            community_validation_required: a.community_validation_required,
            created: a.created.to_rfc3339(),
        }
    }
}

#[derive(SimpleObject)]
pub struct ExpectedImpact {
    pub community_reach: u64,
    pub timeline: String,
    pub liberation_outcomes: Vec<String>,
}

#[derive(SimpleObject)]
pub struct ResourceProfile {
    pub funding: String,
    pub volunteers: String,
    pub expertise: String,
    pub materials: String,
}

#[derive(SimpleObject)]
pub struct Opportunity {
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
    pub source_category: String,
}

impl From<ModelOpportunity> for Opportunity {
    fn from(o: ModelOpportunity) -> Self {
        Self {
            opportunity_type: o.opportunity_type.into(),
            urgency_level: o.urgency_level.into(),
            geographic_area: o.geographic_area,
            community_readiness_score: o.community_readiness_score,
            required_skills: o.required_skills,
            expected_impact: ExpectedImpact {
                community_reach: o.expected_impact.community_reach,
                timeline: o.expected_impact.timeline,
                liberation_outcomes: o.expected_impact.liberation_outcomes,
            },
            collaboration_potential: o.collaboration_potential,
            liberation_relevance: o.liberation_relevance,
            timeline_estimate: o.timeline_estimate,
            resource_requirements: ResourceProfile {
                funding: o.resource_requirements.funding,
                volunteers: o.resource_requirements.volunteers,
                expertise: o.resource_requirements.expertise,
                materials: o.resource_requirements.materials,
            },
            source_category: o.source_category,
        }
    }
}

#[derive(SimpleObject)]
pub struct Event {
    pub id: String,
    pub event_type: String,
    pub source_domain: String,
    pub target_domains: Vec<String>,
    pub event_data: Json<serde_json::Value>,
    pub journey_context: Option<Json<serde_json::Value>>,
    pub liberation_relevance_score: u8,
    pub processing_status: String,
    pub created: String,
}

impl From<CrossDomainEvent> for Event {
    fn from(e: CrossDomainEvent) -> Self {
        Self {
            id: e.id,
            event_type: e.event_type.to_string(),
            source_domain: e.source_domain,
            target_domains: e.target_domains,
            event_data: Json(e.event_data),
            journey_context: e.journey_context.map(Json),
            liberation_relevance_score: e.liberation_relevance_score,
            processing_status: e.processing_status.to_string(),
            created: e.created.to_rfc3339(),
        }
    }
}

#[derive(SimpleObject)]
pub struct CreateProjectPayload {
    pub project_id: String,
    pub validation_needed: bool,
    pub status: ProjectStatus,
    pub validation_score: u8,
    pub support_level: u8,
}

impl From<ProjectCreated> for CreateProjectPayload {
    fn from(c: ProjectCreated) -> Self {
        Self {
            project_id: c.project_id,
            validation_needed: c.validation_needed,
            status: c.status.into(),
            validation_score: c.validation_score,
            support_level: c.support_level,
        }
    }
}

#[derive(SimpleObject)]
pub struct ValidationResult {
    pub validation_id: String,
    pub updated_score: u8,
    pub status: ProjectStatus,
}

impl From<ValidationOutcome> for ValidationResult {
    fn from(o: ValidationOutcome) -> Self {
        Self {
            validation_id: o.validation_id,
            updated_score: o.updated_score,
            status: o.status.into(),
        }
    }
}

#[derive(InputObject)]
pub struct ProjectFilterInput {
    pub status: Option<ProjectStatus>,
    pub project_type: Option<ProjectType>,
    pub organizing_stage: Option<OrganizingStage>,
}

impl From<ProjectFilterInput> for crate::storage::ProjectFilter {
    fn from(f: ProjectFilterInput) -> Self {
        Self {
            statuses: f.status.map(|s| vec![s.into()]).unwrap_or_default(),
            project_type: f.project_type.map(Into::into),
            organizing_stage: f.organizing_stage.map(Into::into),
        }
    }
}

#[derive(InputObject)]
pub struct ResourceNeedInput {
    pub category: String,
    pub requirement: String,
}

#[derive(InputObject)]
pub struct CreateProjectInput {
    pub title: String,
    pub description: Option<String>,
    pub project_type: ProjectType,
    pub organizing_stage: Option<OrganizingStage>,
    pub journey_stage: Option<String>,
    pub community_need_areas: Option<Vec<String>>,
    pub includes_community_input: Option<bool>,
    pub resource_needs: Option<Vec<ResourceNeedInput>>,
    pub skills_needed: Option<Vec<String>>,
    pub community_impact_goals: Option<Vec<String>>,
    pub liberation_objectives: Option<Vec<String>>,
}

impl From<CreateProjectInput> for model::ProjectProposal {
    fn from(input: CreateProjectInput) -> Self {
        let mut proposal = model::ProjectProposal::new(input.title, input.project_type.into())
            .with_description(input.description.unwrap_or_default())
            .with_need_areas(input.community_need_areas.unwrap_or_default())
            .with_community_input(input.includes_community_input.unwrap_or(false))
            .with_skills(input.skills_needed.unwrap_or_default())
            .with_impact_goals(input.community_impact_goals.unwrap_or_default())
            .with_liberation_objectives(input.liberation_objectives.unwrap_or_default());
        if let Some(stage) = input.organizing_stage {
            proposal = proposal.with_stage(stage.into());
        }
        proposal.journey_stage = input.journey_stage;
        for need in input.resource_needs.unwrap_or_default() {
            proposal = proposal.with_resource_need(&need.category, &need.requirement);
        }
        proposal
    }
}

#[derive(InputObject, Default)]
pub struct ProposerInput {
    pub session_id: Option<String>,
    pub empowerment_goals: Option<Vec<String>>,
    pub location: Option<String>,
}

impl From<ProposerInput> for model::ProposerContext {
    fn from(input: ProposerInput) -> Self {
        Self {
            session_id: input.session_id.unwrap_or_default(),
            empowerment_goals: input.empowerment_goals.unwrap_or_default(),
            location: input.location,
        }
    }
}

#[derive(InputObject)]
pub struct ValidationInput {
    pub validator_id: String,
    pub validation_type: ValidationType,
    pub cultural_authenticity_score: u8,
    pub liberation_alignment_score: u8,
    pub feedback_text: Option<String>,
    pub validation_status: Option<ValidationStatus>,
}

impl From<ValidationInput> for model::ValidationSubmission {
    fn from(input: ValidationInput) -> Self {
        let mut submission = model::ValidationSubmission::new(
            input.validator_id,
            input.validation_type.into(),
            input.cultural_authenticity_score,
            input.liberation_alignment_score,
        )
        .with_feedback(input.feedback_text.unwrap_or_default());
        if let Some(status) = input.validation_status {
            submission = submission.with_status(status.into());
        }
        submission
    }
}

#[derive(InputObject)]
pub struct ResourceRequestInput {
    pub resource_type: String,
    pub quantity_needed: u32,
    pub priority: Option<RequestPriority>,
}

impl From<ResourceRequestInput> for model::ResourceRequest {
    fn from(input: ResourceRequestInput) -> Self {
        let request = model::ResourceRequest::new(input.resource_type, input.quantity_needed);
        match input.priority {
            Some(priority) => request.with_priority(priority.into()),
            None => request,
        }
    }
}
