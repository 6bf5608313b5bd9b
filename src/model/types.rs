use crate::error::{OrganizerError, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    Housing,
    Healthcare,
    Safety,
    Economic,
    Education,
    Policy,
}

impl ProjectType {
    pub const ALL: [ProjectType; 6] = [
        ProjectType::Housing,
        ProjectType::Healthcare,
        ProjectType::Safety,
        ProjectType::Economic,
        ProjectType::Education,
        ProjectType::Policy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::Housing => "housing",
            ProjectType::Healthcare => "healthcare",
            ProjectType::Safety => "safety",
            ProjectType::Economic => "economic",
            ProjectType::Education => "education",
            ProjectType::Policy => "policy",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectType {
    type Err = OrganizerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "housing" => Ok(ProjectType::Housing),
            "healthcare" | "health" => Ok(ProjectType::Healthcare),
            "safety" => Ok(ProjectType::Safety),
            "economic" => Ok(ProjectType::Economic),
            "education" => Ok(ProjectType::Education),
            "policy" => Ok(ProjectType::Policy),
            _ => Err(OrganizerError::Parse(format!("Invalid project type: {}", s))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrganizingStage {
    #[default]
    Awareness,
    Education,
    Action,
    Leadership,
    SystemChange,
}

impl fmt::Display for OrganizingStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrganizingStage::Awareness => write!(f, "awareness"),
            OrganizingStage::Education => write!(f, "education"),
            OrganizingStage::Action => write!(f, "action"),
            OrganizingStage::Leadership => write!(f, "leadership"),
            OrganizingStage::SystemChange => write!(f, "system_change"),
        }
    }
}

impl FromStr for OrganizingStage {
    type Err = OrganizerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "awareness" => Ok(OrganizingStage::Awareness),
            "education" => Ok(OrganizingStage::Education),
            "action" => Ok(OrganizingStage::Action),
            "leadership" => Ok(OrganizingStage::Leadership),
            "system_change" | "system-change" | "systemchange" => {
                Ok(OrganizingStage::SystemChange)
            }
            _ => Err(OrganizerError::Parse(format!(
                "Invalid organizing stage: {}",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    #[default]
    Proposed,
    Validated,
    Active,
    Completed,
    Archived,
}

impl ProjectStatus {
    fn rank(&self) -> u8 {
        match self {
            ProjectStatus::Proposed => 0,
            ProjectStatus::Validated => 1,
            ProjectStatus::Active => 2,
            ProjectStatus::Completed => 3,
            ProjectStatus::Archived => 4,
        }
    }

    /// Statuses only move forward; archival is reachable from anywhere
    /// except itself. A proposed project has to be validated before it can
    /// go any further.
    pub fn can_transition_to(&self, next: ProjectStatus) -> bool {
        if next == ProjectStatus::Archived {
            return *self != ProjectStatus::Archived;
        }
        if *self == ProjectStatus::Proposed {
            return next == ProjectStatus::Validated;
        }
        next.rank() > self.rank()
    }

    /// Validated or active projects count as covering their need areas.
    pub fn is_engaged(&self) -> bool {
        matches!(self, ProjectStatus::Validated | ProjectStatus::Active)
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectStatus::Proposed => write!(f, "proposed"),
            ProjectStatus::Validated => write!(f, "validated"),
            ProjectStatus::Active => write!(f, "active"),
            ProjectStatus::Completed => write!(f, "completed"),
            ProjectStatus::Archived => write!(f, "archived"),
        }
    }
}

impl FromStr for ProjectStatus {
    type Err = OrganizerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "proposed" => Ok(ProjectStatus::Proposed),
            "validated" => Ok(ProjectStatus::Validated),
            "active" => Ok(ProjectStatus::Active),
            "completed" | "done" => Ok(ProjectStatus::Completed),
            "archived" => Ok(ProjectStatus::Archived),
            _ => Err(OrganizerError::Parse(format!("Invalid project status: {}", s))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationType {
    PeerReview,
    CommunityConsensus,
    ExpertValidation,
    LivedExperience,
}

impl fmt::Display for ValidationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationType::PeerReview => write!(f, "peer_review"),
            ValidationType::CommunityConsensus => write!(f, "community_consensus"),
            ValidationType::ExpertValidation => write!(f, "expert_validation"),
            ValidationType::LivedExperience => write!(f, "lived_experience"),
        }
    }
}

impl FromStr for ValidationType {
    type Err = OrganizerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "peer_review" | "peer" => Ok(ValidationType::PeerReview),
            "community_consensus" | "consensus" => Ok(ValidationType::CommunityConsensus),
            "expert_validation" | "expert" => Ok(ValidationType::ExpertValidation),
            "lived_experience" | "lived" => Ok(ValidationType::LivedExperience),
            _ => Err(OrganizerError::Parse(format!("Invalid validation type: {}", s))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStatus {
    #[default]
    Pending,
    Approved,
    NeedsRevision,
    Rejected,
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationStatus::Pending => write!(f, "pending"),
            ValidationStatus::Approved => write!(f, "approved"),
            ValidationStatus::NeedsRevision => write!(f, "needs_revision"),
            ValidationStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl FromStr for ValidationStatus {
    type Err = OrganizerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "pending" => Ok(ValidationStatus::Pending),
            "approved" => Ok(ValidationStatus::Approved),
            "needs_revision" | "revision" => Ok(ValidationStatus::NeedsRevision),
            "rejected" => Ok(ValidationStatus::Rejected),
            _ => Err(OrganizerError::Parse(format!(
                "Invalid validation status: {}",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityStatus {
    #[default]
    Available,
    Limited,
    Unavailable,
    Requested,
}

impl AvailabilityStatus {
    pub fn is_allocatable(&self) -> bool {
        matches!(self, AvailabilityStatus::Available | AvailabilityStatus::Limited)
    }
}

impl fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AvailabilityStatus::Available => write!(f, "available"),
            AvailabilityStatus::Limited => write!(f, "limited"),
            AvailabilityStatus::Unavailable => write!(f, "unavailable"),
            AvailabilityStatus::Requested => write!(f, "requested"),
        }
    }
}

impl FromStr for AvailabilityStatus {
    type Err = OrganizerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "available" => Ok(AvailabilityStatus::Available),
            "limited" => Ok(AvailabilityStatus::Limited),
            "unavailable" => Ok(AvailabilityStatus::Unavailable),
            "requested" => Ok(AvailabilityStatus::Requested),
            _ => Err(OrganizerError::Parse(format!(
                "Invalid availability status: {}",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RequestPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl fmt::Display for RequestPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestPriority::Low => write!(f, "low"),
            RequestPriority::Medium => write!(f, "medium"),
            RequestPriority::High => write!(f, "high"),
        }
    }
}

impl FromStr for RequestPriority {
    type Err = OrganizerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "low" => Ok(RequestPriority::Low),
            "medium" | "normal" => Ok(RequestPriority::Medium),
            "high" => Ok(RequestPriority::High),
            _ => Err(OrganizerError::Parse(format!("Invalid priority: {}", s))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyLevel {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl UrgencyLevel {
    pub fn weight(&self) -> u32 {
        match self {
            UrgencyLevel::Critical => 4,
            UrgencyLevel::High => 3,
            UrgencyLevel::Medium => 2,
            UrgencyLevel::Low => 1,
        }
    }

    /// Reads a recorded severity. Matching is exact, so anything else,
    /// including differently cased values, is treated as medium.
    pub fn from_severity(severity: Option<&str>) -> Self {
        match severity {
            Some("critical") => UrgencyLevel::Critical,
            Some("high") => UrgencyLevel::High,
            Some("low") => UrgencyLevel::Low,
            _ => UrgencyLevel::Medium,
        }
    }
}

impl fmt::Display for UrgencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UrgencyLevel::Low => write!(f, "low"),
            UrgencyLevel::Medium => write!(f, "medium"),
            UrgencyLevel::High => write!(f, "high"),
            UrgencyLevel::Critical => write!(f, "critical"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpportunityType {
    CampaignLaunch,
    CoalitionBuilding,
    ResourceMobilization,
    SkillSharing,
    CommunityEducation,
}

impl OpportunityType {
    /// The project type an opportunity of this kind would become.
    pub fn project_type(&self) -> ProjectType {
        match self {
            OpportunityType::CampaignLaunch => ProjectType::Policy,
            OpportunityType::CoalitionBuilding => ProjectType::Safety,
            OpportunityType::ResourceMobilization => ProjectType::Economic,
            OpportunityType::SkillSharing => ProjectType::Education,
            OpportunityType::CommunityEducation => ProjectType::Education,
        }
    }
}

impl fmt::Display for OpportunityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpportunityType::CampaignLaunch => write!(f, "campaign_launch"),
            OpportunityType::CoalitionBuilding => write!(f, "coalition_building"),
            OpportunityType::ResourceMobilization => write!(f, "resource_mobilization"),
            OpportunityType::SkillSharing => write!(f, "skill_sharing"),
            OpportunityType::CommunityEducation => write!(f, "community_education"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightType {
    Pattern,
    Gap,
    Opportunity,
}

impl fmt::Display for InsightType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InsightType::Pattern => write!(f, "pattern"),
            InsightType::Gap => write!(f, "gap"),
            InsightType::Opportunity => write!(f, "opportunity"),
        }
    }
}

impl FromStr for InsightType {
    type Err = OrganizerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "pattern" => Ok(InsightType::Pattern),
            "gap" => Ok(InsightType::Gap),
            "opportunity" => Ok(InsightType::Opportunity),
            _ => Err(OrganizerError::Parse(format!("Invalid insight type: {}", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_moves_forward_only() {
        assert!(ProjectStatus::Proposed.can_transition_to(ProjectStatus::Validated));
        assert!(ProjectStatus::Validated.can_transition_to(ProjectStatus::Active));
        assert!(ProjectStatus::Validated.can_transition_to(ProjectStatus::Completed));
        assert!(!ProjectStatus::Proposed.can_transition_to(ProjectStatus::Active));
        assert!(!ProjectStatus::Proposed.can_transition_to(ProjectStatus::Completed));
        assert!(!ProjectStatus::Active.can_transition_to(ProjectStatus::Validated));
        assert!(!ProjectStatus::Validated.can_transition_to(ProjectStatus::Validated));
        assert!(!ProjectStatus::Completed.can_transition_to(ProjectStatus::Proposed));
    }

    #[test]
    fn test_archival_from_any_state() {
        assert!(ProjectStatus::Proposed.can_transition_to(ProjectStatus::Archived));
        assert!(ProjectStatus::Completed.can_transition_to(ProjectStatus::Archived));
        assert!(!ProjectStatus::Archived.can_transition_to(ProjectStatus::Archived));
        assert!(!ProjectStatus::Archived.can_transition_to(ProjectStatus::Active));
    }

    #[test]
    fn test_project_type_parse() {
        assert_eq!("Housing".parse::<ProjectType>().unwrap(), ProjectType::Housing);
        assert!("transport".parse::<ProjectType>().is_err());
        for t in ProjectType::ALL {
            assert_eq!(t.as_str().parse::<ProjectType>().unwrap(), t);
        }
    }

    #[test]
    fn test_urgency_from_severity() {
        assert_eq!(UrgencyLevel::from_severity(Some("critical")), UrgencyLevel::Critical);
        assert_eq!(UrgencyLevel::from_severity(Some("low")), UrgencyLevel::Low);
        assert_eq!(UrgencyLevel::from_severity(Some("Critical")), UrgencyLevel::Medium);
        assert_eq!(UrgencyLevel::from_severity(Some("LOW")), UrgencyLevel::Medium);
        assert_eq!(UrgencyLevel::from_severity(Some("extreme")), UrgencyLevel::Medium);
        assert_eq!(UrgencyLevel::from_severity(None), UrgencyLevel::Medium);
    }

    #[test]
    fn test_opportunity_project_type_mapping() {
        assert_eq!(OpportunityType::CampaignLaunch.project_type(), ProjectType::Policy);
        assert_eq!(OpportunityType::CoalitionBuilding.project_type(), ProjectType::Safety);
        assert_eq!(OpportunityType::SkillSharing.project_type(), ProjectType::Education);
    }

    #[test]
    fn test_validation_status_serde() {
        let json = serde_json::to_string(&ValidationStatus::NeedsRevision).unwrap();
        assert_eq!(json, "\"needs_revision\"");
    }
}
