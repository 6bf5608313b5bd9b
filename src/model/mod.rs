//! Data models for the organizing engine.
//!
//! - [`OrganizingProject`]: a proposed or running community initiative
//! - [`CommunityValidation`]: one reviewer's assessment of a project
//! - [`ResourceRecord`] and [`ResourceAllocation`]: the shared pool and what
//!   projects took from it
//! - [`CommunityInsight`]: pattern data read from the insight store
//! - [`OrganizingOpportunity`]: derived, ranked candidate initiatives
//! - [`CrossDomainEvent`]: notifications for other subsystems

mod community_validation;
mod event;
mod insight;
mod opportunity;
mod project;
mod resource;
mod types;

pub use community_validation::{CommunityValidation, ValidationSubmission};
pub use event::{CrossDomainEvent, EventType, ProcessingStatus};
pub use insight::{CommunityInsight, InsightFilter, PatternData};
pub use opportunity::{ExpectedImpact, OrganizingOpportunity, ResourceProfile};
pub use project::{CollaborationRequirements, OrganizingProject, ProjectProposal, ProposerContext};
pub use resource::{ResourceAllocation, ResourceRecord, ResourceRequest};
pub use types::{
    AvailabilityStatus, InsightType, OpportunityType, OrganizingStage, ProjectStatus, ProjectType,
    RequestPriority, UrgencyLevel, ValidationStatus, ValidationType,
};

const ID_ALPHABET: [char; 36] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i',
    'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

/// Prefix plus a random lowercase alphanumeric suffix.
pub fn generate_id(prefix: &str, length: usize) -> String {
    let suffix = nanoid::format(nanoid::rngs::default, &ID_ALPHABET, length);
    format!("{}{}", prefix, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_shape() {
        let id = generate_id("org-", 8);
        assert!(id.starts_with("org-"));
        assert_eq!(id.len(), 12);
        assert!(id[4..].chars().all(|c| ID_ALPHABET.contains(&c)));
    }

    #[test]
    fn test_generate_id_unique() {
        assert_ne!(generate_id("val-", 10), generate_id("val-", 10));
    }
}
