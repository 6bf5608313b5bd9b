//! The organizing coordination engine.
//!
//! [`OrganizingEngine`] is the public surface. It wires five components over
//! injected [`Stores`]:
//!
//! - [`ProposalValidator`]: rule-table scoring and support estimation
//! - [`ValidationAggregator`]: folds community reviews into a score
//! - [`ResourceAllocator`]: matches requests against the shared pool
//! - [`OpportunityDiscoverer`]: ranks opportunities from community patterns
//! - [`EventNotifier`]: fire-and-forget cross-domain events
//!
//! All operations are synchronous and hold no state between calls beyond
//! what lives in the stores.

pub mod aggregator;
pub mod allocator;
pub mod discovery;
pub mod notifier;
pub mod proposal;
pub mod rules;

pub use aggregator::{ValidationAggregator, ValidationOutcome, aggregate_score};
pub use allocator::ResourceAllocator;
pub use discovery::OpportunityDiscoverer;
pub use notifier::{EventDraft, EventNotifier};
pub use proposal::{ProposalAssessment, ProposalValidator, RuleOutcome};

use crate::config::OrganizerConfig;
use crate::error::{OrganizerError, Result, StoreError};
use crate::model::{
    CommunityValidation, CrossDomainEvent, EventType, OrganizingOpportunity, OrganizingProject,
    ProjectProposal, ProjectStatus, ProposerContext, ResourceAllocation, ResourceRequest,
    ValidationSubmission, generate_id,
};
use crate::storage::{ProjectFilter, Stores};
use crate::validation;
use serde::Serialize;
use serde_json::json;

/// Active projects returned per query.
pub const ACTIVE_PROJECT_LIMIT: usize = 20;
/// Initial support above which a new project starts out validated.
pub const AUTO_VALIDATE_SUPPORT: u8 = 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    pub id_prefix: String,
    pub id_length: usize,
    pub max_attempts: u32,
}

impl Default for EngineSettings {
    fn default() -> Self {
        let config = OrganizerConfig::default();
        Self::from(&config)
    }
}

impl From<&OrganizerConfig> for EngineSettings {
    fn from(config: &OrganizerConfig) -> Self {
        Self {
            id_prefix: config.store.prefix.clone(),
            id_length: config.store.id_length,
            max_attempts: config.allocation.max_attempts,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectCreated {
    pub project_id: String,
    /// True when the project still needs community review.
    pub validation_needed: bool,
    pub status: ProjectStatus,
    pub validation_score: u8,
    pub support_level: u8,
}

#[derive(Clone)]
pub struct OrganizingEngine {
    settings: EngineSettings,
    stores: Stores,
    validator: ProposalValidator,
    aggregator: ValidationAggregator,
    allocator: ResourceAllocator,
    discoverer: OpportunityDiscoverer,
    notifier: EventNotifier,
}

impl OrganizingEngine {
    pub fn new(stores: Stores, settings: EngineSettings) -> Self {
        let notifier = EventNotifier::new(stores.events.clone());
        let validator = ProposalValidator::new(stores.insights.clone());
        let aggregator = ValidationAggregator::new(
            stores.projects.clone(),
            stores.validations.clone(),
            notifier.clone(),
            settings.max_attempts,
        );
        let allocator = ResourceAllocator::new(
            stores.projects.clone(),
            stores.resources.clone(),
            settings.max_attempts,
        );
        let discoverer =
            OpportunityDiscoverer::new(stores.insights.clone(), stores.projects.clone());

        Self {
            settings,
            stores,
            validator,
            aggregator,
            allocator,
            discoverer,
            notifier,
        }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Scores the proposal and, when it passes, stores it and announces it.
    /// A failing proposal returns `OrganizerError::Validation` with feedback.
    pub fn create_project(
        &self,
        proposal: ProjectProposal,
        context: &ProposerContext,
    ) -> Result<ProjectCreated> {
        validation::validate_proposal(&proposal)?;
        tracing::info!(
            title = %proposal.title,
            project_type = %proposal.project_type,
            "Creating organizing project"
        );

        let assessment = self.validator.validate(&proposal, context);
        if !assessment.passes {
            tracing::info!(
                title = %proposal.title,
                score = assessment.score,
                "Proposal needs refinement"
            );
            return Err(OrganizerError::Validation {
                score: assessment.score,
                feedback: assessment.feedback,
            });
        }

        let support = self.validator.community_support(&proposal);
        let status = if support > AUTO_VALIDATE_SUPPORT {
            ProjectStatus::Validated
        } else {
            ProjectStatus::Proposed
        };

        let id = generate_id(&self.settings.id_prefix, self.settings.id_length);
        let project = OrganizingProject::from_proposal(id, proposal)
            .with_scores(assessment.score, support)
            .with_status(status);
        self.stores.projects.insert_project(&project).map_err(|e| {
            tracing::error!(project_id = %project.id, error = %e, "Failed to store project");
            OrganizerError::from(e)
        })?;

        self.notifier.emit(
            EventDraft::new(EventType::CommunityNotification, &["community", "social"])
                .with_data(json!({
                    "notification_type": "new_project_review",
                    "project_id": project.id,
                    "project_title": project.title,
                    "project_type": project.project_type,
                    "review_needed": true,
                }))
                .with_relevance(80),
        );
        self.notifier.emit(
            EventDraft::new(EventType::ProjectUpdate, &["community", "core", "social"])
                .with_data(json!({
                    "project_id": project.id,
                    "project_type": project.project_type,
                    "organizing_stage": project.organizing_stage,
                    "community_impact_goals": project.community_impact_goals,
                }))
                .with_journey_context(json!({
                    "stage": project.journey_stage,
                    "liberation_objectives": project.liberation_objectives,
                }))
                .with_relevance(assessment.score),
        );

        tracing::info!(
            project_id = %project.id,
            score = assessment.score,
            support,
            status = %status,
            "Project created"
        );
        Ok(ProjectCreated {
            project_id: project.id,
            validation_needed: status == ProjectStatus::Proposed,
            status,
            validation_score: assessment.score,
            support_level: support,
        })
    }

    pub fn submit_community_validation(
        &self,
        project_id: &str,
        submission: ValidationSubmission,
    ) -> Result<ValidationOutcome> {
        self.aggregator.submit(project_id, submission)
    }

    pub fn recalculate_project_validation(&self, project_id: &str) -> Result<u8> {
        validation::validate_id(project_id)?;
        self.aggregator.recalculate(project_id)
    }

    pub fn allocate_resources(
        &self,
        project_id: &str,
        requests: &[ResourceRequest],
    ) -> Result<Vec<ResourceAllocation>> {
        self.allocator.allocate(project_id, requests)
    }

    pub fn identify_organizing_opportunities(
        &self,
        geographic_area: Option<&str>,
        focus_areas: &[String],
    ) -> Vec<OrganizingOpportunity> {
        self.discoverer.discover(geographic_area, focus_areas)
    }

    /// Validated and active projects, strongest support first. Any status
    /// list in `filter` is ignored.
    pub fn active_projects(&self, filter: &ProjectFilter) -> Result<Vec<OrganizingProject>> {
        let filter = ProjectFilter {
            statuses: ProjectFilter::engaged().statuses,
            ..filter.clone()
        };
        let mut projects = self.stores.projects.list_projects(&filter)?;
        projects.sort_by(|a, b| {
            b.community_support_level
                .cmp(&a.community_support_level)
                .then_with(|| a.id.cmp(&b.id))
        });
        projects.truncate(ACTIVE_PROJECT_LIMIT);
        Ok(projects)
    }

    /// Operational status change. Only forward moves and archival are
    /// allowed, and `validated` still needs the support or score gate.
    pub fn update_project_status(
        &self,
        project_id: &str,
        status: ProjectStatus,
    ) -> Result<OrganizingProject> {
        validation::validate_id(project_id)?;

        let mut attempt = 1;
        loop {
            let mut project = self
                .stores
                .projects
                .get_project(project_id)
                .map_err(OrganizerError::from_lookup)?;
            let previous = project.status;

            if !previous.can_transition_to(status) {
                return Err(OrganizerError::InvalidTransition {
                    from: previous.to_string(),
                    to: status.to_string(),
                });
            }
            if status == ProjectStatus::Validated {
                let review_score = self.aggregator.recalculate(project_id)?;
                if !project.meets_validation_gate(review_score) {
                    return Err(OrganizerError::NotEligible(format!(
                        "project {} has support {} and review score {}",
                        project_id, project.community_support_level, review_score
                    )));
                }
            }

            project.status = status;
            match self.stores.projects.update_project(&project) {
                Ok(saved) => {
                    tracing::info!(
                        project_id,
                        from = %previous,
                        to = %status,
                        "Project status changed"
                    );
                    self.notifier.emit(
                        EventDraft::new(EventType::ProjectUpdate, &["community", "core"])
                            .with_data(json!({
                                "update_type": "status_changed",
                                "project_id": project_id,
                                "previous_status": previous,
                                "status": status,
                            })),
                    );
                    return Ok(saved);
                }
                Err(StoreError::Conflict(_)) if attempt < self.settings.max_attempts => {
                    tracing::debug!(
                        project_id,
                        attempt,
                        "Project changed underneath, retrying status change"
                    );
                    attempt += 1;
                }
                Err(e) => {
                    tracing::error!(project_id, error = %e, "Failed to update project status");
                    return Err(e.into());
                }
            }
        }
    }

    pub fn get_project(&self, project_id: &str) -> Result<OrganizingProject> {
        validation::validate_id(project_id)?;
        self.stores
            .projects
            .get_project(project_id)
            .map_err(OrganizerError::from_lookup)
    }

    pub fn list_projects(&self, filter: &ProjectFilter) -> Result<Vec<OrganizingProject>> {
        Ok(self.stores.projects.list_projects(filter)?)
    }

    pub fn validations_for(&self, project_id: &str) -> Result<Vec<CommunityValidation>> {
        validation::validate_id(project_id)?;
        Ok(self.stores.validations.validations_for(project_id)?)
    }

    pub fn allocations_for(&self, project_id: &str) -> Result<Vec<ResourceAllocation>> {
        validation::validate_id(project_id)?;
        Ok(self.stores.resources.allocations_for(project_id)?)
    }

    pub fn recent_events(&self, limit: usize) -> Result<Vec<CrossDomainEvent>> {
        Ok(self.stores.events.recent_events(limit)?)
    }
}
