use super::notifier::{EventDraft, EventNotifier};
use super::proposal::clamp_score;
use crate::error::{OrganizerError, Result, StoreError};
use crate::model::{
    CommunityValidation, EventType, ProjectStatus, ValidationSubmission, generate_id,
};
use crate::storage::{ProjectStore, ValidationStore};
use crate::validation;
use serde_json::json;
use std::sync::Arc;

/// Score with no validations at all.
pub const NEUTRAL_SCORE: u8 = 50;
/// Score when validations exist but none are approved.
pub const NO_APPROVALS_SCORE: u8 = 40;
/// Aggregate at which a project becomes validated.
pub const VALIDATION_THRESHOLD: u8 = 75;

const AUTHENTICITY_WEIGHT: f64 = 0.4;
const LIBERATION_WEIGHT: f64 = 0.4;
const PER_APPROVAL_BONUS: f64 = 5.0;
const MAX_APPROVAL_BONUS: f64 = 20.0;

/// Folds a set of reviews into a democratic validation score.
pub fn aggregate_score(validations: &[CommunityValidation]) -> u8 {
    if validations.is_empty() {
        return NEUTRAL_SCORE;
    }

    let approved: Vec<&CommunityValidation> =
        validations.iter().filter(|v| v.is_approved()).collect();
    if approved.is_empty() {
        return NO_APPROVALS_SCORE;
    }

    let count = approved.len() as f64;
    let avg_authenticity = approved
        .iter()
        .map(|v| f64::from(v.cultural_authenticity_score))
        .sum::<f64>()
        / count;
    let avg_liberation = approved
        .iter()
        .map(|v| f64::from(v.liberation_alignment_score))
        .sum::<f64>()
        / count;
    let approval_bonus = (count * PER_APPROVAL_BONUS).min(MAX_APPROVAL_BONUS);

    let score = (avg_authenticity * AUTHENTICITY_WEIGHT
        + avg_liberation * LIBERATION_WEIGHT
        + approval_bonus)
        .round();
    clamp_score(score as i32)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub validation_id: String,
    pub updated_score: u8,
    pub status: ProjectStatus,
}

/// Records community reviews and promotes projects whose aggregate clears
/// the threshold.
#[derive(Clone)]
pub struct ValidationAggregator {
    projects: Arc<dyn ProjectStore>,
    validations: Arc<dyn ValidationStore>,
    notifier: EventNotifier,
    max_attempts: u32,
}

impl ValidationAggregator {
    pub fn new(
        projects: Arc<dyn ProjectStore>,
        validations: Arc<dyn ValidationStore>,
        notifier: EventNotifier,
        max_attempts: u32,
    ) -> Self {
        Self {
            projects,
            validations,
            notifier,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Recomputes from every stored review. Pure read: calling it twice
    /// without new reviews returns the same value.
    pub fn recalculate(&self, project_id: &str) -> Result<u8> {
        let validations = self.validations.validations_for(project_id)?;
        Ok(aggregate_score(&validations))
    }

    pub fn submit(
        &self,
        project_id: &str,
        submission: ValidationSubmission,
    ) -> Result<ValidationOutcome> {
        validation::validate_id(project_id)?;
        validation::validate_submission(&submission)?;
        self.projects
            .get_project(project_id)
            .map_err(OrganizerError::from_lookup)?;

        let record = CommunityValidation::record(generate_id("val-", 10), project_id, submission);
        self.validations.insert_validation(&record).map_err(|e| {
            tracing::error!(project_id, error = %e, "Failed to store community validation");
            OrganizerError::from(e)
        })?;
        tracing::info!(
            project_id,
            validation_id = %record.id,
            validation_status = %record.validation_status,
            "Community validation submitted"
        );

        let mut attempt = 1;
        loop {
            match self.apply_score(project_id) {
                Ok((score, status)) => {
                    return Ok(ValidationOutcome {
                        validation_id: record.id,
                        updated_score: score,
                        status,
                    });
                }
                Err(OrganizerError::Store(StoreError::Conflict(_))) if attempt < self.max_attempts => {
                    tracing::debug!(project_id, attempt, "Project changed underneath, recomputing");
                    attempt += 1;
                }
                Err(e) => {
                    tracing::error!(project_id, error = %e, "Failed to update project validation");
                    return Err(e);
                }
            }
        }
    }

    /// Reads the project and its reviews, and persists the promotion when
    /// the aggregate reaches the threshold.
    fn apply_score(&self, project_id: &str) -> Result<(u8, ProjectStatus)> {
        let mut project = self
            .projects
            .get_project(project_id)
            .map_err(OrganizerError::from_lookup)?;
        let score = self.recalculate(project_id)?;
        tracing::debug!(project_id, score, "Validation score recalculated");

        if score < VALIDATION_THRESHOLD {
            return Ok((score, project.status));
        }

        if project.status.can_transition_to(ProjectStatus::Validated) {
            project.status = ProjectStatus::Validated;
        }
        project.democratic_validation_score = score;
        let saved = self.projects.update_project(&project)?;
        tracing::info!(project_id, score, status = %saved.status, "Validation score persisted");

        // Projects already past validation keep their status and stay quiet.
        if saved.status == ProjectStatus::Validated {
            self.notifier.emit(
                EventDraft::new(EventType::ProjectUpdate, &["community", "social", "core"])
                    .with_data(json!({
                        "update_type": "project_validated",
                        "project_id": project_id,
                        "status": saved.status,
                        "democratic_validation_score": score,
                        "call_to_action": true,
                    }))
                    .with_relevance(90),
            );
        }

        Ok((score, saved.status))
    }
}
