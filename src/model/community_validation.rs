use super::types::{ValidationStatus, ValidationType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A reviewer's assessment as submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationSubmission {
    pub validator_id: String,
    pub validation_type: ValidationType,

    #[serde(default)]
    pub validation_criteria: Vec<String>,

    pub cultural_authenticity_score: u8,
    pub liberation_alignment_score: u8,

    #[serde(default)]
    pub feedback_text: String,

    #[serde(default)]
    pub validation_status: ValidationStatus,
}

impl ValidationSubmission {
    pub fn new(
        validator_id: impl Into<String>,
        validation_type: ValidationType,
        cultural_authenticity_score: u8,
        liberation_alignment_score: u8,
    ) -> Self {
        Self {
            validator_id: validator_id.into(),
            validation_type,
            validation_criteria: Vec::new(),
            cultural_authenticity_score,
            liberation_alignment_score,
            feedback_text: String::new(),
            validation_status: ValidationStatus::default(),
        }
    }

    pub fn with_status(mut self, status: ValidationStatus) -> Self {
        self.validation_status = status;
        self
    }

    pub fn with_feedback(mut self, feedback: impl Into<String>) -> Self {
        self.feedback_text = feedback.into();
        self
    }
}

/// A stored assessment. Never edited; corrections are new records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunityValidation {
    pub id: String,
    pub project_id: String,
    pub validator_id: String,
    pub validation_type: ValidationType,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validation_criteria: Vec<String>,

    pub cultural_authenticity_score: u8,
    pub liberation_alignment_score: u8,

    #[serde(default)]
    pub feedback_text: String,

    #[serde(default)]
    pub validation_status: ValidationStatus,

    #[serde(default)]
    pub created: DateTime<Utc>,
}

impl CommunityValidation {
    pub fn record(id: String, project_id: &str, submission: ValidationSubmission) -> Self {
        Self {
            id,
            project_id: project_id.to_string(),
            validator_id: submission.validator_id,
            validation_type: submission.validation_type,
            validation_criteria: submission.validation_criteria,
            cultural_authenticity_score: submission.cultural_authenticity_score,
            liberation_alignment_score: submission.liberation_alignment_score,
            feedback_text: submission.feedback_text,
            validation_status: submission.validation_status,
            created: Utc::now(),
        }
    }

    pub fn is_approved(&self) -> bool {
        self.validation_status == ValidationStatus::Approved
    }
}
