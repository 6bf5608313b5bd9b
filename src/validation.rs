//! Input validation for proposals, reviews and resource requests.
//!
//! These checks reject malformed input before any scoring happens. They are
//! separate from proposal scoring, which never rejects on shape alone.

use crate::error::{OrganizerError, Result};
use crate::model::{ProjectProposal, ResourceRequest, ValidationSubmission};

/// Maximum allowed length for a project title.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum allowed length for a project description.
pub const MAX_DESCRIPTION_LENGTH: usize = 10_000;

/// Maximum allowed length for a record ID.
pub const MAX_ID_LENGTH: usize = 64;

/// Upper bound of every 0..=100 score.
pub const MAX_SCORE: u8 = 100;

/// Characters forbidden in IDs to prevent path traversal.
const FORBIDDEN_ID_CHARS: &[char] = &['/', '\\', '\0'];

pub fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(OrganizerError::InvalidInput(
            "Title cannot be empty".to_string(),
        ));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(OrganizerError::InvalidInput(format!(
            "Title exceeds maximum length of {} characters",
            MAX_TITLE_LENGTH
        )));
    }
    Ok(())
}

pub fn validate_description(description: &str) -> Result<()> {
    if description.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(OrganizerError::InvalidInput(format!(
            "Description exceeds maximum length of {} characters",
            MAX_DESCRIPTION_LENGTH
        )));
    }
    Ok(())
}

/// Validates a record ID to prevent path traversal attacks.
pub fn validate_id(id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(OrganizerError::InvalidInput("ID cannot be empty".to_string()));
    }
    if id.len() > MAX_ID_LENGTH {
        return Err(OrganizerError::InvalidInput(format!(
            "ID exceeds maximum length of {} characters",
            MAX_ID_LENGTH
        )));
    }
    if id.contains("..") {
        return Err(OrganizerError::InvalidInput(
            "ID cannot contain '..' (path traversal)".to_string(),
        ));
    }
    for c in FORBIDDEN_ID_CHARS {
        if id.contains(*c) {
            return Err(OrganizerError::InvalidInput(format!(
                "ID cannot contain '{}'",
                c
            )));
        }
    }
    Ok(())
}

pub fn validate_score(name: &str, score: u8) -> Result<()> {
    if score > MAX_SCORE {
        return Err(OrganizerError::InvalidInput(format!(
            "{} must be between 0 and {}, got {}",
            name, MAX_SCORE, score
        )));
    }
    Ok(())
}

pub fn validate_proposal(proposal: &ProjectProposal) -> Result<()> {
    validate_title(&proposal.title)?;
    validate_description(&proposal.description)
}

pub fn validate_submission(submission: &ValidationSubmission) -> Result<()> {
    if submission.validator_id.trim().is_empty() {
        return Err(OrganizerError::InvalidInput(
            "Validator ID cannot be empty".to_string(),
        ));
    }
    validate_score(
        "cultural_authenticity_score",
        submission.cultural_authenticity_score,
    )?;
    validate_score(
        "liberation_alignment_score",
        submission.liberation_alignment_score,
    )
}

pub fn validate_request(request: &ResourceRequest) -> Result<()> {
    if request.resource_type.trim().is_empty() {
        return Err(OrganizerError::InvalidInput(
            "Resource type cannot be empty".to_string(),
        ));
    }
    if request.quantity_needed == 0 {
        return Err(OrganizerError::InvalidInput(format!(
            "Quantity for '{}' must be at least 1",
            request.resource_type
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ProjectType, ValidationType};

    #[test]
    fn test_validate_title_empty() {
        assert!(validate_title("").is_err());
        assert!(validate_title("   ").is_err());
    }

    #[test]
    fn test_validate_title_too_long() {
        let long_title = "a".repeat(MAX_TITLE_LENGTH + 1);
        assert!(validate_title(&long_title).is_err());
        assert!(validate_title("Tenant union").is_ok());
    }

    #[test]
    fn test_length_limits_count_characters() {
        let title = "é".repeat(MAX_TITLE_LENGTH);
        assert!(title.len() > MAX_TITLE_LENGTH);
        assert!(validate_title(&title).is_ok());
        assert!(validate_title(&"é".repeat(MAX_TITLE_LENGTH + 1)).is_err());

        assert!(validate_description(&"ł".repeat(MAX_DESCRIPTION_LENGTH)).is_ok());
        assert!(validate_description(&"ł".repeat(MAX_DESCRIPTION_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_validate_id_path_traversal() {
        assert!(validate_id("../../../etc/passwd").is_err());
        assert!(validate_id("org/1234").is_err());
        assert!(validate_id("org-1234").is_ok());
    }

    #[test]
    fn test_validate_submission_score_range() {
        let ok = ValidationSubmission::new("v1", ValidationType::PeerReview, 100, 0);
        assert!(validate_submission(&ok).is_ok());

        let too_high = ValidationSubmission::new("v1", ValidationType::PeerReview, 101, 50);
        assert!(validate_submission(&too_high).is_err());

        let anonymous = ValidationSubmission::new(" ", ValidationType::PeerReview, 50, 50);
        assert!(validate_submission(&anonymous).is_err());
    }

    #[test]
    fn test_validate_request_quantity() {
        assert!(validate_request(&ResourceRequest::new("funding", 0)).is_err());
        assert!(validate_request(&ResourceRequest::new("", 2)).is_err());
        assert!(validate_request(&ResourceRequest::new("funding", 2)).is_ok());
    }

    #[test]
    fn test_validate_proposal_description_length() {
        let proposal = ProjectProposal::new("Clinic", ProjectType::Healthcare)
            .with_description("x".repeat(MAX_DESCRIPTION_LENGTH + 1));
        assert!(validate_proposal(&proposal).is_err());
    }
}
