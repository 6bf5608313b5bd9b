use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventType {
    ProjectUpdate,
    CommunityNotification,
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventType::ProjectUpdate => write!(f, "ProjectUpdate"),
            EventType::CommunityNotification => write!(f, "CommunityNotification"),
        }
    }
}

/// Advanced by downstream consumers; always `pending` when written here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingStatus {
    #[default]
    Pending,
    Processing,
    Processed,
    Failed,
}

impl fmt::Display for ProcessingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessingStatus::Pending => write!(f, "pending"),
            ProcessingStatus::Processing => write!(f, "processing"),
            ProcessingStatus::Processed => write!(f, "processed"),
            ProcessingStatus::Failed => write!(f, "failed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossDomainEvent {
    pub id: String,
    pub event_type: EventType,
    pub source_domain: String,
    pub target_domains: Vec<String>,
    pub event_data: serde_json::Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub journey_context: Option<serde_json::Value>,

    pub liberation_relevance_score: u8,

    #[serde(default)]
    pub processing_status: ProcessingStatus,

    pub cultural_sensitivity_check: bool,
    pub community_consent_verified: bool,

    #[serde(default)]
    pub created: DateTime<Utc>,
}
