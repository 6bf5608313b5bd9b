use super::types::{AvailabilityStatus, RequestPriority};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A shareable entry in the resource coordination pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceRecord {
    pub id: String,
    pub resource_type: String,

    #[serde(default)]
    pub availability_status: AvailabilityStatus,

    /// Missing or zero quantities are treated as a single unit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_quantity: Option<u32>,

    #[serde(default)]
    pub cultural_competency_level: u8,

    #[serde(default)]
    pub liberation_alignment_score: u8,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub geographic_coverage: Vec<String>,

    #[serde(default)]
    pub version: u64,
}

impl ResourceRecord {
    pub fn new(id: String, resource_type: impl Into<String>, quantity: u32) -> Self {
        Self {
            id,
            resource_type: resource_type.into(),
            availability_status: AvailabilityStatus::Available,
            available_quantity: Some(quantity),
            cultural_competency_level: 0,
            liberation_alignment_score: 0,
            geographic_coverage: Vec::new(),
            version: 0,
        }
    }

    pub fn with_scores(mut self, cultural_competency: u8, liberation_alignment: u8) -> Self {
        self.cultural_competency_level = cultural_competency;
        self.liberation_alignment_score = liberation_alignment;
        self
    }

    pub fn with_status(mut self, status: AvailabilityStatus) -> Self {
        self.availability_status = status;
        self
    }

    pub fn effective_quantity(&self) -> u32 {
        match self.available_quantity {
            Some(q) if q > 0 => q,
            _ => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceRequest {
    pub resource_type: String,
    pub quantity_needed: u32,

    #[serde(default)]
    pub priority: RequestPriority,
}

impl ResourceRequest {
    pub fn new(resource_type: impl Into<String>, quantity_needed: u32) -> Self {
        Self {
            resource_type: resource_type.into(),
            quantity_needed,
            priority: RequestPriority::default(),
        }
    }

    pub fn with_priority(mut self, priority: RequestPriority) -> Self {
        self.priority = priority;
        self
    }
}

/// Links a project to what it consumed from the pool. Written once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceAllocation {
    pub id: String,
    pub project_id: String,
    pub resource_id: String,
    pub resource_type: String,
    pub quantity_allocated: u32,
    pub priority: RequestPriority,
    pub community_validation_required: bool,

    #[serde(default)]
    pub created: DateTime<Utc>,
}
