use crate::model::{CrossDomainEvent, EventType, ProcessingStatus, generate_id};
use crate::storage::EventStore;
use chrono::Utc;
use serde_json::Value;
use std::sync::Arc;

pub const SOURCE_DOMAIN: &str = "organizing";
pub const DEFAULT_LIBERATION_RELEVANCE: u8 = 50;

/// An event before it is stamped and written.
#[derive(Debug, Clone, PartialEq)]
pub struct EventDraft {
    pub event_type: EventType,
    pub target_domains: Vec<String>,
    pub event_data: Value,
    pub journey_context: Option<Value>,
    pub liberation_relevance: u8,
}

impl EventDraft {
    pub fn new(event_type: EventType, target_domains: &[&str]) -> Self {
        Self {
            event_type,
            target_domains: target_domains.iter().map(|d| d.to_string()).collect(),
            event_data: Value::Object(Default::default()),
            journey_context: None,
            liberation_relevance: DEFAULT_LIBERATION_RELEVANCE,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.event_data = data;
        self
    }

    pub fn with_journey_context(mut self, context: Value) -> Self {
        self.journey_context = Some(context);
        self
    }

    pub fn with_relevance(mut self, relevance: u8) -> Self {
        self.liberation_relevance = relevance.min(100);
        self
    }
}

/// Writes cross-domain events. Emission never fails the caller: a rejected
/// write is logged and dropped.
#[derive(Clone)]
pub struct EventNotifier {
    store: Arc<dyn EventStore>,
}

impl EventNotifier {
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        Self { store }
    }

    /// Returns the event id when the write went through.
    pub fn emit(&self, draft: EventDraft) -> Option<String> {
        let event = CrossDomainEvent {
            id: generate_id("evt-", 10),
            event_type: draft.event_type,
            source_domain: SOURCE_DOMAIN.to_string(),
            target_domains: draft.target_domains,
            event_data: draft.event_data,
            journey_context: draft.journey_context,
            liberation_relevance_score: draft.liberation_relevance,
            processing_status: ProcessingStatus::Pending,
            cultural_sensitivity_check: true,
            community_consent_verified: true,
            created: Utc::now(),
        };

        match self.store.append_event(&event) {
            Ok(()) => {
                tracing::debug!(
                    event_id = %event.id,
                    event_type = %event.event_type,
                    "Cross-domain event recorded"
                );
                Some(event.id)
            }
            Err(e) => {
                tracing::warn!(
                    event_type = %event.event_type,
                    error = %e,
                    "Failed to record cross-domain event"
                );
                None
            }
        }
    }
}
