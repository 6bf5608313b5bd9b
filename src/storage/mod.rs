//! Persistence capabilities for the organizing engine.
//!
//! The engine never talks to a concrete database. It is handed one object per
//! collection through the traits in [`ports`]:
//!
//! - [`ProjectStore`]: `organizing_projects`
//! - [`ValidationStore`]: `community_validations`
//! - [`ResourcePool`]: `resource_coordination` plus recorded allocations
//! - [`EventStore`]: `cross_domain_events`
//! - [`PatternInsightProvider`]: `community_insights` (read-only)
//!
//! Two backends implement all of them:
//!
//! - [`MemoryStore`]: everything behind one mutex, used as the test fake
//! - [`FileStore`]: flat files under `.organizer/`
//!
//! ## File Format
//!
//! ```markdown
//! ---
//! id: org-1a2b3c4d
//! title: Tenant Union
//! project_type: housing
//! status: validated
//! democratic_validation_score: 100
//! community_support_level: 80
//! version: 2
//! ---
//!
//! Project description.
//! ```

mod file_store;
mod markdown;
mod memory_store;
pub mod ports;

pub use file_store::FileStore;
pub use markdown::{parse_project_markdown, render_project_markdown};
pub use memory_store::MemoryStore;
pub use ports::{
    EventStore, PatternInsightProvider, ProjectFilter, ProjectStore, ResourcePool, ResourceQuery,
    ValidationStore,
};

use std::sync::Arc;

/// One handle per collection, injected into the engine.
#[derive(Clone)]
pub struct Stores {
    pub projects: Arc<dyn ProjectStore>,
    pub validations: Arc<dyn ValidationStore>,
    pub resources: Arc<dyn ResourcePool>,
    pub events: Arc<dyn EventStore>,
    pub insights: Arc<dyn PatternInsightProvider>,
}

impl Stores {
    /// Uses a single backend for every collection.
    pub fn shared<B>(backend: Arc<B>) -> Self
    where
        B: ProjectStore
            + ValidationStore
            + ResourcePool
            + EventStore
            + PatternInsightProvider
            + 'static,
    {
        Self {
            projects: backend.clone(),
            validations: backend.clone(),
            resources: backend.clone(),
            events: backend.clone(),
            insights: backend,
        }
    }

    pub fn with_events(mut self, events: Arc<dyn EventStore>) -> Self {
        self.events = events;
        self
    }

    pub fn with_insights(mut self, insights: Arc<dyn PatternInsightProvider>) -> Self {
        self.insights = insights;
        self
    }
}
