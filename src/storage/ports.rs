use crate::error::StoreResult;
use crate::model::{
    AvailabilityStatus, CommunityInsight, CommunityValidation, CrossDomainEvent, InsightFilter,
    OrganizingProject, OrganizingStage, ProjectStatus, ProjectType, ResourceAllocation,
    ResourceRecord,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectFilter {
    /// Empty means any status.
    pub statuses: Vec<ProjectStatus>,
    pub project_type: Option<ProjectType>,
    pub organizing_stage: Option<OrganizingStage>,
}

impl ProjectFilter {
    pub fn engaged() -> Self {
        Self {
            statuses: vec![ProjectStatus::Validated, ProjectStatus::Active],
            ..Self::default()
        }
    }

    pub fn matches(&self, project: &OrganizingProject) -> bool {
        (self.statuses.is_empty() || self.statuses.contains(&project.status))
            && self.project_type.is_none_or(|t| t == project.project_type)
            && self
                .organizing_stage
                .is_none_or(|s| s == project.organizing_stage)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResourceQuery {
    pub resource_type: String,
    pub statuses: Vec<AvailabilityStatus>,
    pub limit: usize,
}

impl ResourceQuery {
    /// Up to `limit` allocatable records of one type.
    pub fn allocatable(resource_type: &str, limit: usize) -> Self {
        Self {
            resource_type: resource_type.to_string(),
            statuses: vec![AvailabilityStatus::Available, AvailabilityStatus::Limited],
            limit,
        }
    }

    pub fn matches(&self, record: &ResourceRecord) -> bool {
        record.resource_type == self.resource_type
            && (self.statuses.is_empty() || self.statuses.contains(&record.availability_status))
    }
}

/// Orders resources best-aligned first, with the id as a stable tiebreak.
pub fn rank_resources(records: &mut [ResourceRecord]) {
    records.sort_by(|a, b| {
        b.liberation_alignment_score
            .cmp(&a.liberation_alignment_score)
            .then_with(|| a.id.cmp(&b.id))
    });
}

/// The `organizing_projects` collection.
pub trait ProjectStore: Send + Sync {
    fn insert_project(&self, project: &OrganizingProject) -> StoreResult<()>;

    fn get_project(&self, id: &str) -> StoreResult<OrganizingProject>;

    /// Writes `project` if its `version` still matches the stored row and
    /// returns the stored copy with the bumped version. A stale version
    /// yields `StoreError::Conflict`.
    fn update_project(&self, project: &OrganizingProject) -> StoreResult<OrganizingProject>;

    fn list_projects(&self, filter: &ProjectFilter) -> StoreResult<Vec<OrganizingProject>>;
}

/// The `community_validations` collection.
pub trait ValidationStore: Send + Sync {
    fn insert_validation(&self, validation: &CommunityValidation) -> StoreResult<()>;

    fn validations_for(&self, project_id: &str) -> StoreResult<Vec<CommunityValidation>>;
}

/// The shared `resource_coordination` pool.
pub trait ResourcePool: Send + Sync {
    /// Matching records ordered by liberation alignment, highest first.
    fn query(&self, query: &ResourceQuery) -> StoreResult<Vec<ResourceRecord>>;

    /// Atomically replaces the resource row (version-checked like
    /// `ProjectStore::update_project`) and records the allocation.
    fn commit_allocation(
        &self,
        resource: &ResourceRecord,
        allocation: &ResourceAllocation,
    ) -> StoreResult<ResourceRecord>;

    fn allocations_for(&self, project_id: &str) -> StoreResult<Vec<ResourceAllocation>>;
}

/// The append-only `cross_domain_events` collection.
pub trait EventStore: Send + Sync {
    fn append_event(&self, event: &CrossDomainEvent) -> StoreResult<()>;

    /// Newest first.
    fn recent_events(&self, limit: usize) -> StoreResult<Vec<CrossDomainEvent>>;
}

/// Read-only access to `community_insights`.
pub trait PatternInsightProvider: Send + Sync {
    fn get_insights(&self, filter: &InsightFilter) -> StoreResult<Vec<CommunityInsight>>;
}
