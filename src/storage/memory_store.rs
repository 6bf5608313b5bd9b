use super::ports::{
    EventStore, PatternInsightProvider, ProjectFilter, ProjectStore, ResourcePool, ResourceQuery,
    ValidationStore, rank_resources,
};
use crate::error::{StoreError, StoreResult};
use crate::model::{
    CommunityInsight, CommunityValidation, CrossDomainEvent, InsightFilter, OrganizingProject,
    ResourceAllocation, ResourceRecord,
};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct MemoryState {
    projects: BTreeMap<String, OrganizingProject>,
    validations: Vec<CommunityValidation>,
    resources: BTreeMap<String, ResourceRecord>,
    allocations: Vec<ResourceAllocation>,
    events: Vec<CrossDomainEvent>,
    insights: Vec<CommunityInsight>,
}

/// Implements every store capability in process memory. Each call holds a
/// single lock, so version checks and allocation commits are atomic.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, MemoryState>> {
        self.state
            .lock()
            .map_err(|_| StoreError::Backend("memory store lock poisoned".to_string()))
    }

    pub fn insert_resource(&self, resource: ResourceRecord) -> StoreResult<()> {
        let mut state = self.lock()?;
        state.resources.insert(resource.id.clone(), resource);
        Ok(())
    }

    pub fn get_resource(&self, id: &str) -> StoreResult<ResourceRecord> {
        self.lock()?
            .resources
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("resource {}", id)))
    }

    pub fn list_resources(&self) -> StoreResult<Vec<ResourceRecord>> {
        Ok(self.lock()?.resources.values().cloned().collect())
    }

    pub fn insert_insight(&self, insight: CommunityInsight) -> StoreResult<()> {
        self.lock()?.insights.push(insight);
        Ok(())
    }

    pub fn events(&self) -> Vec<CrossDomainEvent> {
        self.lock().map(|s| s.events.clone()).unwrap_or_default()
    }
}

impl ProjectStore for MemoryStore {
    fn insert_project(&self, project: &OrganizingProject) -> StoreResult<()> {
        let mut state = self.lock()?;
        if state.projects.contains_key(&project.id) {
            return Err(StoreError::Backend(format!(
                "project {} already exists",
                project.id
            )));
        }
        state.projects.insert(project.id.clone(), project.clone());
        Ok(())
    }

    fn get_project(&self, id: &str) -> StoreResult<OrganizingProject> {
        self.lock()?
            .projects
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("project {}", id)))
    }

    fn update_project(&self, project: &OrganizingProject) -> StoreResult<OrganizingProject> {
        let mut state = self.lock()?;
        let stored = state
            .projects
            .get_mut(&project.id)
            .ok_or_else(|| StoreError::NotFound(format!("project {}", project.id)))?;
        if stored.version != project.version {
            return Err(StoreError::Conflict(format!("project {}", project.id)));
        }
        let mut next = project.clone();
        next.version += 1;
        next.touch();
        *stored = next.clone();
        Ok(next)
    }

    fn list_projects(&self, filter: &ProjectFilter) -> StoreResult<Vec<OrganizingProject>> {
        let state = self.lock()?;
        let mut projects: Vec<OrganizingProject> = state
            .projects
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        projects.sort_by(|a, b| a.created.cmp(&b.created).then_with(|| a.id.cmp(&b.id)));
        Ok(projects)
    }
}

impl ValidationStore for MemoryStore {
    fn insert_validation(&self, validation: &CommunityValidation) -> StoreResult<()> {
        self.lock()?.validations.push(validation.clone());
        Ok(())
    }

    fn validations_for(&self, project_id: &str) -> StoreResult<Vec<CommunityValidation>> {
        Ok(self
            .lock()?
            .validations
            .iter()
            .filter(|v| v.project_id == project_id)
            .cloned()
            .collect())
    }
}

impl ResourcePool for MemoryStore {
    fn query(&self, query: &ResourceQuery) -> StoreResult<Vec<ResourceRecord>> {
        let state = self.lock()?;
        let mut matches: Vec<ResourceRecord> = state
            .resources
            .values()
            .filter(|r| query.matches(r))
            .cloned()
            .collect();
        rank_resources(&mut matches);
        matches.truncate(query.limit);
        Ok(matches)
    }

    fn commit_allocation(
        &self,
        resource: &ResourceRecord,
        allocation: &ResourceAllocation,
    ) -> StoreResult<ResourceRecord> {
        let mut state = self.lock()?;
        let stored = state
            .resources
            .get_mut(&resource.id)
            .ok_or_else(|| StoreError::NotFound(format!("resource {}", resource.id)))?;
        if stored.version != resource.version {
            return Err(StoreError::Conflict(format!("resource {}", resource.id)));
        }
        let mut next = resource.clone();
        next.version += 1;
        *stored = next.clone();
        state.allocations.push(allocation.clone());
        Ok(next)
    }

    fn allocations_for(&self, project_id: &str) -> StoreResult<Vec<ResourceAllocation>> {
        Ok(self
            .lock()?
            .allocations
            .iter()
            .filter(|a| a.project_id == project_id)
            .cloned()
            .collect())
    }
}

impl EventStore for MemoryStore {
    fn append_event(&self, event: &CrossDomainEvent) -> StoreResult<()> {
        self.lock()?.events.push(event.clone());
        Ok(())
    }

    fn recent_events(&self, limit: usize) -> StoreResult<Vec<CrossDomainEvent>> {
        Ok(self
            .lock()?
            .events
            .iter()
            .rev()
            .take(limit)
            .cloned()
            .collect())
    }
}

impl PatternInsightProvider for MemoryStore {
    fn get_insights(&self, filter: &InsightFilter) -> StoreResult<Vec<CommunityInsight>> {
        let state = self.lock()?;
        let matching = state.insights.iter().filter(|i| filter.matches(i)).cloned();
        Ok(match filter.limit {
            Some(limit) => matching.take(limit).collect(),
            None => matching.collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AvailabilityStatus, InsightType, ProjectProposal, ProjectType, RequestPriority};
    use chrono::Utc;

    fn sample_project(id: &str) -> OrganizingProject {
        OrganizingProject::from_proposal(
            id.to_string(),
            ProjectProposal::new("Tenant union", ProjectType::Housing),
        )
    }

    fn allocation_for(resource: &ResourceRecord) -> ResourceAllocation {
        ResourceAllocation {
            id: "alloc-1".to_string(),
            project_id: "org-1".to_string(),
            resource_id: resource.id.clone(),
            resource_type: resource.resource_type.clone(),
            quantity_allocated: 1,
            priority: RequestPriority::High,
            community_validation_required: false,
            created: Utc::now(),
        }
    }

    #[test]
    fn test_update_project_bumps_version() {
        let store = MemoryStore::new();
        store.insert_project(&sample_project("org-1")).unwrap();

        let loaded = store.get_project("org-1").unwrap();
        let saved = store.update_project(&loaded).unwrap();
        assert_eq!(saved.version, 1);
        assert_eq!(store.get_project("org-1").unwrap().version, 1);
    }

    #[test]
    fn test_update_project_detects_stale_version() {
        let store = MemoryStore::new();
        store.insert_project(&sample_project("org-1")).unwrap();

        let first = store.get_project("org-1").unwrap();
        let second = store.get_project("org-1").unwrap();
        store.update_project(&first).unwrap();

        let err = store.update_project(&second).unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[test]
    fn test_duplicate_project_rejected() {
        let store = MemoryStore::new();
        store.insert_project(&sample_project("org-1")).unwrap();
        assert!(store.insert_project(&sample_project("org-1")).is_err());
    }

    #[test]
    fn test_query_orders_by_alignment_and_limits() {
        let store = MemoryStore::new();
        for (id, alignment) in [("res-a", 40), ("res-b", 90), ("res-c", 70)] {
            store
                .insert_resource(ResourceRecord::new(id.to_string(), "funding", 1).with_scores(80, alignment))
                .unwrap();
        }
        store
            .insert_resource(
                ResourceRecord::new("res-d".to_string(), "funding", 1)
                    .with_scores(80, 100)
                    .with_status(AvailabilityStatus::Unavailable),
            )
            .unwrap();

        let found = store.query(&ResourceQuery::allocatable("funding", 2)).unwrap();
        let ids: Vec<&str> = found.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["res-b", "res-c"]);
    }

    #[test]
    fn test_commit_allocation_is_version_checked() {
        let store = MemoryStore::new();
        let resource = ResourceRecord::new("res-a".to_string(), "funding", 1);
        store.insert_resource(resource.clone()).unwrap();

        let allocation = allocation_for(&resource);
        store.commit_allocation(&resource, &allocation).unwrap();
        let err = store.commit_allocation(&resource, &allocation).unwrap_err();

        assert!(matches!(err, StoreError::Conflict(_)));
        assert_eq!(store.allocations_for("org-1").unwrap().len(), 1);
    }

    #[test]
    fn test_insight_filter_and_limit() {
        let store = MemoryStore::new();
        for i in 0..5 {
            store
                .insert_insight(
                    CommunityInsight::new(format!("ins-{}", i), InsightType::Pattern, 0.5 + i as f64 * 0.1)
                        .with_categories(&["housing"]),
                )
                .unwrap();
        }
        let filter = InsightFilter {
            min_confidence: Some(0.6),
            limit: Some(2),
            ..InsightFilter::default()
        };
        assert_eq!(store.get_insights(&filter).unwrap().len(), 2);
    }

    #[test]
    fn test_recent_events_newest_first() {
        let store = MemoryStore::new();
        assert!(store.recent_events(10).unwrap().is_empty());
    }
}
