use crate::error::{OrganizerError, Result, StoreError};
use crate::model::{
    AvailabilityStatus, ResourceAllocation, ResourceRecord, ResourceRequest, generate_id,
};
use crate::storage::{ProjectStore, ResourcePool, ResourceQuery};
use crate::validation;
use chrono::Utc;
use std::sync::Arc;

/// Candidates read per request.
pub const CANDIDATE_LIMIT: usize = 5;
/// Resources below this cultural-competency level need community sign-off.
pub const COMPETENCY_REVIEW_THRESHOLD: u8 = 70;

/// The allocation a request would make against `resource`, and the resource
/// row as it should look afterwards.
pub fn plan_allocation(
    project_id: &str,
    request: &ResourceRequest,
    resource: &ResourceRecord,
) -> (ResourceAllocation, ResourceRecord) {
    let available = resource.effective_quantity();
    let quantity_allocated = request.quantity_needed.min(available);

    let mut updated = resource.clone();
    updated.availability_status = if request.quantity_needed >= available {
        AvailabilityStatus::Unavailable
    } else {
        AvailabilityStatus::Limited
    };
    updated.available_quantity = Some(available - quantity_allocated);

    let allocation = ResourceAllocation {
        id: generate_id("alloc-", 10),
        project_id: project_id.to_string(),
        resource_id: resource.id.clone(),
        resource_type: request.resource_type.clone(),
        quantity_allocated,
        priority: request.priority,
        community_validation_required: resource.cultural_competency_level
            < COMPETENCY_REVIEW_THRESHOLD,
        created: Utc::now(),
    };

    (allocation, updated)
}

/// Matches a project's resource requests against the shared pool.
#[derive(Clone)]
pub struct ResourceAllocator {
    projects: Arc<dyn ProjectStore>,
    pool: Arc<dyn ResourcePool>,
    max_attempts: u32,
}

impl ResourceAllocator {
    pub fn new(
        projects: Arc<dyn ProjectStore>,
        pool: Arc<dyn ResourcePool>,
        max_attempts: u32,
    ) -> Self {
        Self {
            projects,
            pool,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Handles each request independently against a fresh read of the pool.
    /// Requests with no allocatable match are skipped without error.
    pub fn allocate(
        &self,
        project_id: &str,
        requests: &[ResourceRequest],
    ) -> Result<Vec<ResourceAllocation>> {
        validation::validate_id(project_id)?;
        self.projects
            .get_project(project_id)
            .map_err(OrganizerError::from_lookup)?;

        tracing::info!(project_id, requests = requests.len(), "Allocating resources");
        let mut allocations = Vec::new();
        for request in requests {
            if let Err(e) = validation::validate_request(request) {
                tracing::warn!(project_id, error = %e, "Skipping malformed resource request");
                continue;
            }
            if let Some(allocation) = self.allocate_one(project_id, request)? {
                allocations.push(allocation);
            }
        }

        tracing::info!(project_id, allocated = allocations.len(), "Resource allocation finished");
        Ok(allocations)
    }

    fn allocate_one(
        &self,
        project_id: &str,
        request: &ResourceRequest,
    ) -> Result<Option<ResourceAllocation>> {
        let query = ResourceQuery::allocatable(&request.resource_type, CANDIDATE_LIMIT);

        for attempt in 1..=self.max_attempts {
            let candidates = self.pool.query(&query).map_err(|e| {
                tracing::error!(
                    project_id,
                    resource_type = %request.resource_type,
                    error = %e,
                    "Resource pool query failed"
                );
                OrganizerError::from(e)
            })?;

            let Some(best) = candidates.first() else {
                tracing::debug!(
                    project_id,
                    resource_type = %request.resource_type,
                    "No allocatable resource found"
                );
                return Ok(None);
            };

            let (allocation, updated) = plan_allocation(project_id, request, best);
            match self.pool.commit_allocation(&updated, &allocation) {
                Ok(_) => {
                    tracing::info!(
                        project_id,
                        resource_id = %best.id,
                        quantity = allocation.quantity_allocated,
                        status = %updated.availability_status,
                        "Resource allocated"
                    );
                    return Ok(Some(allocation));
                }
                Err(StoreError::Conflict(_)) => {
                    tracing::debug!(
                        project_id,
                        resource_id = %best.id,
                        attempt,
                        "Resource changed underneath, re-reading pool"
                    );
                }
                Err(e) => {
                    tracing::error!(
                        project_id,
                        resource_id = %best.id,
                        error = %e,
                        "Failed to commit allocation"
                    );
                    return Err(e.into());
                }
            }
        }

        tracing::warn!(
            project_id,
            resource_type = %request.resource_type,
            attempts = self.max_attempts,
            "Giving up on contended resource request"
        );
        Ok(None)
    }
}
