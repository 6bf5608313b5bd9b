use std::sync::Arc;

use organizer::engine::{EngineSettings, OrganizingEngine};
use organizer::error::{OrganizerError, StoreError, StoreResult};
use organizer::model::{
    AvailabilityStatus, CommunityInsight, CrossDomainEvent, InsightType, OpportunityType,
    ProjectProposal, ProjectStatus, ProjectType, ProposerContext, ResourceRecord, ResourceRequest,
    ValidationStatus, ValidationSubmission, ValidationType,
};
use organizer::storage::{EventStore, MemoryStore, ProjectFilter, Stores};

fn engine_with(store: Arc<MemoryStore>) -> OrganizingEngine {
    OrganizingEngine::new(Stores::shared(store), EngineSettings::default())
}

fn leeds() -> ProposerContext {
    ProposerContext::new("session-1").with_location("Leeds")
}

fn proposal(project_type: ProjectType) -> ProjectProposal {
    ProjectProposal::new("Leeds tenants organizing", project_type)
        .with_description("community empowerment collective justice liberation")
        .with_impact_goals(vec!["a".into(), "b".into(), "c".into()])
        .with_community_input(true)
        .with_resource_need("funding", "x")
        .with_need_areas(vec!["Leeds".into()])
}

fn approval(validator: &str, authenticity: u8, liberation: u8) -> ValidationSubmission {
    ValidationSubmission::new(validator, ValidationType::PeerReview, authenticity, liberation)
        .with_status(ValidationStatus::Approved)
}

struct FailingEvents;

impl EventStore for FailingEvents {
    fn append_event(&self, _event: &CrossDomainEvent) -> StoreResult<()> {
        Err(StoreError::Backend("event bus offline".to_string()))
    }

    fn recent_events(&self, _limit: usize) -> StoreResult<Vec<CrossDomainEvent>> {
        Err(StoreError::Backend("event bus offline".to_string()))
    }
}

// =============================================================================
// Proposal intake
// =============================================================================

#[test]
fn test_strong_housing_proposal_is_validated_on_creation() {
    let store = Arc::new(MemoryStore::new());
    let engine = engine_with(store.clone());

    let created = engine
        .create_project(proposal(ProjectType::Housing), &leeds())
        .unwrap();

    assert_eq!(created.validation_score, 100);
    assert!(created.support_level > 60);
    assert_eq!(created.status, ProjectStatus::Validated);
    assert!(!created.validation_needed);

    let stored = engine.get_project(&created.project_id).unwrap();
    assert_eq!(stored.democratic_validation_score, 100);
    assert_eq!(stored.description, "community empowerment collective justice liberation");
    assert_eq!(store.events().len(), 2);
}

#[test]
fn test_event_store_outage_does_not_block_creation() {
    let store = Arc::new(MemoryStore::new());
    let stores = Stores::shared(store.clone()).with_events(Arc::new(FailingEvents));
    let engine = OrganizingEngine::new(stores, EngineSettings::default());

    let created = engine
        .create_project(proposal(ProjectType::Housing), &leeds())
        .unwrap();

    assert!(engine.get_project(&created.project_id).is_ok());
    assert!(store.events().is_empty());
}

#[test]
fn test_rejected_proposal_reports_feedback() {
    let engine = engine_with(Arc::new(MemoryStore::new()));

    let err = engine
        .create_project(
            ProjectProposal::new("Quiet idea", ProjectType::Policy),
            &ProposerContext::default(),
        )
        .unwrap_err();

    match err {
        OrganizerError::Validation { score, feedback } => {
            assert!(score < 60);
            assert!(!feedback.is_empty());
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
}

// =============================================================================
// Community validation
// =============================================================================

#[test]
fn test_approved_reviews_promote_project() {
    let engine = engine_with(Arc::new(MemoryStore::new()));
    let created = engine
        .create_project(proposal(ProjectType::Economic), &leeds())
        .unwrap();
    assert_eq!(created.status, ProjectStatus::Proposed);

    engine
        .submit_community_validation(&created.project_id, approval("v1", 90, 85))
        .unwrap();

    let second = engine
        .submit_community_validation(&created.project_id, approval("v2", 80, 75))
        .unwrap();
    assert_eq!(second.updated_score, 76);
    assert_eq!(second.status, ProjectStatus::Validated);

    let project = engine.get_project(&created.project_id).unwrap();
    assert_eq!(project.status, ProjectStatus::Validated);
    assert_eq!(project.democratic_validation_score, 76);
    assert_eq!(engine.validations_for(&created.project_id).unwrap().len(), 2);
}

#[test]
fn test_recalculate_is_idempotent() {
    let engine = engine_with(Arc::new(MemoryStore::new()));
    let created = engine
        .create_project(proposal(ProjectType::Economic), &leeds())
        .unwrap();
    let id = created.project_id.as_str();
    engine
        .submit_community_validation(id, approval("v1", 70, 60))
        .unwrap();
    engine
        .submit_community_validation(
            id,
            ValidationSubmission::new("v2", ValidationType::LivedExperience, 40, 40)
                .with_status(ValidationStatus::Rejected),
        )
        .unwrap();
    let version = engine.get_project(id).unwrap().version;

    let first = engine.recalculate_project_validation(id).unwrap();
    let second = engine.recalculate_project_validation(id).unwrap();

    // 0.4 * 70 + 0.4 * 60 + 5
    assert_eq!(first, 57);
    assert_eq!(first, second);
    assert_eq!(engine.get_project(id).unwrap().version, version);
}

#[test]
fn test_recalculate_without_reviews_is_neutral() {
    let engine = engine_with(Arc::new(MemoryStore::new()));
    let created = engine
        .create_project(proposal(ProjectType::Economic), &leeds())
        .unwrap();

    assert_eq!(
        engine
            .recalculate_project_validation(&created.project_id)
            .unwrap(),
        50
    );
}

// =============================================================================
// Resource allocation
// =============================================================================

#[test]
fn test_allocation_caps_at_available_quantity() {
    let store = Arc::new(MemoryStore::new());
    store
        .insert_resource(ResourceRecord::new("res-1".into(), "volunteers", 1).with_scores(80, 90))
        .unwrap();
    let engine = engine_with(store.clone());
    let created = engine
        .create_project(proposal(ProjectType::Housing), &leeds())
        .unwrap();

    let allocations = engine
        .allocate_resources(&created.project_id, &[ResourceRequest::new("volunteers", 2)])
        .unwrap();

    assert_eq!(allocations.len(), 1);
    assert_eq!(allocations[0].quantity_allocated, 1);
    assert!(!allocations[0].community_validation_required);

    let resource = store.get_resource("res-1").unwrap();
    assert_eq!(resource.availability_status, AvailabilityStatus::Unavailable);
    assert_eq!(resource.available_quantity, Some(0));
    assert_eq!(engine.allocations_for(&created.project_id).unwrap().len(), 1);
}

#[test]
fn test_concurrent_requests_cannot_double_allocate() {
    let store = Arc::new(MemoryStore::new());
    store
        .insert_resource(ResourceRecord::new("res-1".into(), "funding", 1).with_scores(60, 70))
        .unwrap();
    let engine = engine_with(store.clone());
    let first = engine
        .create_project(proposal(ProjectType::Housing), &leeds())
        .unwrap();
    let second = engine
        .create_project(proposal(ProjectType::Safety), &leeds())
        .unwrap();

    let total: usize = std::thread::scope(|scope| {
        let handles: Vec<_> = [&first.project_id, &second.project_id]
            .into_iter()
            .map(|id| {
                let engine = &engine;
                scope.spawn(move || {
                    engine
                        .allocate_resources(id, &[ResourceRequest::new("funding", 1)])
                        .unwrap()
                        .len()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).sum()
    });

    assert_eq!(total, 1);
    let resource = store.get_resource("res-1").unwrap();
    assert_eq!(resource.available_quantity, Some(0));
}

#[test]
fn test_allocation_does_not_depend_on_project_status() {
    let store = Arc::new(MemoryStore::new());
    store
        .insert_resource(ResourceRecord::new("res-1".into(), "funding", 3))
        .unwrap();
    let engine = engine_with(store.clone());
    let created = engine
        .create_project(proposal(ProjectType::Economic), &leeds())
        .unwrap();
    assert_eq!(created.status, ProjectStatus::Proposed);

    let allocations = engine
        .allocate_resources(&created.project_id, &[ResourceRequest::new("funding", 1)])
        .unwrap();
    assert_eq!(allocations.len(), 1);
    assert!(allocations[0].community_validation_required);

    let resource = store.get_resource("res-1").unwrap();
    assert_eq!(resource.availability_status, AvailabilityStatus::Limited);
    assert_eq!(resource.available_quantity, Some(2));
}

#[test]
fn test_allocation_for_unknown_project_fails() {
    let engine = engine_with(Arc::new(MemoryStore::new()));

    let err = engine
        .allocate_resources("org-missing", &[ResourceRequest::new("funding", 1)])
        .unwrap_err();
    assert!(matches!(err, OrganizerError::NotFound(_)));
}

// =============================================================================
// Opportunity discovery
// =============================================================================

#[test]
fn test_opportunities_skip_areas_already_served() {
    let store = Arc::new(MemoryStore::new());
    store
        .insert_insight(
            CommunityInsight::new("ins-1".into(), InsightType::Gap, 0.8)
                .with_area("Leeds")
                .with_categories(&["housing", "safety"]),
        )
        .unwrap();
    let engine = engine_with(store);

    let before = engine.identify_organizing_opportunities(Some("Leeds"), &[]);
    let types: Vec<_> = before.iter().map(|o| o.opportunity_type).collect();
    assert!(types.contains(&OpportunityType::CampaignLaunch));
    assert!(types.contains(&OpportunityType::CoalitionBuilding));

    // Safety projects answer coalition-building opportunities
    engine
        .create_project(proposal(ProjectType::Safety), &leeds())
        .unwrap();

    let after = engine.identify_organizing_opportunities(Some("Leeds"), &[]);
    let types: Vec<_> = after.iter().map(|o| o.opportunity_type).collect();
    assert!(types.contains(&OpportunityType::CampaignLaunch));
    assert!(!types.contains(&OpportunityType::CoalitionBuilding));
}

#[test]
fn test_low_confidence_insights_are_ignored() {
    let store = Arc::new(MemoryStore::new());
    store
        .insert_insight(
            CommunityInsight::new("ins-1".into(), InsightType::Pattern, 0.4)
                .with_area("Leeds")
                .with_categories(&["housing"]),
        )
        .unwrap();
    let engine = engine_with(store);

    assert!(engine
        .identify_organizing_opportunities(Some("Leeds"), &[])
        .is_empty());
}

// =============================================================================
// Listing
// =============================================================================

#[test]
fn test_active_projects_exclude_proposed() {
    let engine = engine_with(Arc::new(MemoryStore::new()));
    engine
        .create_project(proposal(ProjectType::Housing), &leeds())
        .unwrap();
    engine
        .create_project(proposal(ProjectType::Economic), &leeds())
        .unwrap();

    let active = engine.active_projects(&ProjectFilter::default()).unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].project_type, ProjectType::Housing);
    assert_eq!(engine.list_projects(&ProjectFilter::default()).unwrap().len(), 2);
}
