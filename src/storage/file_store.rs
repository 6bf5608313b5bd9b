use super::markdown::{parse_project_markdown, render_project_markdown};
use super::ports::{
    EventStore, PatternInsightProvider, ProjectFilter, ProjectStore, ResourcePool, ResourceQuery,
    ValidationStore, rank_resources,
};
use crate::config::OrganizerConfig;
use crate::error::{StoreError, StoreResult};
use crate::model::{
    CommunityInsight, CommunityValidation, CrossDomainEvent, InsightFilter, OrganizingProject,
    ResourceAllocation, ResourceRecord,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use slug::slugify;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tempfile::NamedTempFile;

const PROJECTS_DIR: &str = "projects";
const VALIDATIONS_DIR: &str = "validations";
const RESOURCES_DIR: &str = "resources";
const ALLOCATIONS_DIR: &str = "allocations";
const EVENTS_DIR: &str = "events";
const INSIGHTS_DIR: &str = "insights";

/// Flat-file backend. Projects are markdown files with YAML frontmatter;
/// every other collection is one YAML file per record.
///
/// Version checks are serialised through an in-process lock. Two processes
/// writing the same data directory are not coordinated.
pub struct FileStore {
    data_path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(config: &OrganizerConfig, project_root: &Path) -> Self {
        Self::at(config.data_path(project_root))
    }

    pub fn at(data_path: PathBuf) -> Self {
        Self {
            data_path,
            write_lock: Mutex::new(()),
        }
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    /// Creates every collection directory.
    pub fn ensure_layout(&self) -> StoreResult<()> {
        for dir in [
            PROJECTS_DIR,
            VALIDATIONS_DIR,
            RESOURCES_DIR,
            ALLOCATIONS_DIR,
            EVENTS_DIR,
            INSIGHTS_DIR,
        ] {
            std::fs::create_dir_all(self.data_path.join(dir))?;
        }
        Ok(())
    }

    fn guard(&self) -> StoreResult<MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|_| StoreError::Backend("file store lock poisoned".to_string()))
    }

    fn collection(&self, name: &str) -> PathBuf {
        self.data_path.join(name)
    }

    fn project_filename(id: &str, title: &str) -> String {
        let slug = slugify(title);
        let slug: String = slug.chars().take(50).collect();
        format!("{}--{}.md", id, slug)
    }

    fn find_project_file(&self, id: &str) -> StoreResult<PathBuf> {
        let dir = self.collection(PROJECTS_DIR);
        if dir.exists() {
            let prefix = format!("{}--", id);
            for entry in std::fs::read_dir(&dir)? {
                let path = entry?.path();
                let matches = path
                    .file_name()
                    .map(|n| n.to_string_lossy().starts_with(&prefix))
                    .unwrap_or(false);
                if matches {
                    return Ok(path);
                }
            }
        }
        Err(StoreError::NotFound(format!("project {}", id)))
    }

    fn load_projects(&self) -> StoreResult<Vec<OrganizingProject>> {
        let dir = self.collection(PROJECTS_DIR);
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut projects = Vec::new();
        for entry in std::fs::read_dir(&dir)? {
            let path = entry?.path();
            if !path.extension().map(|e| e == "md").unwrap_or(false) {
                continue;
            }
            match std::fs::read_to_string(&path) {
                Ok(content) => match parse_project_markdown(&content) {
                    Ok(project) => projects.push(project),
                    Err(e) => tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Skipping unparseable project file"
                    ),
                },
                Err(e) => tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Skipping unreadable project file"
                ),
            }
        }
        Ok(projects)
    }

    fn record_path(&self, collection: &str, id: &str) -> PathBuf {
        self.collection(collection).join(format!("{}.yml", id))
    }

    fn write_record<T: Serialize>(&self, collection: &str, id: &str, record: &T) -> StoreResult<()> {
        std::fs::create_dir_all(self.collection(collection))?;
        let content = serde_yaml::to_string(record)?;
        atomic_write(&self.record_path(collection, id), &content)
    }

    fn read_record<T: DeserializeOwned>(&self, collection: &str, id: &str) -> StoreResult<T> {
        let path = self.record_path(collection, id);
        if !path.exists() {
            return Err(StoreError::NotFound(format!("{} {}", collection, id)));
        }
        let content = std::fs::read_to_string(&path)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    fn read_records<T: DeserializeOwned>(&self, collection: &str) -> StoreResult<Vec<T>> {
        let dir = self.collection(collection);
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut paths: Vec<PathBuf> = std::fs::read_dir(&dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().map(|e| e == "yml").unwrap_or(false))
            .collect();
        paths.sort();

        let mut records = Vec::new();
        for path in paths {
            let parsed = std::fs::read_to_string(&path)
                .map_err(StoreError::from)
                .and_then(|content| serde_yaml::from_str::<T>(&content).map_err(StoreError::from));
            match parsed {
                Ok(record) => records.push(record),
                Err(e) => tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Skipping unreadable {} record",
                    collection
                ),
            }
        }
        Ok(records)
    }

    pub fn insert_resource(&self, resource: &ResourceRecord) -> StoreResult<()> {
        let _guard = self.guard()?;
        self.write_record(RESOURCES_DIR, &resource.id, resource)
    }

    pub fn list_resources(&self) -> StoreResult<Vec<ResourceRecord>> {
        let mut resources: Vec<ResourceRecord> = self.read_records(RESOURCES_DIR)?;
        rank_resources(&mut resources);
        Ok(resources)
    }

    pub fn insert_insight(&self, insight: &CommunityInsight) -> StoreResult<()> {
        self.write_record(INSIGHTS_DIR, &insight.id, insight)
    }
}

impl ProjectStore for FileStore {
    fn insert_project(&self, project: &OrganizingProject) -> StoreResult<()> {
        tracing::debug!(id = %project.id, title = %project.title, "Writing project file");
        let _guard = self.guard()?;

        if self.find_project_file(&project.id).is_ok() {
            return Err(StoreError::Backend(format!(
                "project {} already exists",
                project.id
            )));
        }

        let dir = self.collection(PROJECTS_DIR);
        std::fs::create_dir_all(&dir)?;
        let path = dir.join(Self::project_filename(&project.id, &project.title));
        atomic_write(&path, &render_project_markdown(project)?)
    }

    fn get_project(&self, id: &str) -> StoreResult<OrganizingProject> {
        let path = self.find_project_file(id)?;
        let content = std::fs::read_to_string(&path)?;
        parse_project_markdown(&content)
    }

    fn update_project(&self, project: &OrganizingProject) -> StoreResult<OrganizingProject> {
        let _guard = self.guard()?;

        let old_path = self.find_project_file(&project.id)?;
        let current = parse_project_markdown(&std::fs::read_to_string(&old_path)?)?;
        if current.version != project.version {
            return Err(StoreError::Conflict(format!("project {}", project.id)));
        }

        let mut next = project.clone();
        next.version += 1;
        next.touch();

        let new_path = self
            .collection(PROJECTS_DIR)
            .join(Self::project_filename(&next.id, &next.title));
        atomic_write(&new_path, &render_project_markdown(&next)?)?;
        if old_path != new_path {
            std::fs::remove_file(&old_path)?;
        }
        Ok(next)
    }

    fn list_projects(&self, filter: &ProjectFilter) -> StoreResult<Vec<OrganizingProject>> {
        let mut projects: Vec<OrganizingProject> = self
            .load_projects()?
            .into_iter()
            .filter(|p| filter.matches(p))
            .collect();
        projects.sort_by(|a, b| a.created.cmp(&b.created).then_with(|| a.id.cmp(&b.id)));
        Ok(projects)
    }
}

impl ValidationStore for FileStore {
    fn insert_validation(&self, validation: &CommunityValidation) -> StoreResult<()> {
        self.write_record(VALIDATIONS_DIR, &validation.id, validation)
    }

    fn validations_for(&self, project_id: &str) -> StoreResult<Vec<CommunityValidation>> {
        let mut validations: Vec<CommunityValidation> = self.read_records(VALIDATIONS_DIR)?;
        validations.retain(|v| v.project_id == project_id);
        validations.sort_by(|a, b| a.created.cmp(&b.created));
        Ok(validations)
    }
}

impl ResourcePool for FileStore {
    fn query(&self, query: &ResourceQuery) -> StoreResult<Vec<ResourceRecord>> {
        let mut matches: Vec<ResourceRecord> = self.read_records(RESOURCES_DIR)?;
        matches.retain(|r| query.matches(r));
        rank_resources(&mut matches);
        matches.truncate(query.limit);
        Ok(matches)
    }

    fn commit_allocation(
        &self,
        resource: &ResourceRecord,
        allocation: &ResourceAllocation,
    ) -> StoreResult<ResourceRecord> {
        let _guard = self.guard()?;

        let current: ResourceRecord = self.read_record(RESOURCES_DIR, &resource.id)?;
        if current.version != resource.version {
            return Err(StoreError::Conflict(format!("resource {}", resource.id)));
        }

        let mut next = resource.clone();
        next.version += 1;

        // Both records are written and synced before either becomes visible.
        std::fs::create_dir_all(self.collection(ALLOCATIONS_DIR))?;
        let allocation_path = self.record_path(ALLOCATIONS_DIR, &allocation.id);
        let resource_path = self.record_path(RESOURCES_DIR, &next.id);
        let staged_allocation = stage_write(&allocation_path, &serde_yaml::to_string(allocation)?)?;
        let staged_resource = stage_write(&resource_path, &serde_yaml::to_string(&next)?)?;
        persist_pair(
            (staged_allocation, &allocation_path),
            (staged_resource, &resource_path),
        )?;
        Ok(next)
    }

    fn allocations_for(&self, project_id: &str) -> StoreResult<Vec<ResourceAllocation>> {
        let mut allocations: Vec<ResourceAllocation> = self.read_records(ALLOCATIONS_DIR)?;
        allocations.retain(|a| a.project_id == project_id);
        allocations.sort_by(|a, b| a.created.cmp(&b.created));
        Ok(allocations)
    }
}

impl EventStore for FileStore {
    fn append_event(&self, event: &CrossDomainEvent) -> StoreResult<()> {
        self.write_record(EVENTS_DIR, &event.id, event)
    }

    fn recent_events(&self, limit: usize) -> StoreResult<Vec<CrossDomainEvent>> {
        let mut events: Vec<CrossDomainEvent> = self.read_records(EVENTS_DIR)?;
        events.sort_by(|a, b| b.created.cmp(&a.created));
        events.truncate(limit);
        Ok(events)
    }
}

impl PatternInsightProvider for FileStore {
    fn get_insights(&self, filter: &InsightFilter) -> StoreResult<Vec<CommunityInsight>> {
        let insights: Vec<CommunityInsight> = self.read_records(INSIGHTS_DIR)?;
        let matching = insights.into_iter().filter(|i| filter.matches(i));
        Ok(match filter.limit {
            Some(limit) => matching.take(limit).collect(),
            None => matching.collect(),
        })
    }
}

/// Write to a temp file in the target directory, then rename over the target.
fn atomic_write(target_path: &Path, content: &str) -> StoreResult<()> {
    stage_write(target_path, content)?
        .persist(target_path)
        .map_err(|e| StoreError::Backend(format!("Failed to persist file: {}", e)))?;
    Ok(())
}

/// Writes and syncs `content` to a temp file beside `target_path` without
/// touching the target itself.
fn stage_write(target_path: &Path, content: &str) -> StoreResult<NamedTempFile> {
    let target_dir = target_path
        .parent()
        .ok_or_else(|| StoreError::Backend("Target path has no parent directory".to_string()))?;

    let mut temp_file = NamedTempFile::new_in(target_dir)
        .map_err(|e| StoreError::Backend(format!("Failed to create temp file: {}", e)))?;
    temp_file
        .write_all(content.as_bytes())
        .map_err(|e| StoreError::Backend(format!("Failed to write to temp file: {}", e)))?;
    temp_file
        .as_file()
        .sync_all()
        .map_err(|e| StoreError::Backend(format!("Failed to sync temp file: {}", e)))?;
    Ok(temp_file)
}

/// Persists two staged files. The first target must not exist beforehand;
/// it is removed again when the second rename fails.
fn persist_pair(first: (NamedTempFile, &Path), second: (NamedTempFile, &Path)) -> StoreResult<()> {
    let (first_file, first_path) = first;
    let (second_file, second_path) = second;

    first_file
        .persist(first_path)
        .map_err(|e| StoreError::Backend(format!("Failed to persist file: {}", e)))?;
    if let Err(e) = second_file.persist(second_path) {
        if let Err(cleanup) = std::fs::remove_file(first_path) {
            tracing::error!(
                path = %first_path.display(),
                error = %cleanup,
                "Failed to roll back partially committed record"
            );
        }
        return Err(StoreError::Backend(format!("Failed to persist file: {}", e)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        AvailabilityStatus, InsightType, ProjectProposal, ProjectStatus, ProjectType,
        RequestPriority, ValidationStatus, ValidationSubmission, ValidationType,
    };
    use chrono::Utc;
    use tempfile::TempDir;

    fn store() -> (TempDir, FileStore) {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::at(temp_dir.path().join(".organizer"));
        store.ensure_layout().unwrap();
        (temp_dir, store)
    }

    fn project(id: &str, title: &str) -> OrganizingProject {
        let proposal = ProjectProposal::new(title, ProjectType::Housing)
            .with_description("Renters organizing together.");
        OrganizingProject::from_proposal(id.to_string(), proposal)
    }

    #[test]
    fn test_project_roundtrip_through_files() {
        let (_tmp, store) = store();
        store.insert_project(&project("org-1", "Tenant Union")).unwrap();

        let loaded = store.get_project("org-1").unwrap();
        assert_eq!(loaded.title, "Tenant Union");
        assert_eq!(loaded.description, "Renters organizing together.");
        assert!(
            store
                .data_path()
                .join("projects/org-1--tenant-union.md")
                .exists()
        );
    }

    #[test]
    fn test_update_project_renames_and_checks_version() {
        let (_tmp, store) = store();
        store.insert_project(&project("org-1", "Tenant Union")).unwrap();

        let mut loaded = store.get_project("org-1").unwrap();
        let stale = loaded.clone();
        loaded.title = "Renters Assembly".to_string();
        loaded.status = ProjectStatus::Validated;
        let saved = store.update_project(&loaded).unwrap();
        assert_eq!(saved.version, 1);
        assert!(
            store
                .data_path()
                .join("projects/org-1--renters-assembly.md")
                .exists()
        );
        assert!(
            !store
                .data_path()
                .join("projects/org-1--tenant-union.md")
                .exists()
        );

        let err = store.update_project(&stale).unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[test]
    fn test_list_projects_filters_by_status() {
        let (_tmp, store) = store();
        store.insert_project(&project("org-1", "One")).unwrap();
        store
            .insert_project(&project("org-2", "Two").with_status(ProjectStatus::Active))
            .unwrap();

        let engaged = store.list_projects(&ProjectFilter::engaged()).unwrap();
        assert_eq!(engaged.len(), 1);
        assert_eq!(engaged[0].id, "org-2");
        assert_eq!(store.list_projects(&ProjectFilter::default()).unwrap().len(), 2);
    }

    #[test]
    fn test_unparseable_records_are_skipped() {
        let (_tmp, store) = store();
        let submission = ValidationSubmission::new("v1", ValidationType::PeerReview, 80, 80)
            .with_status(ValidationStatus::Approved);
        store
            .insert_validation(&CommunityValidation::record(
                "val-1".to_string(),
                "org-1",
                submission,
            ))
            .unwrap();
        std::fs::write(store.data_path().join("validations/val-bad.yml"), ": not yaml [").unwrap();

        let validations = store.validations_for("org-1").unwrap();
        assert_eq!(validations.len(), 1);
    }

    #[test]
    fn test_commit_allocation_writes_both_records() {
        let (_tmp, store) = store();
        let resource = ResourceRecord::new("res-1".to_string(), "funding", 1).with_scores(80, 90);
        store.insert_resource(&resource).unwrap();

        let mut updated = resource.clone();
        updated.availability_status = AvailabilityStatus::Unavailable;
        updated.available_quantity = Some(0);
        let allocation = ResourceAllocation {
            id: "alloc-1".to_string(),
            project_id: "org-1".to_string(),
            resource_id: "res-1".to_string(),
            resource_type: "funding".to_string(),
            quantity_allocated: 1,
            priority: RequestPriority::High,
            community_validation_required: false,
            created: Utc::now(),
        };
        store.commit_allocation(&updated, &allocation).unwrap();

        assert_eq!(store.allocations_for("org-1").unwrap().len(), 1);
        assert!(
            store
                .query(&ResourceQuery::allocatable("funding", 5))
                .unwrap()
                .is_empty()
        );
        assert!(matches!(
            store.commit_allocation(&updated, &allocation),
            Err(StoreError::Conflict(_))
        ));
    }

    #[test]
    fn test_failed_second_persist_removes_first_record() {
        let (_tmp, store) = store();
        let allocation_path = store.data_path().join("allocations/alloc-1.yml");
        // A non-empty directory at the target makes the rename fail
        let blocked_path = store.data_path().join("resources/res-1.yml");
        std::fs::create_dir_all(blocked_path.join("occupied")).unwrap();

        let first = stage_write(&allocation_path, "id: alloc-1\n").unwrap();
        let second = stage_write(&blocked_path, "id: res-1\n").unwrap();
        let result = persist_pair((first, &allocation_path), (second, &blocked_path));

        assert!(matches!(result, Err(StoreError::Backend(_))));
        assert!(!allocation_path.exists());
        assert!(store.allocations_for("org-1").unwrap().is_empty());
    }

    #[test]
    fn test_insights_filtered_by_area() {
        let (_tmp, store) = store();
        store
            .insert_insight(
                &CommunityInsight::new("ins-1".to_string(), InsightType::Gap, 0.8)
                    .with_area("Leeds")
                    .with_categories(&["housing"]),
            )
            .unwrap();
        store
            .insert_insight(
                &CommunityInsight::new("ins-2".to_string(), InsightType::Gap, 0.8).with_area("York"),
            )
            .unwrap();

        let filter = InsightFilter {
            geographic_area: Some("Leeds".to_string()),
            ..InsightFilter::default()
        };
        let found = store.get_insights(&filter).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "ins-1");
    }
}
