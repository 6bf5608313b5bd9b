use std::sync::Arc;

use async_graphql::{Context, EmptySubscription, ErrorExtensions, Object, Schema};

use crate::engine::OrganizingEngine;
use crate::error::OrganizerError;
use crate::storage::ProjectFilter;

use super::types::*;

pub type OrganizerSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub struct AppState {
    pub engine: OrganizingEngine,
}

pub fn build_schema(engine: OrganizingEngine) -> OrganizerSchema {
    let state = Arc::new(AppState { engine });

    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(state)
        .finish()
}

fn engine<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a OrganizingEngine> {
    Ok(&ctx.data::<Arc<AppState>>()?.engine)
}

/// Proposal feedback travels in the error extensions so clients can show it.
fn to_graphql_error(err: OrganizerError) -> async_graphql::Error {
    match err {
        OrganizerError::Validation { score, feedback } => {
            async_graphql::Error::new(format!("Project needs refinement (score {})", score))
                .extend_with(|_, e| {
                    e.set("code", "VALIDATION_FAILED");
                    e.set("score", score);
                    e.set("feedback", feedback.clone());
                })
        }
        OrganizerError::NotFound(what) => {
            async_graphql::Error::new(format!("Not found: {}", what))
                .extend_with(|_, e| e.set("code", "NOT_FOUND"))
        }
        other => async_graphql::Error::new(other.to_string()),
    }
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Get a single project by ID
    async fn project(&self, ctx: &Context<'_>, id: String) -> async_graphql::Result<Option<Project>> {
        match engine(ctx)?.get_project(&id) {
            Ok(project) => Ok(Some(project.into())),
            Err(OrganizerError::NotFound(_)) => Ok(None),
            Err(e) => Err(to_graphql_error(e)),
        }
    }

    /// List projects with optional filtering
    async fn projects(
        &self,
        ctx: &Context<'_>,
        filter: Option<ProjectFilterInput>,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> async_graphql::Result<ProjectConnection> {
        let filter: ProjectFilter = filter.map(Into::into).unwrap_or_default();
        let projects = engine(ctx)?
            .list_projects(&filter)
            .map_err(to_graphql_error)?;
        let total_count = projects.len();

        let nodes = projects
            .into_iter()
            .skip(offset.unwrap_or(0))
            .take(limit.unwrap_or(100))
            .map(Into::into)
            .collect();

        Ok(ProjectConnection { nodes, total_count })
    }

    /// Validated and active projects, strongest community support first
    async fn active_projects(
        &self,
        ctx: &Context<'_>,
        filter: Option<ProjectFilterInput>,
    ) -> async_graphql::Result<Vec<Project>> {
        let filter: ProjectFilter = filter.map(Into::into).unwrap_or_default();
        let projects = engine(ctx)?
            .active_projects(&filter)
            .map_err(to_graphql_error)?;
        Ok(projects.into_iter().map(Into::into).collect())
    }

    /// Ranked organizing opportunities from community patterns
    async fn opportunities(
        &self,
        ctx: &Context<'_>,
        geographic_area: Option<String>,
        focus_areas: Option<Vec<String>>,
    ) -> async_graphql::Result<Vec<Opportunity>> {
        let opportunities = engine(ctx)?.identify_organizing_opportunities(
            geographic_area.as_deref(),
            &focus_areas.unwrap_or_default(),
        );
        Ok(opportunities.into_iter().map(Into::into).collect())
    }

    /// Community reviews recorded for a project
    async fn validations(
        &self,
        ctx: &Context<'_>,
        project_id: String,
    ) -> async_graphql::Result<Vec<Validation>> {
        let validations = engine(ctx)?
            .validations_for(&project_id)
            .map_err(to_graphql_error)?;
        Ok(validations.into_iter().map(Into::into).collect())
    }

    /// Resources allocated to a project
    async fn allocations(
        &self,
        ctx: &Context<'_>,
        project_id: String,
    ) -> async_graphql::Result<Vec<Allocation>> {
        let allocations = engine(ctx)?
            .allocations_for(&project_id)
            .map_err(to_graphql_error)?;
        Ok(allocations.into_iter().map(Into::into).collect())
    }

    /// Most recent cross-domain events, newest first
    async fn events(&self, ctx: &Context<'_>, limit: Option<usize>) -> async_graphql::Result<Vec<Event>> {
        let events = engine(ctx)?
            .recent_events(limit.unwrap_or(50))
            .map_err(to_graphql_error)?;
        Ok(events.into_iter().map(Into::into).collect())
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Propose a project; fails with feedback when it does not pass review
    async fn create_project(
        &self,
        ctx: &Context<'_>,
        input: CreateProjectInput,
        proposer: Option<ProposerInput>,
    ) -> async_graphql::Result<CreateProjectPayload> {
        let context = proposer.unwrap_or_default().into();
        let created = engine(ctx)?
            .create_project(input.into(), &context)
            .map_err(to_graphql_error)?;
        Ok(created.into())
    }

    /// Record a community review and recompute the project's score
    async fn submit_validation(
        &self,
        ctx: &Context<'_>,
        project_id: String,
        input: ValidationInput,
    ) -> async_graphql::Result<ValidationResult> {
        let outcome = engine(ctx)?
            .submit_community_validation(&project_id, input.into())
            .map_err(to_graphql_error)?;
        Ok(outcome.into())
    }

    /// Match resource requests against the shared pool
    async fn allocate_resources(
        &self,
        ctx: &Context<'_>,
        project_id: String,
        requests: Vec<ResourceRequestInput>,
    ) -> async_graphql::Result<Vec<Allocation>> {
        let requests: Vec<_> = requests.into_iter().map(Into::into).collect();
        let allocations = engine(ctx)?
            .allocate_resources(&project_id, &requests)
            .map_err(to_graphql_error)?;
        Ok(allocations.into_iter().map(Into::into).collect())
    }

    /// Move a project along its lifecycle
    async fn set_status(
        &self,
        ctx: &Context<'_>,
        id: String,
        status: ProjectStatus,
    ) -> async_graphql::Result<Project> {
        let project = engine(ctx)?
            .update_project_status(&id, status.into())
            .map_err(to_graphql_error)?;
        Ok(project.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EngineSettings;
    use crate::storage::{MemoryStore, Stores};

    fn schema() -> OrganizerSchema {
        let store = Arc::new(MemoryStore::new());
        build_schema(OrganizingEngine::new(
            Stores::shared(store),
            EngineSettings::default(),
        ))
    }

    #[tokio::test]
    async fn test_create_and_fetch_project() {
        let schema = schema();
        let response = schema
            .execute(
                r#"mutation {
                    createProject(
                        input: {
                            title: "Tenant union"
                            description: "community empowerment collective justice liberation"
                            projectType: HOUSING
                            communityNeedAreas: ["Leeds"]
                            includesCommunityInput: true
                            resourceNeeds: [{ category: "funding", requirement: "x" }]
                            communityImpactGoals: ["a", "b", "c"]
                        }
                        proposer: { location: "Leeds" }
                    ) { projectId validationNeeded status validationScore }
                }"#,
            )
            .await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);

        let data = response.data.into_json().unwrap();
        let created = &data["createProject"];
        assert_eq!(created["validationScore"], 100);
        assert_eq!(created["status"], "VALIDATED");
        assert_eq!(created["validationNeeded"], false);

        let id = created["projectId"].as_str().unwrap();
        let response = schema
            .execute(format!(r#"{{ project(id: "{}") {{ title status }} }}"#, id))
            .await;
        let data = response.data.into_json().unwrap();
        assert_eq!(data["project"]["title"], "Tenant union");
    }

    #[tokio::test]
    async fn test_failed_proposal_carries_feedback() {
        let response = schema()
            .execute(
                r#"mutation {
                    createProject(input: { title: "Thin", projectType: POLICY }) { projectId }
                }"#,
            )
            .await;
        assert_eq!(response.errors.len(), 1);
        let extensions = response.errors[0].extensions.as_ref().unwrap();
        assert_eq!(
            extensions.get("code"),
            Some(&async_graphql::Value::from("VALIDATION_FAILED"))
        );
        assert!(extensions.get("feedback").is_some());
    }

    #[tokio::test]
    async fn test_missing_project_is_null() {
        let response = schema().execute(r#"{ project(id: "org-none") { id } }"#).await;
        assert!(response.errors.is_empty());
        let data = response.data.into_json().unwrap();
        assert!(data["project"].is_null());
    }
}
