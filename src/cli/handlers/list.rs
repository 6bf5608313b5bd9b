use crate::cli::commands::{OrganizingStageArg, ProjectStatusArg, ProjectTypeArg};
use crate::storage::ProjectFilter;
use anyhow::Result;

use super::CommandContext;
use super::utils::print_project_list;

/// Parameters for list operation
pub struct ListParams {
    pub r#type: Option<ProjectTypeArg>,
    pub status: Option<ProjectStatusArg>,
    pub stage: Option<OrganizingStageArg>,
    pub active: bool,
    pub json: bool,
}

pub fn handle_list(ctx: &CommandContext, params: ListParams) -> Result<()> {
    let filter = ProjectFilter {
        statuses: params.status.map(|s| vec![s.into()]).unwrap_or_default(),
        project_type: params.r#type.map(Into::into),
        organizing_stage: params.stage.map(Into::into),
    };

    let projects = if params.active {
        ctx.engine.active_projects(&filter)?
    } else {
        ctx.engine.list_projects(&filter)?
    };

    if params.json {
        println!("{}", serde_json::to_string_pretty(&projects)?);
    } else {
        print_project_list(&projects);
    }
    Ok(())
}
