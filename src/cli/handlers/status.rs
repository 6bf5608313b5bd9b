use crate::cli::commands::ProjectStatusArg;
use anyhow::Result;
use colored::Colorize;

use super::CommandContext;
use super::utils::format_status;

pub fn handle_status(
    ctx: &CommandContext,
    id: String,
    status: ProjectStatusArg,
    json: bool,
) -> Result<()> {
    let project = ctx.engine.update_project_status(&id, status.into())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&project)?);
    } else {
        println!(
            "{} {} is now {}",
            "Updated".green(),
            project.id.cyan(),
            format_status(project.status)
        );
    }
    Ok(())
}
