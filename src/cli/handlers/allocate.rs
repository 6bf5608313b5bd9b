use crate::cli::commands::parse_request;
use anyhow::Result;
use colored::Colorize;

use super::CommandContext;

pub fn handle_allocate(
    ctx: &CommandContext,
    id: String,
    requests: Vec<String>,
    json: bool,
) -> Result<()> {
    let requests = requests
        .iter()
        .map(|spec| parse_request(spec).map_err(anyhow::Error::msg))
        .collect::<Result<Vec<_>>>()?;

    let allocations = ctx.engine.allocate_resources(&id, &requests)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&allocations)?);
        return Ok(());
    }

    if allocations.is_empty() {
        println!("No matching resources available for {}.", id.cyan());
        return Ok(());
    }

    for allocation in &allocations {
        let review = if allocation.community_validation_required {
            " (community review required)".yellow().to_string()
        } else {
            String::new()
        };
        println!(
            "{} {} x{} from {}{}",
            "Allocated".green(),
            allocation.resource_type.blue(),
            allocation.quantity_allocated,
            allocation.resource_id.cyan(),
            review
        );
    }
    let skipped = requests.len() - allocations.len();
    if skipped > 0 {
        println!("{} request(s) had no available match.", skipped);
    }
    Ok(())
}
