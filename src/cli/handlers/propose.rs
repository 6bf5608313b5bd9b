use crate::error::OrganizerError;
use crate::model::{ProjectProposal, ProposerContext};
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

use super::CommandContext;
use super::utils::{format_score, format_status};

pub fn handle_propose(
    ctx: &CommandContext,
    file: &Path,
    location: Option<String>,
    session: Option<String>,
    json: bool,
) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read proposal from {}", file.display()))?;
    let proposal: ProjectProposal = serde_yaml::from_str(&content)
        .with_context(|| format!("Invalid proposal in {}", file.display()))?;

    let mut proposer = ProposerContext::new(session.unwrap_or_default());
    if let Some(location) = location {
        proposer = proposer.with_location(location);
    }

    let title = proposal.title.clone();
    match ctx.engine.create_project(proposal, &proposer) {
        Ok(created) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&created)?);
            } else {
                println!("{} {} {}", "Created".green(), created.project_id.cyan(), title);
                println!("  Score:   {}", format_score(created.validation_score));
                println!("  Support: {}", format_score(created.support_level));
                println!("  Status:  {}", format_status(created.status));
                if created.validation_needed {
                    println!("  {}", "Awaiting community validation".yellow());
                }
            }
            Ok(())
        }
        Err(OrganizerError::Validation { score, feedback }) => {
            if json {
                let report = serde_json::json!({
                    "passes": false,
                    "score": score,
                    "feedback": feedback,
                });
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{} {} (score {})", "Needs refinement:".yellow(), title, score);
                for item in &feedback {
                    println!("  - {}", item);
                }
            }
            anyhow::bail!("Proposal did not pass review (score {})", score)
        }
        Err(e) => Err(e.into()),
    }
}
