use crate::cli::commands::{ValidationStatusArg, ValidationTypeArg};
use crate::model::ValidationSubmission;
use anyhow::Result;
use colored::Colorize;

use super::CommandContext;
use super::utils::{format_score, format_status};

/// Parameters for validate operation
pub struct ValidateParams {
    pub id: String,
    pub validator: String,
    pub r#type: ValidationTypeArg,
    pub authenticity: u8,
    pub liberation: u8,
    pub status: ValidationStatusArg,
    pub feedback: Option<String>,
    pub json: bool,
}

pub fn handle_validate(ctx: &CommandContext, params: ValidateParams) -> Result<()> {
    let mut submission = ValidationSubmission::new(
        params.validator,
        params.r#type.into(),
        params.authenticity,
        params.liberation,
    )
    .with_status(params.status.into());
    if let Some(feedback) = params.feedback {
        submission = submission.with_feedback(feedback);
    }

    let outcome = ctx
        .engine
        .submit_community_validation(&params.id, submission)?;

    if params.json {
        let report = serde_json::json!({
            "validation_id": outcome.validation_id,
            "updated_score": outcome.updated_score,
            "status": outcome.status,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "{} {} for {}",
            "Recorded".green(),
            outcome.validation_id.cyan(),
            params.id.cyan()
        );
        println!("  Score:  {}", format_score(outcome.updated_score));
        println!("  Status: {}", format_status(outcome.status));
    }
    Ok(())
}

pub fn handle_recalc(ctx: &CommandContext, id: String, json: bool) -> Result<()> {
    let score = ctx.engine.recalculate_project_validation(&id)?;

    if json {
        let report = serde_json::json!({ "project_id": id, "score": score });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{} validation score {}", id.cyan(), format_score(score));
    }
    Ok(())
}
