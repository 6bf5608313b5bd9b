use crate::model::{CommunityValidation, OrganizingProject, ResourceAllocation};
use anyhow::Result;
use colored::Colorize;

use super::CommandContext;
use super::utils::{format_review, format_score, format_status};

pub fn handle_show(ctx: &CommandContext, id: String, json: bool) -> Result<()> {
    let project = ctx.engine.get_project(&id)?;
    let validations = ctx.engine.validations_for(&id)?;
    let allocations = ctx.engine.allocations_for(&id)?;

    if json {
        let report = serde_json::json!({
            "project": project,
            "description": project.description,
            "validations": validations,
            "allocations": allocations,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_project(&project, &validations, &allocations);
    }
    Ok(())
}

fn print_project(
    project: &OrganizingProject,
    validations: &[CommunityValidation],
    allocations: &[ResourceAllocation],
) {
    println!("{} {}", project.id.cyan().bold(), project.title.bold());
    println!("Type:      {}", project.project_type.to_string().blue());
    println!("Stage:     {}", project.organizing_stage);
    println!("Status:    {}", format_status(project.status));
    println!(
        "Score:     {}",
        format_score(project.democratic_validation_score)
    );
    println!("Support:   {}", format_score(project.community_support_level));

    if !project.community_need_areas.is_empty() {
        println!("Areas:     {}", project.community_need_areas.join(", ").magenta());
    }
    if !project.skills_needed.is_empty() {
        println!("Skills:    {}", project.skills_needed.join(", "));
    }
    if !project.resource_needs.is_empty() {
        let needs: Vec<String> = project
            .resource_needs
            .iter()
            .map(|(category, requirement)| format!("{} ({})", category, requirement))
            .collect();
        println!("Resources: {}", needs.join(", "));
    }

    println!(
        "Created:   {}",
        project.created.format("%Y-%m-%d %H:%M").to_string().dimmed()
    );
    println!(
        "Updated:   {}",
        project.updated.format("%Y-%m-%d %H:%M").to_string().dimmed()
    );

    if !project.description.is_empty() {
        println!();
        println!("{}", project.description);
    }

    if !validations.is_empty() {
        println!("\n{}", "Community validations".bold());
        for validation in validations {
            println!(
                "  {} {} by {} (authenticity {}, liberation {})",
                validation.id.dimmed(),
                format_review(validation.validation_status),
                validation.validator_id,
                validation.cultural_authenticity_score,
                validation.liberation_alignment_score
            );
        }
    }

    if !allocations.is_empty() {
        println!("\n{}", "Allocations".bold());
        for allocation in allocations {
            println!(
                "  {} x{} from {}",
                allocation.resource_type.blue(),
                allocation.quantity_allocated,
                allocation.resource_id.cyan()
            );
        }
    }
}
