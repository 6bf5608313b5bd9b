use crate::cli::commands::ResourceAction;
use crate::model::{ResourceRecord, generate_id};
use crate::validation;
use anyhow::Result;
use colored::Colorize;

use super::CommandContext;
use super::utils::format_availability;

pub fn handle_resource(ctx: &CommandContext, action: ResourceAction) -> Result<()> {
    match action {
        ResourceAction::Add {
            resource_type,
            quantity,
            competency,
            alignment,
            area,
            json,
        } => {
            validation::validate_score("competency", competency)?;
            validation::validate_score("alignment", alignment)?;
            if resource_type.trim().is_empty() {
                anyhow::bail!("Resource type cannot be empty");
            }

            let mut resource = ResourceRecord::new(generate_id("res-", 8), resource_type, quantity)
                .with_scores(competency, alignment);
            resource.geographic_coverage = area;
            ctx.store.insert_resource(&resource)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&resource)?);
            } else {
                println!(
                    "{} {} {} x{}",
                    "Added".green(),
                    resource.id.cyan(),
                    resource.resource_type.blue(),
                    quantity
                );
            }
            Ok(())
        }
        ResourceAction::List { r#type, json } => {
            let mut resources = ctx.store.list_resources()?;
            if let Some(ref t) = r#type {
                resources.retain(|r| &r.resource_type == t);
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&resources)?);
                return Ok(());
            }
            if resources.is_empty() {
                println!("No resources found.");
                return Ok(());
            }
            for resource in &resources {
                let quantity = resource
                    .available_quantity
                    .map(|q| q.to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{} {} [{}] qty {} alignment {} competency {}",
                    resource.id.cyan(),
                    resource.resource_type.blue(),
                    format_availability(resource.availability_status),
                    quantity,
                    resource.liberation_alignment_score,
                    resource.cultural_competency_level
                );
            }
            Ok(())
        }
    }
}
