use anyhow::Result;
use colored::Colorize;

use super::CommandContext;
use super::utils::format_urgency;

pub fn handle_opportunities(
    ctx: &CommandContext,
    area: Option<String>,
    focus: Vec<String>,
    json: bool,
) -> Result<()> {
    let opportunities = ctx
        .engine
        .identify_organizing_opportunities(area.as_deref(), &focus);

    if json {
        println!("{}", serde_json::to_string_pretty(&opportunities)?);
        return Ok(());
    }

    if opportunities.is_empty() {
        println!("No organizing opportunities found.");
        return Ok(());
    }

    for (rank, opportunity) in opportunities.iter().enumerate() {
        println!(
            "{}. {} [{}] {} in {}",
            rank + 1,
            opportunity.opportunity_type.to_string().blue(),
            format_urgency(opportunity.urgency_level),
            opportunity.source_category,
            opportunity.geographic_area.cyan()
        );
        println!(
            "   readiness {}  collaboration {}  timeline {}",
            opportunity.community_readiness_score,
            opportunity.collaboration_potential,
            opportunity.timeline_estimate
        );
        println!(
            "   skills: {}",
            opportunity.required_skills.join(", ").dimmed()
        );
    }
    Ok(())
}
