use anyhow::Result;
use colored::Colorize;

use super::CommandContext;

pub fn handle_events(ctx: &CommandContext, limit: usize, json: bool) -> Result<()> {
    let events = ctx.engine.recent_events(limit)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&events)?);
        return Ok(());
    }
    if events.is_empty() {
        println!("No events recorded.");
        return Ok(());
    }

    for event in &events {
        let subject = event
            .event_data
            .get("project_id")
            .and_then(|v| v.as_str())
            .unwrap_or("-");
        println!(
            "{} {} {} -> {} ({})",
            event.created.format("%Y-%m-%d %H:%M").to_string().dimmed(),
            event.event_type.to_string().blue(),
            subject.cyan(),
            event.target_domains.join(","),
            event.processing_status
        );
    }
    Ok(())
}
