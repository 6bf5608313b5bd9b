use crate::cli::commands::InsightAction;
use crate::model::{CommunityInsight, InsightFilter, PatternData, generate_id};
use crate::storage::PatternInsightProvider;
use anyhow::Result;
use colored::Colorize;

use super::CommandContext;

pub fn handle_insight(ctx: &CommandContext, action: InsightAction) -> Result<()> {
    match action {
        InsightAction::Add {
            insight_type,
            confidence,
            area,
            categories,
            severity,
            population,
            organizations,
            complexity,
            json,
        } => {
            if !(0.0..=1.0).contains(&confidence) {
                anyhow::bail!("Confidence must be between 0.0 and 1.0, got {}", confidence);
            }

            let mut insight =
                CommunityInsight::new(generate_id("ins-", 8), insight_type.into(), confidence)
                    .with_pattern_data(PatternData {
                        severity_level: severity,
                        affected_population_estimate: population,
                        existing_organizations: organizations,
                        complexity_level: complexity,
                        ..PatternData::default()
                    });
            insight.organizing_opportunities = categories;
            if let Some(area) = area {
                insight = insight.with_area(area);
            }
            ctx.store.insert_insight(&insight)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&insight)?);
            } else {
                println!(
                    "{} {} {} ({:.2})",
                    "Added".green(),
                    insight.id.cyan(),
                    insight.insight_type,
                    insight.confidence_score
                );
            }
            Ok(())
        }
        InsightAction::List { json } => {
            let insights = ctx.store.get_insights(&InsightFilter::default())?;

            if json {
                println!("{}", serde_json::to_string_pretty(&insights)?);
                return Ok(());
            }
            if insights.is_empty() {
                println!("No insights found.");
                return Ok(());
            }
            for insight in &insights {
                println!(
                    "{} {} {:.2} {} [{}]",
                    insight.id.cyan(),
                    insight.insight_type,
                    insight.confidence_score,
                    insight.geographic_area.as_deref().unwrap_or("-"),
                    insight.organizing_opportunities.join(", ").blue()
                );
            }
            Ok(())
        }
    }
}
