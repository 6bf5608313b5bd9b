use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;

use organizer::cli::handlers::{self, CommandContext, ListParams, ValidateParams};
use organizer::cli::{Cli, Commands};
use organizer::config::OrganizerConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();
    organizer::logging::init(cli.verbose, cli.log_file.clone());

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Init { prefix, id_length } => handlers::handle_init(prefix, id_length),
        Commands::Propose {
            file,
            location,
            session,
            json,
        } => {
            let ctx = load_context(config_path)?;
            handlers::handle_propose(&ctx, &file, location, session, json)
        }
        Commands::Validate {
            id,
            validator,
            r#type,
            authenticity,
            liberation,
            status,
            feedback,
            json,
        } => {
            let ctx = load_context(config_path)?;
            handlers::handle_validate(
                &ctx,
                ValidateParams {
                    id,
                    validator,
                    r#type,
                    authenticity,
                    liberation,
                    status,
                    feedback,
                    json,
                },
            )
        }
        Commands::Recalc { id, json } => {
            let ctx = load_context(config_path)?;
            handlers::handle_recalc(&ctx, id, json)
        }
        Commands::Allocate { id, requests, json } => {
            let ctx = load_context(config_path)?;
            handlers::handle_allocate(&ctx, id, requests, json)
        }
        Commands::Opportunities { area, focus, json } => {
            let ctx = load_context(config_path)?;
            handlers::handle_opportunities(&ctx, area, focus, json)
        }
        Commands::List {
            r#type,
            status,
            stage,
            active,
            json,
        } => {
            let ctx = load_context(config_path)?;
            handlers::handle_list(
                &ctx,
                ListParams {
                    r#type,
                    status,
                    stage,
                    active,
                    json,
                },
            )
        }
        Commands::Show { id, json } => {
            let ctx = load_context(config_path)?;
            handlers::handle_show(&ctx, id, json)
        }
        Commands::Status { id, status, json } => {
            let ctx = load_context(config_path)?;
            handlers::handle_status(&ctx, id, status, json)
        }
        Commands::Resource { action } => {
            let ctx = load_context(config_path)?;
            handlers::handle_resource(&ctx, action)
        }
        Commands::Insight { action } => {
            let ctx = load_context(config_path)?;
            handlers::handle_insight(&ctx, action)
        }
        Commands::Events { limit, json } => {
            let ctx = load_context(config_path)?;
            handlers::handle_events(&ctx, limit, json)
        }
        Commands::Serve { port } => {
            let ctx = load_context(config_path)?;
            handlers::handle_serve(ctx, port)
        }
    }
}

fn load_context(config_path: Option<&str>) -> Result<CommandContext> {
    let (config, root) = match config_path {
        Some(path) => OrganizerConfig::load_from(Path::new(path)),
        None => OrganizerConfig::load(&std::env::current_dir()?),
    }
    .context("Failed to load organizer configuration")?;
    CommandContext::new(config, root)
}
