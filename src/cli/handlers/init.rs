use crate::config::{CONFIG_FILE_NAME, OrganizerConfig, StoreSettings};
use crate::storage::FileStore;
use anyhow::Result;
use colored::Colorize;

pub fn handle_init(prefix: String, id_length: usize) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let config_path = cwd.join(CONFIG_FILE_NAME);

    if config_path.exists() {
        anyhow::bail!("Workspace already initialized at {}", config_path.display());
    }
    if id_length == 0 {
        anyhow::bail!("--id-length must be at least 1");
    }

    let config = OrganizerConfig {
        store: StoreSettings {
            prefix,
            id_length,
            ..StoreSettings::default()
        },
        ..OrganizerConfig::default()
    };

    // Create data directory with one folder per collection
    let data_path = config.data_path(&cwd);
    FileStore::at(data_path.clone()).ensure_layout()?;

    config.save(&config_path)?;
    tracing::info!(path = %data_path.display(), "Workspace initialized");

    println!(
        "{} organizer workspace in {}",
        "Initialized".green(),
        cwd.display()
    );
    println!("  Config: {}", config_path.display());
    println!("  Data:   {}", data_path.display());

    Ok(())
}
