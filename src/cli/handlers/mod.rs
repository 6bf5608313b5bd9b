mod allocate;
mod events;
mod init;
mod insight;
mod list;
mod opportunities;
mod propose;
mod resource;
mod serve;
mod show;
mod status;
mod utils;
mod validate;

pub use allocate::handle_allocate;
pub use events::handle_events;
pub use init::handle_init;
pub use insight::handle_insight;
pub use list::{ListParams, handle_list};
pub use opportunities::handle_opportunities;
pub use propose::handle_propose;
pub use resource::handle_resource;
pub use serve::handle_serve;
pub use show::handle_show;
pub use status::handle_status;
pub use validate::{ValidateParams, handle_recalc, handle_validate};

use crate::config::OrganizerConfig;
use crate::engine::{EngineSettings, OrganizingEngine};
use crate::storage::{FileStore, Stores};
use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;

/// Common context passed to all command handlers
pub struct CommandContext {
    pub config: OrganizerConfig,
    pub root: PathBuf,
    pub store: Arc<FileStore>,
    pub engine: OrganizingEngine,
}

impl CommandContext {
    pub fn new(config: OrganizerConfig, root: PathBuf) -> Result<Self> {
        let store = Arc::new(FileStore::new(&config, &root));
        store.ensure_layout()?;
        let engine = OrganizingEngine::new(
            Stores::shared(store.clone()),
            EngineSettings::from(&config),
        );
        Ok(Self {
            config,
            root,
            store,
            engine,
        })
    }
}
