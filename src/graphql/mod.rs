//! GraphQL schema and resolvers for the organizing engine.
//!
//! ## Usage
//!
//! ```bash
//! # Start the GraphQL server (GraphiQL on the same URL)
//! organizer serve --port 4000
//! ```
//!
//! ## Schema
//!
//! - **Queries**: `project`, `projects`, `activeProjects`, `opportunities`,
//!   `validations`, `allocations`, `events`
//! - **Mutations**: `createProject`, `submitValidation`, `allocateResources`,
//!   `setStatus`
//!
//! A failed proposal comes back as an error whose extensions carry `code`,
//! `score` and `feedback`.

mod schema;
mod server;
mod types;

pub use schema::{AppState, MutationRoot, OrganizerSchema, QueryRoot, build_schema};
pub use server::run_server;
pub use types::*;
