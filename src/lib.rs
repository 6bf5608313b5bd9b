//! # Organizer - community organizing coordination engine
//!
//! Organizer takes community project proposals, scores them against a
//! transparent rule table, aggregates peer reviews into a democratic
//! validation score, hands out shared resources, and surfaces organizing
//! opportunities from community pattern data. Every lifecycle change is
//! announced as a cross-domain event.
//!
//! It provides a CLI for organizers and a GraphQL API for other services.
//!
//! ## Quick Start
//!
//! ```bash
//! # Initialize a new organizer workspace
//! organizer init
//!
//! # Propose a project from a YAML file
//! organizer propose proposal.yml --location Leeds
//!
//! # Record a community review
//! organizer validate <id> --validator v1 --authenticity 90 --liberation 85 --status approved
//!
//! # Allocate pooled resources to a project
//! organizer allocate <id> volunteers:2 funding:1
//!
//! # Find opportunities in an area
//! organizer opportunities --area Leeds
//! ```
//!
//! ## Modules
//!
//! - [`cli`]: Command-line interface definitions and handlers
//! - [`config`]: Configuration loading and management
//! - [`engine`]: Scoring, aggregation, allocation and discovery
//! - [`error`]: Error types and result aliases
//! - [`graphql`]: GraphQL schema and resolvers
//! - [`model`]: Data models (projects, validations, resources, events)
//! - [`storage`]: Store traits plus in-memory and flat-file backends
//! - [`validation`]: Input validation utilities

/// Command-line interface definitions using clap.
pub mod cli;

/// Configuration loading and management.
///
/// Handles `.organizer.toml` configuration files and workspace discovery.
pub mod config;

/// The organizing coordination engine.
pub mod engine;

/// Error types and result aliases.
///
/// Defines `StoreError`, `OrganizerError` and the `Result<T>` alias.
pub mod error;

/// GraphQL schema and resolvers.
pub mod graphql;

pub mod logging;

/// Data models for the organizing engine.
pub mod model;

/// Persistence traits and backends.
pub mod storage;

/// Input validation utilities.
///
/// Validates titles, descriptions, IDs, scores and quantities.
pub mod validation;
