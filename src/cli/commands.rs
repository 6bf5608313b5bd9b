use crate::config::StoreSettings;
use crate::model::{
    InsightType, OrganizingStage, ProjectStatus, ProjectType, RequestPriority, ValidationStatus,
    ValidationType,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "organizer")]
#[command(
    author,
    version,
    about = "Coordinate community organizing projects, reviews and shared resources"
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file (searches upward for .organizer.toml by default)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also write JSON logs to this file (rotated daily)
    #[arg(long, global = true, env = "ORGANIZER_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new organizer workspace
    Init {
        /// Prefix for project IDs
        #[arg(long, default_value_t = StoreSettings::default().prefix)]
        prefix: String,

        /// Length of random ID suffix
        #[arg(long, default_value_t = StoreSettings::default().id_length)]
        id_length: usize,
    },

    /// Propose a project from a YAML file
    Propose {
        /// Proposal file (YAML or JSON)
        file: PathBuf,

        /// Where the proposer is organizing
        #[arg(long)]
        location: Option<String>,

        /// Proposer session ID
        #[arg(long)]
        session: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Record a community review of a project
    Validate {
        /// Project ID
        id: String,

        /// Reviewer ID
        #[arg(long)]
        validator: String,

        /// Kind of review
        #[arg(short = 't', long, value_enum, default_value = "peer-review")]
        r#type: ValidationTypeArg,

        /// Cultural authenticity score (0-100)
        #[arg(long)]
        authenticity: u8,

        /// Liberation alignment score (0-100)
        #[arg(long)]
        liberation: u8,

        /// Review outcome
        #[arg(short, long, value_enum, default_value = "pending")]
        status: ValidationStatusArg,

        /// Free-text feedback
        #[arg(long)]
        feedback: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Recompute a project's democratic validation score
    Recalc {
        /// Project ID
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Allocate pooled resources to a project
    Allocate {
        /// Project ID
        id: String,

        /// Requests as TYPE:QUANTITY[:PRIORITY], e.g. volunteers:2:high
        #[arg(required = true)]
        requests: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Identify organizing opportunities from community patterns
    #[command(visible_alias = "opps")]
    Opportunities {
        /// Only patterns recorded for this area
        #[arg(long)]
        area: Option<String>,

        /// Restrict to these categories (repeatable)
        #[arg(long)]
        focus: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List projects
    #[command(visible_alias = "ls")]
    List {
        /// Filter by project type
        #[arg(short = 't', long, value_enum)]
        r#type: Option<ProjectTypeArg>,

        /// Filter by status
        #[arg(short, long, value_enum)]
        status: Option<ProjectStatusArg>,

        /// Filter by organizing stage
        #[arg(long, value_enum)]
        stage: Option<OrganizingStageArg>,

        /// Only validated and active projects, strongest support first
        #[arg(long, conflicts_with = "status")]
        active: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a project with its reviews and allocations
    Show {
        /// Project ID
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Move a project along its lifecycle
    Status {
        /// Project ID
        id: String,

        /// New status
        #[arg(value_enum)]
        status: ProjectStatusArg,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage the shared resource pool
    Resource {
        #[command(subcommand)]
        action: ResourceAction,
    },

    /// Manage community pattern insights
    Insight {
        #[command(subcommand)]
        action: InsightAction,
    },

    /// Show recent cross-domain events
    Events {
        /// Number of events to show
        #[arg(short = 'n', long, default_value_t = 20)]
        limit: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Start the GraphQL server
    Serve {
        /// Port to listen on (defaults to server.port from config)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[derive(Subcommand)]
pub enum ResourceAction {
    /// Add a resource to the pool
    Add {
        /// Resource type, e.g. funding, volunteers
        resource_type: String,

        /// Units available
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,

        /// Cultural competency level (0-100)
        #[arg(long, default_value_t = 0)]
        competency: u8,

        /// Liberation alignment score (0-100)
        #[arg(long, default_value_t = 0)]
        alignment: u8,

        /// Areas served (repeatable)
        #[arg(long)]
        area: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List resources in the pool
    List {
        /// Filter by resource type
        #[arg(short = 't', long)]
        r#type: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum InsightAction {
    /// Record a community pattern insight
    Add {
        /// Kind of insight
        #[arg(value_enum)]
        insight_type: InsightTypeArg,

        /// Confidence between 0.0 and 1.0
        #[arg(short, long)]
        confidence: f64,

        /// Geographic area
        #[arg(long)]
        area: Option<String>,

        /// Opportunity category, e.g. housing (repeatable)
        #[arg(long = "category")]
        categories: Vec<String>,

        /// Severity: low, medium, high or critical
        #[arg(long)]
        severity: Option<String>,

        /// Estimated affected population
        #[arg(long)]
        population: Option<u64>,

        /// Organization already active on this (repeatable)
        #[arg(long = "organization")]
        organizations: Vec<String>,

        /// Complexity: low, medium or high
        #[arg(long)]
        complexity: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List recorded insights
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ProjectTypeArg {
    Housing,
    Healthcare,
    Safety,
    Economic,
    Education,
    Policy,
}

impl From<ProjectTypeArg> for ProjectType {
    fn from(arg: ProjectTypeArg) -> Self {
        match arg {
            ProjectTypeArg::Housing => ProjectType::Housing,
            ProjectTypeArg::Healthcare => ProjectType::Healthcare,
            ProjectTypeArg::Safety => ProjectType::Safety,
            ProjectTypeArg::Economic => ProjectType::Economic,
            ProjectTypeArg::Education => ProjectType::Education,
            ProjectTypeArg::Policy => ProjectType::Policy,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ProjectStatusArg {
    Proposed,
    Validated,
    Active,
    Completed,
    Archived,
}

impl From<ProjectStatusArg> for ProjectStatus {
    fn from(arg: ProjectStatusArg) -> Self {
        match arg {
            ProjectStatusArg::Proposed => ProjectStatus::Proposed,
            ProjectStatusArg::Validated => ProjectStatus::Validated,
            ProjectStatusArg::Active => ProjectStatus::Active,
            ProjectStatusArg::Completed => ProjectStatus::Completed,
            ProjectStatusArg::Archived => ProjectStatus::Archived,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OrganizingStageArg {
    Awareness,
    Education,
    Action,
    Leadership,
    SystemChange,
}

impl From<OrganizingStageArg> for OrganizingStage {
    fn from(arg: OrganizingStageArg) -> Self {
        match arg {
            OrganizingStageArg::Awareness => OrganizingStage::Awareness,
            OrganizingStageArg::Education => OrganizingStage::Education,
            OrganizingStageArg::Action => OrganizingStage::Action,
            OrganizingStageArg::Leadership => OrganizingStage::Leadership,
            OrganizingStageArg::SystemChange => OrganizingStage::SystemChange,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ValidationTypeArg {
    PeerReview,
    CommunityConsensus,
    ExpertValidation,
    LivedExperience,
}

impl From<ValidationTypeArg> for ValidationType {
    fn from(arg: ValidationTypeArg) -> Self {
        match arg {
            ValidationTypeArg::PeerReview => ValidationType::PeerReview,
            ValidationTypeArg::CommunityConsensus => ValidationType::CommunityConsensus,
            ValidationTypeArg::ExpertValidation => ValidationType::ExpertValidation,
            ValidationTypeArg::LivedExperience => ValidationType::LivedExperience,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ValidationStatusArg {
    Pending,
    Approved,
    NeedsRevision,
    Rejected,
}

impl From<ValidationStatusArg> for ValidationStatus {
    fn from(arg: ValidationStatusArg) -> Self {
        match arg {
            ValidationStatusArg::Pending => ValidationStatus::Pending,
            ValidationStatusArg::Approved => ValidationStatus::Approved,
            ValidationStatusArg::NeedsRevision => ValidationStatus::NeedsRevision,
            ValidationStatusArg::Rejected => ValidationStatus::Rejected,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum InsightTypeArg {
    Pattern,
    Gap,
    Opportunity,
}

impl From<InsightTypeArg> for InsightType {
    fn from(arg: InsightTypeArg) -> Self {
        match arg {
            InsightTypeArg::Pattern => InsightType::Pattern,
            InsightTypeArg::Gap => InsightType::Gap,
            InsightTypeArg::Opportunity => InsightType::Opportunity,
        }
    }
}

/// Parses `TYPE:QUANTITY[:PRIORITY]`.
pub fn parse_request(spec: &str) -> Result<crate::model::ResourceRequest, String> {
    let mut parts = spec.split(':');
    let resource_type = parts.next().unwrap_or_default().trim();
    let quantity = parts
        .next()
        .ok_or_else(|| format!("'{}' is missing a quantity (TYPE:QUANTITY)", spec))?;
    let quantity: u32 = quantity
        .trim()
        .parse()
        .map_err(|_| format!("'{}' has an invalid quantity", spec))?;

    let mut request = crate::model::ResourceRequest::new(resource_type, quantity);
    if let Some(priority) = parts.next() {
        let priority: RequestPriority = priority.trim().parse().map_err(|e| format!("{}", e))?;
        request = request.with_priority(priority);
    }
    if parts.next().is_some() {
        return Err(format!("'{}' has too many fields", spec));
    }
    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_request() {
        let request = parse_request("volunteers:2:high").unwrap();
        assert_eq!(request.resource_type, "volunteers");
        assert_eq!(request.quantity_needed, 2);
        assert_eq!(request.priority, RequestPriority::High);

        let request = parse_request("funding:1").unwrap();
        assert_eq!(request.priority, RequestPriority::Medium);

        assert!(parse_request("funding").is_err());
        assert!(parse_request("funding:lots").is_err());
        assert!(parse_request("funding:1:urgent").is_err());
        assert!(parse_request("funding:1:high:extra").is_err());
    }
}
