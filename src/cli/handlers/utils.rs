use crate::model::{
    AvailabilityStatus, OrganizingProject, ProjectStatus, UrgencyLevel, ValidationStatus,
};
use colored::Colorize;

/// Format status with color
pub fn format_status(status: ProjectStatus) -> colored::ColoredString {
    match status {
        ProjectStatus::Proposed => "proposed".white(),
        ProjectStatus::Validated => "validated".cyan(),
        ProjectStatus::Active => "active".yellow(),
        ProjectStatus::Completed => "completed".green(),
        ProjectStatus::Archived => "archived".dimmed(),
    }
}

pub fn format_review(status: ValidationStatus) -> colored::ColoredString {
    match status {
        ValidationStatus::Pending => "pending".white(),
        ValidationStatus::Approved => "approved".green(),
        ValidationStatus::NeedsRevision => "needs_revision".yellow(),
        ValidationStatus::Rejected => "rejected".red(),
    }
}

pub fn format_availability(status: AvailabilityStatus) -> colored::ColoredString {
    match status {
        AvailabilityStatus::Available => "available".green(),
        AvailabilityStatus::Limited => "limited".yellow(),
        AvailabilityStatus::Unavailable => "unavailable".red(),
        AvailabilityStatus::Requested => "requested".dimmed(),
    }
}

pub fn format_urgency(urgency: UrgencyLevel) -> colored::ColoredString {
    match urgency {
        UrgencyLevel::Critical => "critical".red().bold(),
        UrgencyLevel::High => "high".red(),
        UrgencyLevel::Medium => "medium".white(),
        UrgencyLevel::Low => "low".dimmed(),
    }
}

/// Scores at the validation threshold or above are highlighted.
pub fn format_score(score: u8) -> colored::ColoredString {
    let text = score.to_string();
    if score >= 75 {
        text.green()
    } else if score >= 60 {
        text.yellow()
    } else {
        text.red()
    }
}

/// Print a list of projects (compact format)
pub fn print_project_list(projects: &[OrganizingProject]) {
    if projects.is_empty() {
        println!("No projects found.");
        return;
    }

    for project in projects {
        println!(
            "{} {} [{}] {} (support {})",
            project.id.cyan(),
            format_status(project.status),
            project.project_type.to_string().blue(),
            project.title,
            format_score(project.community_support_level)
        );
    }
}
