use crate::error::{StoreError, StoreResult};
use crate::model::OrganizingProject;

const FRONTMATTER_DELIMITER: &str = "---";

pub fn parse_project_markdown(content: &str) -> StoreResult<OrganizingProject> {
    let content = content.trim();

    if !content.starts_with(FRONTMATTER_DELIMITER) {
        return Err(StoreError::Parse(
            "Missing YAML frontmatter delimiter".to_string(),
        ));
    }

    let after_first = &content[FRONTMATTER_DELIMITER.len()..];
    let end_index = after_first
        .find(&format!("\n{}", FRONTMATTER_DELIMITER))
        .ok_or_else(|| StoreError::Parse("Missing closing frontmatter delimiter".to_string()))?;

    let yaml_content = after_first[..end_index].trim();
    let body_start = FRONTMATTER_DELIMITER.len() + end_index + 1 + FRONTMATTER_DELIMITER.len();
    let description = content[body_start..].trim().to_string();

    let mut project: OrganizingProject = serde_yaml::from_str(yaml_content)?;
    project.description = description;

    Ok(project)
}

pub fn render_project_markdown(project: &OrganizingProject) -> StoreResult<String> {
    let yaml = serde_yaml::to_string(project)?;
    let yaml = yaml.trim();

    let mut output = String::new();
    output.push_str(FRONTMATTER_DELIMITER);
    output.push('\n');
    output.push_str(yaml);
    output.push('\n');
    output.push_str(FRONTMATTER_DELIMITER);
    output.push('\n');

    if !project.description.is_empty() {
        output.push('\n');
        output.push_str(&project.description);
        output.push('\n');
    }

    Ok(output)
}
