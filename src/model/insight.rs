use super::types::InsightType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Free-form observations attached to a pattern. Every field is optional so
/// that malformed upstream rows degrade to defaults instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatternData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity_level: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affected_population_estimate: Option<u64>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub existing_organizations: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complexity_level: Option<String>,

    #[serde(default, flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// A community-observed pattern, read-only from the engine's side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunityInsight {
    pub id: String,
    pub insight_type: InsightType,

    /// Between 0.0 and 1.0.
    pub confidence_score: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geographic_area: Option<String>,

    /// Opportunity categories, usually project type names.
    #[serde(default)]
    pub organizing_opportunities: Vec<String>,

    #[serde(default)]
    pub pattern_data: PatternData,
}

impl CommunityInsight {
    pub fn new(id: String, insight_type: InsightType, confidence_score: f64) -> Self {
        Self {
            id,
            insight_type,
            confidence_score,
            geographic_area: None,
            organizing_opportunities: Vec::new(),
            pattern_data: PatternData::default(),
        }
    }

    pub fn with_area(mut self, area: impl Into<String>) -> Self {
        self.geographic_area = Some(area.into());
        self
    }

    pub fn with_categories(mut self, categories: &[&str]) -> Self {
        self.organizing_opportunities = categories.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn with_pattern_data(mut self, data: PatternData) -> Self {
        self.pattern_data = data;
        self
    }

    pub fn lists_category(&self, category: &str) -> bool {
        self.organizing_opportunities.iter().any(|c| c == category)
    }
}

/// Selection criteria for `PatternInsightProvider::get_insights`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InsightFilter {
    /// Empty means any type.
    pub insight_types: Vec<InsightType>,
    pub min_confidence: Option<f64>,
    pub geographic_area: Option<String>,
    pub category: Option<String>,
    pub limit: Option<usize>,
}

impl InsightFilter {
    pub fn matches(&self, insight: &CommunityInsight) -> bool {
        if !self.insight_types.is_empty() && !self.insight_types.contains(&insight.insight_type) {
            return false;
        }
        if let Some(min) = self.min_confidence {
            if insight.confidence_score < min {
                return false;
            }
        }
        if let Some(ref area) = self.geographic_area {
            if insight.geographic_area.as_deref() != Some(area.as_str()) {
                return false;
            }
        }
        if let Some(ref category) = self.category {
            if !insight.lists_category(category) {
                return false;
            }
        }
        true
    }
}
