use serde::{Deserialize, Serialize};

use crate::domain::{AudienceLevel, CompanyId, Platform, GENERATION_PLATFORMS};

/// Body of `POST /api/generate-content`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateContentRequest {
    pub company_id: CompanyId,
    pub topic: String,
    pub platforms: Vec<Platform>,
    pub audience_level: AudienceLevel,
}

impl GenerateContentRequest {
    /// Platforms and audience level are fixed; only company and topic vary.
    pub fn for_topic(company_id: CompanyId, topic: impl Into<String>) -> Self {
        Self {
            company_id,
            topic: topic.into(),
            platforms: GENERATION_PLATFORMS.to_vec(),
            audience_level: AudienceLevel::General,
        }
    }
}

/// One generated post. The shape is owned by the backend; accessors only read
/// the fields it is known to send.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GeneratedContentItem(pub serde_json::Value);

impl GeneratedContentItem {
    pub fn platform(&self) -> Option<&str> {
        self.0.get("platform").and_then(|v| v.as_str())
    }

    pub fn body(&self) -> Option<&str> {
        self.0
            .get("content")
            .or_else(|| self.0.get("text"))
            .and_then(|v| v.as_str())
    }

    pub fn hashtags(&self) -> Vec<&str> {
        self.0
            .get("hashtags")
            .and_then(|v| v.as_array())
            .map(|tags| tags.iter().filter_map(|t| t.as_str()).collect())
            .unwrap_or_default()
    }

    pub fn engagement_prediction(&self) -> Option<u64> {
        self.0.get("engagement_prediction").and_then(|v| v.as_u64())
    }

    pub fn optimal_time(&self) -> Option<&str> {
        self.0.get("optimal_time").and_then(|v| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateContentResponse {
    pub generated_content: Vec<GeneratedContentItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}
