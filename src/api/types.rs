use crate::error::PromptBoxError;
use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prompt {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Prompt {
    /// Backend timestamps come with or without an offset.
    pub fn created_display(&self) -> String {
        self.created_at
            .as_deref()
            .map(format_timestamp)
            .unwrap_or_else(|| "-".to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPrompt {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
}

impl NewPrompt {
    /// Both title and content must be non-blank.
    pub fn new(title: &str, content: String, tags: &[String]) -> Result<Self, PromptBoxError> {
        if title.trim().is_empty() || content.trim().is_empty() {
            return Err(PromptBoxError::IncompletePrompt);
        }
        Ok(Self {
            title: title.trim().to_string(),
            content,
            tags: normalize_tags(tags),
        })
    }
}

/// Body of `PUT /prompts/{id}`; only the content is mandatory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl PromptUpdate {
    pub fn new(
        title: Option<&str>,
        content: String,
        tags: &[String],
    ) -> Result<Self, PromptBoxError> {
        if content.trim().is_empty() {
            return Err(PromptBoxError::BlankContent);
        }
        let title = match title.map(str::trim) {
            Some("") => return Err(PromptBoxError::IncompletePrompt),
            other => other.map(str::to_string),
        };
        let tags = normalize_tags(tags);
        Ok(Self {
            title,
            content,
            tags: if tags.is_empty() { None } else { Some(tags) },
        })
    }
}

/// Splits comma-separated tag arguments, trims them and drops blanks.
pub fn normalize_tags(raw: &[String]) -> Vec<String> {
    raw.iter()
        .flat_map(|arg| arg.split(','))
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptVersion {
    pub id: String,
    pub prompt_id: String,
    pub version_number: u32,
    pub content: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewVersion {
    pub content: String,
    pub note: String,
}

impl NewVersion {
    /// Every version records what changed.
    pub fn new(content: String, note: &str) -> Result<Self, PromptBoxError> {
        if note.trim().is_empty() {
            return Err(PromptBoxError::MissingNote);
        }
        Ok(Self {
            content,
            note: note.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variation {
    pub name: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct VariationTestRequest<'a> {
    pub variations: Vec<&'a Variation>,
    pub test_input: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VariationTestResponse {
    pub results: Vec<TestResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    pub variation_name: String,
    pub prompt_content: String,
    pub llm_response: String,
    pub model: String,
    pub latency: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AbTestRequest {
    pub input: String,
    #[serde(rename = "variantA_id")]
    pub variant_a_id: String,
    #[serde(rename = "variantB_id")]
    pub variant_b_id: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbTestResponse {
    pub response_a: String,
    pub response_b: String,
    pub metrics: AbTestMetrics,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbTestMetrics {
    pub latency_a: Option<f64>,
    pub latency_b: Option<f64>,
    pub tokens_a: Option<u64>,
    pub tokens_b: Option<u64>,
    pub winner: String,
}

pub fn format_timestamp(raw: &str) -> String {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.format("%Y-%m-%d %H:%M").to_string();
    }
    match NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        Ok(parsed) => parsed.format("%Y-%m-%d %H:%M").to_string(),
        Err(_) => raw.to_string(),
    }
}
