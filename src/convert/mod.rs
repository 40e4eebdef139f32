//! Heuristic prompt format conversion.
//!
//! Every line of the prompt is classified on its own (see [`LineKind`]) and
//! the classified lines are re-serialized as XML, JSON or Markdown. The
//! conversion is a best-effort projection: it never fails, it is not
//! idempotent, and converting the output again will not reproduce it.

pub mod classify;
pub mod json;
pub mod markdown;
pub mod session;
pub mod xml;

use log::debug;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

pub use classify::LineKind;
pub use json::StructuredData;
pub use session::ConversionSession;

/// Lines longer than this (in characters) are Markdown paragraphs.
pub const DEFAULT_PARAGRAPH_WIDTH: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TargetFormat {
    Xml,
    Json,
    Markdown,
}

impl TargetFormat {
    pub fn description(&self) -> &'static str {
        match self {
            TargetFormat::Xml => "Structured data with tags",
            TargetFormat::Json => "Key-value pairs for APIs",
            TargetFormat::Markdown => "Rich text with formatting",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertOptions {
    /// Escape XML text and sanitise tag names. Off by default, which leaves
    /// values containing `<`, `&` or `"` as-is and can produce invalid XML.
    #[serde(default)]
    pub escape_xml: bool,
    #[serde(default = "default_paragraph_width")]
    pub paragraph_width: usize,
}

fn default_paragraph_width() -> usize {
    DEFAULT_PARAGRAPH_WIDTH
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            escape_xml: false,
            paragraph_width: DEFAULT_PARAGRAPH_WIDTH,
        }
    }
}

pub fn convert(content: &str, format: TargetFormat) -> String {
    convert_with(content, format, &ConvertOptions::default())
}

pub fn convert_with(content: &str, format: TargetFormat, options: &ConvertOptions) -> String {
    debug!(
        "Converting {} bytes of prompt text to {}",
        content.len(),
        format
    );

    match format {
        TargetFormat::Xml => xml::render(content, options),
        TargetFormat::Json => json::render(content),
        TargetFormat::Markdown => markdown::render(content, options),
    }
}

/// Converts by format name; an unknown or missing name yields an empty
/// string, which callers treat as "nothing to do".
pub fn convert_named(content: &str, format: Option<&str>) -> String {
    match format.map(str::parse::<TargetFormat>) {
        Some(Ok(format)) => convert(content, format),
        _ => String::new(),
    }
}

/// A sample input/output pair shown next to the format picker.
pub fn example(format: TargetFormat) -> &'static str {
    match format {
        TargetFormat::Xml => {
            "Task: Create a marketing email\nTopic: new product launch\n\n<prompt>\n  <task>Create a marketing email</task>\n  <topic>new product launch</topic>\n</prompt>"
        }
        TargetFormat::Json => {
            "Task: Create a marketing email\n\n{\n  \"prompt\": \"Task: Create a marketing email\",\n  \"structured_data\": {\n    \"Task\": \"Create a marketing email\"\n  }\n}"
        }
        TargetFormat::Markdown => {
            "Task: Create a marketing email\nRequirements\n- Engaging subject line\n- Clear call-to-action\n\n**Task:** Create a marketing email\n\n### Requirements\n\n\n- Engaging subject line\n- Clear call-to-action"
        }
    }
}
