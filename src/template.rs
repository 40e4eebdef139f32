use crate::error::PromptBoxError;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder pattern"));

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateVariable {
    pub name: String,
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub description: String,
}

fn default_kind() -> String {
    "text".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub template: String,
    #[serde(default)]
    pub variables: Vec<TemplateVariable>,
}

impl Template {
    /// Distinct placeholder names in order of first appearance.
    pub fn placeholders(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for caps in PLACEHOLDER.captures_iter(&self.template) {
            if let Some(name) = caps.get(1).map(|m| m.as_str()) {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }

    /// Fills declared variables; undeclared placeholders are left as-is.
    pub fn render(&self, values: &HashMap<String, String>) -> Result<String, PromptBoxError> {
        for variable in self.variables.iter().filter(|v| v.required) {
            let provided = values
                .get(&variable.name)
                .map(|value| !value.trim().is_empty())
                .unwrap_or(false);
            if !provided {
                return Err(PromptBoxError::MissingVariable(variable.name.clone()));
            }
        }

        let rendered = PLACEHOLDER.replace_all(&self.template, |caps: &Captures| {
            let name = &caps[1];
            if self.variables.iter().any(|v| v.name == name) {
                values.get(name).cloned().unwrap_or_default()
            } else {
                caps[0].to_string()
            }
        });

        Ok(rendered.into_owned())
    }
}

/// Parses `name=value` pairs from the command line.
pub fn parse_assignments(pairs: &[String]) -> Result<HashMap<String, String>, PromptBoxError> {
    pairs
        .iter()
        .map(|pair| match pair.split_once('=') {
            Some((name, value)) if !name.trim().is_empty() => {
                Ok((name.trim().to_string(), value.to_string()))
            }
            _ => Err(PromptBoxError::InvalidAssignment(pair.clone())),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marketing_email() -> Template {
        serde_json::from_value(serde_json::json!({
            "id": "1",
            "name": "Marketing Email",
            "category": "Business",
            "description": "Create engaging marketing emails",
            "template": "Write a marketing email for {product} that highlights {key_benefits}. The target audience is {audience} and the call to action should be {cta}. Keep {product} in the subject.",
            "variables": [
                {"name": "product", "type": "text", "required": true, "description": "Name of the product or service"},
                {"name": "key_benefits", "type": "text", "required": true, "description": "Main benefits to highlight"},
                {"name": "audience", "type": "text", "required": false, "description": "Target audience"},
                {"name": "cta", "type": "text", "required": true, "description": "Call to action"}
            ]
        }))
        .unwrap()
    }

    fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn lists_placeholders_once() {
        assert_eq!(
            marketing_email().placeholders(),
            vec!["product", "key_benefits", "audience", "cta"]
        );
    }

    #[test]
    fn renders_all_occurrences() {
        let rendered = marketing_email()
            .render(&values(&[
                ("product", "Lumen"),
                ("key_benefits", "battery life"),
                ("audience", "cyclists"),
                ("cta", "pre-order"),
            ]))
            .unwrap();
        assert_eq!(
            rendered,
            "Write a marketing email for Lumen that highlights battery life. The target audience is cyclists and the call to action should be pre-order. Keep Lumen in the subject."
        );
    }

    #[test]
    fn optional_variable_may_be_omitted() {
        let rendered = marketing_email()
            .render(&values(&[
                ("product", "Lumen"),
                ("key_benefits", "battery life"),
                ("cta", "pre-order"),
            ]))
            .unwrap();
        assert!(rendered.contains("The target audience is  and"));
    }

    #[test]
    fn blank_required_variable_is_missing() {
        let err = marketing_email()
            .render(&values(&[("product", "Lumen"), ("key_benefits", "  "), ("cta", "x")]))
            .unwrap_err();
        assert_eq!(err, PromptBoxError::MissingVariable("key_benefits".to_string()));
    }

    #[test]
    fn undeclared_placeholders_survive() {
        let mut template = marketing_email();
        template.template = "{product} and {unknown}".to_string();
        let rendered = template
            .render(&values(&[("product", "Lumen"), ("key_benefits", "b"), ("cta", "c")]))
            .unwrap();
        assert_eq!(rendered, "Lumen and {unknown}");
    }

    #[test]
    fn parses_assignments() {
        let parsed = parse_assignments(&["a=1".to_string(), "b = x=y".to_string()]).unwrap();
        assert_eq!(parsed.get("a").map(String::as_str), Some("1"));
        assert_eq!(parsed.get("b").map(String::as_str), Some(" x=y"));

        assert_eq!(
            parse_assignments(&["novalue".to_string()]).unwrap_err(),
            PromptBoxError::InvalidAssignment("novalue".to_string())
        );
    }
}
