use super::classify::{non_blank_lines, LineKind};
use serde::ser::{Serialize, Serializer};

/// Key/value pairs lifted out of the prompt, last write wins.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StructuredData {
    entries: Vec<(String, String)>,
}

impl StructuredData {
    pub fn from_content(content: &str) -> Self {
        let mut data = Self::default();
        for line in non_blank_lines(content) {
            if let LineKind::KeyValue { key, value } = LineKind::classify(line) {
                data.insert(key, value);
            }
        }
        data
    }

    /// Overwriting moves the key to the position of its latest occurrence
    /// rather than keeping the slot of its first one. Linear per insert;
    /// prompts carry a handful of key lines.
    pub fn insert(&mut self, key: &str, value: &str) {
        self.entries.retain(|(existing, _)| existing != key);
        self.entries.push((key.to_string(), value.to_string()));
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }
}

impl Serialize for StructuredData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(k, v)| (k, v)))
    }
}

#[derive(Debug, serde::Serialize)]
struct JsonPrompt<'a> {
    prompt: &'a str,
    structured_data: StructuredData,
}

pub fn render(content: &str) -> String {
    let document = JsonPrompt {
        prompt: content,
        structured_data: StructuredData::from_content(content),
    };

    // Only string keys and values, so serialization cannot fail.
    serde_json::to_string_pretty(&document).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn keeps_raw_prompt_verbatim() {
        let input = "  Task: summarise  \n\n";
        let parsed: Value = serde_json::from_str(&render(input)).unwrap();
        assert_eq!(parsed["prompt"], input);
        assert_eq!(parsed["structured_data"]["Task"], "summarise");
    }

    #[test]
    fn only_key_value_lines_are_projected() {
        let data = StructuredData::from_content("# Title\n- bullet\nplain\nTone: calm");
        assert_eq!(data.len(), 1);
        assert_eq!(data.get("Tone"), Some("calm"));
    }

    #[test]
    fn last_write_wins_and_moves_key() {
        let data = StructuredData::from_content("A: 1\nB: 2\nA: 3");
        assert_eq!(data.get("A"), Some("3"));
        assert_eq!(data.keys().collect::<Vec<_>>(), vec!["B", "A"]);
    }

    #[test]
    fn pretty_printed_with_two_spaces() {
        let json = render("Task: x");
        assert_eq!(
            json,
            "{\n  \"prompt\": \"Task: x\",\n  \"structured_data\": {\n    \"Task\": \"x\"\n  }\n}"
        );
    }

    #[test]
    fn empty_input_has_empty_mapping() {
        assert_eq!(render(""), "{\n  \"prompt\": \"\",\n  \"structured_data\": {}\n}");
    }
}
