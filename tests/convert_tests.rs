//! End-to-end conversion behaviour through the public API.
//!
//! Covers:
//! - XML output is always wrapped in a `<prompt>` root
//! - JSON output carries the raw prompt and the key/value projection
//! - Markdown list grouping across blank lines
//! - Conversions are not idempotent

use promptbox::{convert, convert_with, ConvertOptions, TargetFormat};
use serde_json::Value;

const SAMPLES: &[&str] = &[
    "",
    "   \n\n",
    "Create a marketing email for a new product launch",
    "Task: Create a marketing email\nTopic: new product launch\n\n## Requirements\n- Engaging subject line\n* Clear call-to-action",
    "Time: 10:30\nURL: https://example.com:8080/path",
    "## Section: Intro\n# Title\n### Deep header",
    "Rule: a < b && c > \"d\"",
    "\r\nWindows: line\r\n- item\r\n",
];

#[test]
fn xml_is_always_rooted() {
    for sample in SAMPLES {
        let xml = convert(sample, TargetFormat::Xml);
        assert!(xml.starts_with("<prompt>"), "{:?}", sample);
        assert!(xml.ends_with("</prompt>"), "{:?}", sample);
    }
}

#[test]
fn json_has_exactly_prompt_and_structured_data() {
    for sample in SAMPLES {
        let parsed: Value = serde_json::from_str(&convert(sample, TargetFormat::Json)).unwrap();
        let object = parsed.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert_eq!(object["prompt"], *sample);
        assert!(object["structured_data"].is_object());
    }
}

#[test]
fn first_colon_splits_key_and_value() {
    let parsed: Value =
        serde_json::from_str(&convert("Time: 10:30\nKey: Value", TargetFormat::Json)).unwrap();
    assert_eq!(parsed["structured_data"]["Time"], "10:30");
    assert_eq!(parsed["structured_data"]["Key"], "Value");
}

#[test]
fn byte_order_mark_does_not_leak_into_keys() {
    let input = "\u{feff}Task: write\nTone: calm";

    let parsed: Value = serde_json::from_str(&convert(input, TargetFormat::Json)).unwrap();
    assert_eq!(parsed["structured_data"]["Task"], "write");
    assert_eq!(parsed["prompt"], input);

    assert_eq!(
        convert(input, TargetFormat::Xml),
        "<prompt>\n  <task>write</task>\n  <tone>calm</tone>\n</prompt>"
    );
    assert_eq!(
        convert(input, TargetFormat::Markdown),
        "**Task:** write\n\n**Tone:** calm"
    );
}

#[test]
fn header_and_list_item_elements() {
    let xml = convert("## Heading\n- item one", TargetFormat::Xml);
    assert!(xml.contains("<header level=\"2\">Heading</header>"));
    assert!(xml.contains("<list_item>item one</list_item>"));
    assert_eq!(convert("- item one", TargetFormat::Markdown), "- item one");
}

#[test]
fn header_with_colon_is_key_value() {
    let xml = convert("## Section: Intro", TargetFormat::Xml);
    assert_eq!(xml, "<prompt>\n  <##_section>Intro</##_section>\n</prompt>");
}

#[test]
fn markdown_list_grouping() {
    assert_eq!(convert("- a\n- b", TargetFormat::Markdown), "- a\n- b");

    let split = convert("- a\n\n- b", TargetFormat::Markdown);
    let blocks: Vec<_> = split.split("\n\n").filter(|b| !b.is_empty()).collect();
    assert_eq!(blocks, vec!["- a", "- b"]);
}

#[test]
fn markdown_mixed_document() {
    let input = "Task: Create a marketing email\n\nRequirements\n- Engaging subject line\n- Clear call-to-action\nKeep the tone warm, confident and free of marketing jargon.";
    assert_eq!(
        convert(input, TargetFormat::Markdown),
        "**Task:** Create a marketing email\n\n\n### Requirements\n\n\n- Engaging subject line\n- Clear call-to-action\nKeep the tone warm, confident and free of marketing jargon."
    );
}

#[test]
fn empty_input_outputs() {
    assert_eq!(convert("  \n ", TargetFormat::Xml), "<prompt>\n</prompt>");
    assert_eq!(convert("  \n ", TargetFormat::Markdown), "");

    let parsed: Value = serde_json::from_str(&convert("", TargetFormat::Json)).unwrap();
    assert_eq!(parsed, serde_json::json!({"prompt": "", "structured_data": {}}));
}

#[test]
fn xml_escaping_is_opt_in() {
    let input = "Rule: a < b && c";
    assert!(convert(input, TargetFormat::Xml).contains("<rule>a < b && c</rule>"));

    let options = ConvertOptions {
        escape_xml: true,
        ..ConvertOptions::default()
    };
    assert!(convert_with(input, TargetFormat::Xml, &options)
        .contains("<rule>a &lt; b &amp;&amp; c</rule>"));
}

#[test]
fn reconverting_output_is_not_a_no_op() {
    let input = "Task: summarise\n- short";

    let xml = convert(input, TargetFormat::Xml);
    assert_ne!(convert(&xml, TargetFormat::Xml), xml);

    let json = convert(input, TargetFormat::Json);
    assert_ne!(convert(&json, TargetFormat::Json), json);

    let markdown = convert(input, TargetFormat::Markdown);
    assert_ne!(convert(&markdown, TargetFormat::Markdown), markdown);
}
