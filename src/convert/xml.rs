use super::classify::{non_blank_lines, LineKind};
use super::ConvertOptions;
use std::borrow::Cow;

pub fn render(content: &str, options: &ConvertOptions) -> String {
    let mut xml = String::from("<prompt>\n");

    for line in non_blank_lines(content) {
        match LineKind::classify(line) {
            LineKind::KeyValue { key, value } => {
                let tag = tag_name(key, options.escape_xml);
                xml.push_str(&format!(
                    "  <{tag}>{}</{tag}>\n",
                    text(value, options.escape_xml)
                ));
            }
            LineKind::Header { level, text: header } => {
                xml.push_str(&format!(
                    "  <header level=\"{}\">{}</header>\n",
                    level,
                    text(header, options.escape_xml)
                ));
            }
            LineKind::ListItem(item) => {
                xml.push_str(&format!(
                    "  <list_item>{}</list_item>\n",
                    text(item, options.escape_xml)
                ));
            }
            LineKind::PlainText(plain) => {
                xml.push_str(&format!("  <text>{}</text>\n", text(plain, options.escape_xml)));
            }
        }
    }

    xml.push_str("</prompt>");
    xml
}

/// Lower-cases the key and collapses whitespace runs into `_`.
fn tag_name(key: &str, sanitize: bool) -> String {
    let tag = key
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");

    if sanitize {
        sanitize_name(&tag)
    } else {
        tag
    }
}

fn sanitize_name(tag: &str) -> String {
    let mut name: String = tag
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '_' | '-' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();

    match name.chars().next() {
        Some(first) if first.is_alphabetic() || first == '_' => {}
        _ => name.insert(0, '_'),
    }
    name
}

fn text(value: &str, escape: bool) -> Cow<'_, str> {
    if escape {
        Cow::Owned(escape_text(value))
    } else {
        Cow::Borrowed(value)
    }
}

pub fn escape_text(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
