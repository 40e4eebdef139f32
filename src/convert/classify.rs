/// A single line of prompt text after classification.
///
/// Lines are classified in isolation; the rules are checked in a fixed
/// priority order and the first match wins, so `## Section: Intro` is a
/// key/value pair rather than a header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    KeyValue { key: &'a str, value: &'a str },
    Header { level: usize, text: &'a str },
    ListItem(&'a str),
    PlainText(&'a str),
}

impl<'a> LineKind<'a> {
    /// Classifies an already-trimmed, non-blank line.
    pub fn classify(trimmed: &'a str) -> Self {
        if let Some((key, value)) = trimmed.split_once(':') {
            return LineKind::KeyValue {
                key: key.trim(),
                value: value.trim(),
            };
        }

        if trimmed.starts_with('#') {
            let rest = trimmed.trim_start_matches('#');
            let level = trimmed.len() - rest.len();
            return LineKind::Header {
                level,
                text: rest.trim_start(),
            };
        }

        if let Some(rest) = trimmed
            .strip_prefix('-')
            .or_else(|| trimmed.strip_prefix('*'))
        {
            return LineKind::ListItem(rest.trim_start());
        }

        LineKind::PlainText(trimmed)
    }
}

/// Trims whitespace and byte-order marks from both ends of a line.
pub fn trim_line(line: &str) -> &str {
    line.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// Trimmed, non-blank lines of `content` in their original order.
pub fn non_blank_lines(content: &str) -> impl Iterator<Item = &str> {
    content
        .split('\n')
        .map(trim_line)
        .filter(|line| !line.is_empty())
}
