use super::classify::{trim_line, LineKind};
use super::ConvertOptions;

#[derive(Default)]
struct MarkdownState {
    out: String,
    in_list: bool,
}

impl MarkdownState {
    fn push_line(mut self, raw: &str, paragraph_width: usize) -> Self {
        let line = trim_line(raw);

        if line.is_empty() {
            if self.in_list {
                self.out.push('\n');
                self.in_list = false;
            }
            self.out.push('\n');
            return self;
        }

        // Markdown keeps its own rule set: headers get no special casing.
        match LineKind::classify(line) {
            LineKind::KeyValue { key, value } => {
                self.out.push_str(&format!("**{}:** {}\n\n", key, value));
                self.in_list = false;
            }
            LineKind::ListItem(item) => {
                if !self.in_list {
                    self.out.push('\n');
                    self.in_list = true;
                }
                self.out.push_str(&format!("- {}\n", item));
            }
            _ if line.chars().count() > paragraph_width => {
                self.out.push_str(&format!("{}\n\n", line));
                self.in_list = false;
            }
            _ => {
                self.out.push_str(&format!("### {}\n\n", line));
                self.in_list = false;
            }
        }
        self
    }
}

pub fn render(content: &str, options: &ConvertOptions) -> String {
    content
        .split('\n')
        .fold(MarkdownState::default(), |state, line| {
            state.push_line(line, options.paragraph_width)
        })
        .out
        .trim()
        .to_string()
}
