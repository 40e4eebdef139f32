use super::classify::trim_line;
use super::{convert_with, ConvertOptions, TargetFormat};
use log::debug;

/// Select-a-format, convert, then hand the result back.
///
/// A conversion with no format selected or with blank source text is
/// declined and leaves the previous output in place.
#[derive(Debug, Default, Clone)]
pub struct ConversionSession {
    options: ConvertOptions,
    selected: Option<TargetFormat>,
    converted: String,
}

impl ConversionSession {
    pub fn new(options: ConvertOptions) -> Self {
        Self {
            options,
            selected: None,
            converted: String::new(),
        }
    }

    pub fn select(&mut self, format: TargetFormat) {
        self.selected = Some(format);
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<TargetFormat> {
        self.selected
    }

    pub fn converted(&self) -> &str {
        &self.converted
    }

    pub fn can_convert(&self, source: &str) -> bool {
        self.selected.is_some() && !trim_line(source).is_empty()
    }

    /// Returns whether a conversion actually ran.
    pub fn convert(&mut self, source: &str) -> bool {
        let format = match self.selected {
            Some(format) if !trim_line(source).is_empty() => format,
            _ => {
                debug!("Conversion declined: no format selected or empty source");
                return false;
            }
        };

        self.converted = convert_with(source, format, &self.options);
        true
    }

    /// Takes the converted output and resets the session.
    pub fn use_converted(&mut self) -> Option<String> {
        if self.converted.is_empty() {
            return None;
        }
        let converted = std::mem::take(&mut self.converted);
        self.selected = None;
        Some(converted)
    }

    pub fn cancel(&mut self) {
        self.selected = None;
        self.converted.clear();
    }
}
