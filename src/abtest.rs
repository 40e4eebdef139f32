use crate::api::types::Variation;
use crate::error::PromptBoxError;
use std::fmt;

pub const MIN_VARIATIONS: usize = 2;

const CREATIVE_SUFFIX: &str = " Use a creative and engaging tone.";

/// Prompt variations under test, named `Version A`, `Version B`, ...
#[derive(Debug, Clone)]
pub struct VariationSet {
    base: String,
    variations: Vec<Variation>,
}

impl VariationSet {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.to_string(),
            variations: vec![
                Variation {
                    name: version_name(0),
                    content: base.to_string(),
                },
                Variation {
                    name: version_name(1),
                    content: format!("{}{}", base, CREATIVE_SUFFIX),
                },
            ],
        }
    }

    /// Builds a set from explicit contents, one variation per entry.
    pub fn from_contents(contents: Vec<String>) -> Result<Self, PromptBoxError> {
        if contents.len() < MIN_VARIATIONS {
            return Err(PromptBoxError::TooFewVariations(MIN_VARIATIONS));
        }
        let base = contents[0].clone();
        let variations = contents
            .into_iter()
            .enumerate()
            .map(|(i, content)| Variation {
                name: version_name(i),
                content,
            })
            .collect();
        Ok(Self { base, variations })
    }

    pub fn add(&mut self) -> &Variation {
        let name = version_name(self.variations.len());
        self.variations.push(Variation {
            name,
            content: self.base.clone(),
        });
        &self.variations[self.variations.len() - 1]
    }

    pub fn update(&mut self, index: usize, content: &str) -> Result<(), PromptBoxError> {
        let variation = self
            .variations
            .get_mut(index)
            .ok_or(PromptBoxError::NoSuchVariation(index))?;
        variation.content = content.to_string();
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<Variation, PromptBoxError> {
        if self.variations.len() <= MIN_VARIATIONS {
            return Err(PromptBoxError::TooFewVariations(MIN_VARIATIONS));
        }
        if index >= self.variations.len() {
            return Err(PromptBoxError::NoSuchVariation(index));
        }
        Ok(self.variations.remove(index))
    }

    pub fn variations(&self) -> &[Variation] {
        &self.variations
    }

    /// Variations worth sending: blank ones are skipped.
    pub fn runnable(&self) -> Vec<&Variation> {
        self.variations
            .iter()
            .filter(|v| !v.content.trim().is_empty())
            .collect()
    }
}

/// Spreadsheet-style labels: A..Z, then AA, AB, ...
fn version_name(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        n -= 1;
        letters.push((b'A' + (n % 26) as u8) as char);
        n /= 26;
    }
    let label: String = letters.iter().rev().collect();
    format!("Version {}", label)
}

pub fn validate_input(input: &str) -> Result<(), PromptBoxError> {
    if input.trim().is_empty() {
        return Err(PromptBoxError::BlankTestInput);
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winner {
    A,
    B,
}

impl Winner {
    /// Lower latency wins; a variant that failed to report one loses, ties go to A.
    pub fn pick(latency_a: Option<f64>, latency_b: Option<f64>) -> Self {
        match (latency_a, latency_b) {
            (None, None) => Winner::A,
            (None, Some(_)) => Winner::B,
            (Some(_), None) => Winner::A,
            (Some(a), Some(b)) => {
                if a <= b {
                    Winner::A
                } else {
                    Winner::B
                }
            }
        }
    }
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Winner::A => write!(f, "A"),
            Winner::B => write!(f, "B"),
        }
    }
}
