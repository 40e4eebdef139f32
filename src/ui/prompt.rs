use anyhow::Result;
use colored::Colorize;
use std::io::{self, BufRead, Write};

pub struct Prompt;

impl Prompt {
    pub fn new() -> Self {
        Self
    }

    /// Returns `None` on end of input.
    pub fn get_input(&self) -> Result<Option<String>> {
        print!("{} ", ">>".bright_green().bold());
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            return Ok(None);
        }

        Ok(Some(input))
    }

    /// Reads lines until a lone `.` or end of input.
    pub fn get_multiline(&self) -> Result<String> {
        println!("{}", "Enter prompt text, finish with a single '.' line".dimmed());
        read_until_dot(io::stdin().lock())
    }
}

impl Default for Prompt {
    fn default() -> Self {
        Self::new()
    }
}

fn read_until_dot<R: BufRead>(reader: R) -> Result<String> {
    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim_end() == "." {
            break;
        }
        lines.push(line);
    }
    Ok(lines.join("\n"))
}
