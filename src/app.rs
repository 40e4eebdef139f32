use crate::api::types::NewPrompt;
use crate::api::PromptBoxClient;
use crate::config::Config;
use crate::convert::{self, ConversionSession, TargetFormat};
use crate::error::PromptBoxError;
use crate::ui::display::{format_code, format_error, format_info, format_success};
use crate::ui::prompt::Prompt;
use anyhow::{Context, Result};
use colored::Colorize;
use log::info;
use strum::IntoEnumIterator;

const HELP: &str = "\
Commands:
  edit                 type new prompt text
  load <file>          read prompt text from a file
  show                 print the current prompt text
  formats              list target formats
  format <name|none>   select a target format
  convert              convert the current text
  use                  replace the prompt text with the converted output
  cancel               drop the selection and converted output
  save <title> [tags]  store the current text as a new prompt
  exit                 quit";

pub struct App {
    client: PromptBoxClient,
    session: ConversionSession,
    prompt: Prompt,
    source: String,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let client = PromptBoxClient::new(&config)?;
        let session = ConversionSession::new(config.convert.clone());
        let prompt = Prompt::new();

        Ok(Self {
            client,
            session,
            prompt,
            source: String::new(),
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        println!("{}", "Welcome to PromptBox!".bright_green().bold());
        println!("Type 'help' for commands or 'exit' to quit");

        while let Some(input) = self.prompt.get_input()? {
            let input = input.trim();

            if input.eq_ignore_ascii_case("exit") {
                break;
            }

            if let Err(e) = self.execute_command(input).await {
                eprintln!("{} {:#}", "Error:".bright_red().bold(), e);
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    pub async fn execute_command(&mut self, command: &str) -> Result<()> {
        let (verb, rest) = command
            .split_once(char::is_whitespace)
            .map(|(verb, rest)| (verb, rest.trim()))
            .unwrap_or((command, ""));

        match verb {
            "" => {}
            "help" => println!("{}", HELP),
            "edit" => {
                self.source = self.prompt.get_multiline()?;
                println!("{}", format_info(&format!("{} lines read", self.source.lines().count())));
            }
            "load" => {
                self.source = std::fs::read_to_string(rest)
                    .with_context(|| format!("Failed to read prompt file: {}", rest))?;
                info!("Loaded {} bytes from {}", self.source.len(), rest);
            }
            "show" => {
                if self.source.trim().is_empty() {
                    println!("{}", format_info("No content to convert..."));
                } else {
                    println!("{}", self.source);
                }
            }
            "formats" => {
                for format in TargetFormat::iter() {
                    println!("{:<10} {}", format.to_string().bold(), format.description());
                }
            }
            "format" => self.select_format(rest)?,
            "convert" => self.convert(),
            "use" => match self.session.use_converted() {
                Some(converted) => {
                    self.source = converted;
                    println!("{}", format_success("Prompt text replaced with converted output"));
                }
                None => println!("{}", format_info("Nothing converted yet")),
            },
            "cancel" => {
                self.session.cancel();
                println!("{}", format_info("Conversion cancelled"));
            }
            "save" => self.save(rest).await?,
            other => {
                println!("{} {}", format_error("Unknown command:"), other);
                println!("{}", HELP);
            }
        }

        Ok(())
    }

    fn select_format(&mut self, name: &str) -> Result<()> {
        if name.eq_ignore_ascii_case("none") {
            self.session.clear_selection();
            return Ok(());
        }

        let format: TargetFormat = name
            .parse()
            .map_err(|_| PromptBoxError::UnknownFormat(name.to_string()))?;
        self.session.select(format);

        println!("{}", format_info("Format example:"));
        println!("{}", convert::example(format).dimmed());
        Ok(())
    }

    fn convert(&mut self) {
        if !self.session.can_convert(&self.source) {
            println!(
                "{}",
                format_info("Select a format and provide prompt text before converting")
            );
            return;
        }

        self.session.convert(&self.source);
        println!("{}", format_code(self.session.converted()));
    }

    async fn save(&self, args: &str) -> Result<()> {
        let mut words = args.split_whitespace();
        let title = words
            .next()
            .context("Usage: save <title> [tags...]")?
            .to_string();
        let tags: Vec<String> = words.map(str::to_string).collect();

        let prompt = NewPrompt::new(&title, self.source.clone(), &tags)?;
        let created = self.client.create_prompt(&prompt).await?;
        println!("{} Saved prompt {}", "✓".bright_green(), created.id);
        Ok(())
    }
}
