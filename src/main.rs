use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use promptbox::abtest::{self, VariationSet};
use promptbox::api::types::{AbTestRequest, NewPrompt, NewVersion, PromptUpdate};
use promptbox::api::PromptBoxClient;
use promptbox::app::App;
use promptbox::config::{self, ConfigUpdate};
use promptbox::convert::{convert_with, TargetFormat};
use promptbox::error::PromptBoxError;
use promptbox::template;
use promptbox::ui::display;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Turn on verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Configure the application
    Config {
        /// Base URL of the PromptBox backend
        #[arg(long)]
        api_url: Option<String>,

        /// URL of the A/B test endpoint
        #[arg(long)]
        abtest_url: Option<String>,

        /// Request timeout in seconds
        #[arg(long)]
        timeout_secs: Option<u64>,

        /// Escape text and sanitise tag names in XML output
        #[arg(long)]
        escape_xml: Option<bool>,
    },

    /// Convert prompt text to XML, JSON or Markdown
    Convert {
        /// Target format
        #[arg(short, long)]
        to: String,

        /// Read from this file instead of stdin
        file: Option<PathBuf>,

        /// Escape XML special characters for this run
        #[arg(long)]
        escape_xml: bool,
    },

    /// List, create or update stored prompts
    Prompts {
        #[command(subcommand)]
        action: PromptAction,
    },

    /// Browse or record prompt versions
    Versions {
        #[command(subcommand)]
        action: VersionAction,
    },

    /// List or fill prompt templates
    Templates {
        #[command(subcommand)]
        action: TemplateAction,
    },

    /// Run the same input through several prompt variations
    Test {
        /// Test input sent with every variation
        #[arg(long)]
        input: String,

        /// Files holding variation content (at least two)
        #[arg(long = "variation", value_name = "FILE")]
        variations: Vec<PathBuf>,

        /// Base prompt; used to seed Version A and B when no files are given
        #[arg(long)]
        base: Option<String>,
    },

    /// Compare two model variants on one input
    Abtest {
        #[arg(long)]
        input: String,

        #[arg(long, default_value = "gpt")]
        variant_a: String,

        #[arg(long, default_value = "gemini")]
        variant_b: String,
    },
}

#[derive(Subcommand)]
enum PromptAction {
    List,
    Create {
        #[arg(long)]
        title: String,

        /// Prompt text; read from --file or stdin when omitted
        #[arg(long)]
        content: Option<String>,

        #[arg(long)]
        file: Option<PathBuf>,

        /// Tag, repeatable or comma-separated
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    Update {
        id: String,

        /// New title; left unchanged when omitted
        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        content: Option<String>,

        #[arg(long)]
        file: Option<PathBuf>,

        /// Tag, repeatable or comma-separated
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
}

#[derive(Subcommand)]
enum VersionAction {
    List {
        prompt_id: String,
    },
    Create {
        prompt_id: String,

        #[arg(long)]
        content: Option<String>,

        #[arg(long)]
        file: Option<PathBuf>,

        /// What changed in this version
        #[arg(long)]
        note: String,
    },
}

#[derive(Subcommand)]
enum TemplateAction {
    List,
    Render {
        id: String,

        /// Variable assignment, name=value
        #[arg(long = "var")]
        vars: Vec<String>,
    },
}

fn read_content(content: Option<String>, file: Option<&PathBuf>) -> Result<String> {
    if let Some(content) = content {
        return Ok(content);
    }
    if let Some(path) = file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()));
    }
    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read stdin")?;
    Ok(buffer)
}

async fn with_spinner<T, F>(message: &str, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = fut.await;
    spinner.finish_and_clear();
    result
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config_path = cli.config.unwrap_or_else(config::default_config_path);
    let config = config::load_or_create_config(&config_path)?;

    match cli.command {
        Some(Commands::Config {
            api_url,
            abtest_url,
            timeout_secs,
            escape_xml,
        }) => {
            let update = ConfigUpdate {
                api_url,
                abtest_url,
                timeout_secs,
                escape_xml,
            };
            config::update_config(&config_path, &update)?;
            println!("Configuration updated successfully.");
        }
        Some(Commands::Convert {
            to,
            file,
            escape_xml,
        }) => {
            let format: TargetFormat = to
                .parse()
                .map_err(|_| PromptBoxError::UnknownFormat(to.clone()))?;
            let source = read_content(None, file.as_ref())?;

            let mut options = config.convert.clone();
            options.escape_xml |= escape_xml;
            println!("{}", convert_with(&source, format, &options));
        }
        Some(Commands::Prompts { action }) => {
            let client = PromptBoxClient::new(&config)?;
            match action {
                PromptAction::List => {
                    let prompts = with_spinner("Loading prompts...", client.list_prompts()).await?;
                    display::print_prompts(&prompts);
                }
                PromptAction::Create {
                    title,
                    content,
                    file,
                    tags,
                } => {
                    let prompt =
                        NewPrompt::new(&title, read_content(content, file.as_ref())?, &tags)?;
                    let created = with_spinner("Saving...", client.create_prompt(&prompt)).await?;
                    println!("{} Created prompt {}", "✓".bright_green(), created.id);
                }
                PromptAction::Update {
                    id,
                    title,
                    content,
                    file,
                    tags,
                } => {
                    let prompt = PromptUpdate::new(
                        title.as_deref(),
                        read_content(content, file.as_ref())?,
                        &tags,
                    )?;
                    let updated =
                        with_spinner("Saving...", client.update_prompt(&id, &prompt)).await?;
                    println!("{} Updated prompt {}", "✓".bright_green(), updated.id);
                }
            }
        }
        Some(Commands::Versions { action }) => {
            let client = PromptBoxClient::new(&config)?;
            match action {
                VersionAction::List { prompt_id } => {
                    let versions =
                        with_spinner("Loading versions...", client.list_versions(&prompt_id))
                            .await?;
                    display::print_versions(&versions);
                }
                VersionAction::Create {
                    prompt_id,
                    content,
                    file,
                    note,
                } => {
                    let version = NewVersion::new(read_content(content, file.as_ref())?, &note)?;
                    with_spinner("Saving...", client.create_version(&prompt_id, &version))
                        .await?;
                    println!("{} Version created", "✓".bright_green());
                }
            }
        }
        Some(Commands::Templates { action }) => {
            let client = PromptBoxClient::new(&config)?;
            let templates = with_spinner("Loading templates...", client.list_templates()).await?;
            match action {
                TemplateAction::List => display::print_templates(&templates),
                TemplateAction::Render { id, vars } => {
                    let template = templates
                        .iter()
                        .find(|t| t.id == id)
                        .with_context(|| format!("No template with id {}", id))?;
                    let values = template::parse_assignments(&vars)?;
                    println!("{}", template.render(&values)?);
                }
            }
        }
        Some(Commands::Test {
            input,
            variations,
            base,
        }) => {
            abtest::validate_input(&input)?;
            let set = if variations.is_empty() {
                let base = base.context("Provide --variation files or a --base prompt")?;
                VariationSet::new(&base)
            } else {
                let contents = variations
                    .iter()
                    .map(|path| read_content(None, Some(path)))
                    .collect::<Result<Vec<_>>>()?;
                VariationSet::from_contents(contents)?
            };

            let client = PromptBoxClient::new(&config)?;
            let results = with_spinner(
                "Running variations...",
                client.run_variations(&set.runnable(), &input),
            )
            .await?;
            display::print_test_results(&results);
        }
        Some(Commands::Abtest {
            input,
            variant_a,
            variant_b,
        }) => {
            abtest::validate_input(&input)?;
            let request = AbTestRequest {
                input,
                variant_a_id: variant_a,
                variant_b_id: variant_b,
            };

            let client = PromptBoxClient::new(&config)?;
            let response =
                with_spinner("Waiting for both variants...", client.run_abtest(&request)).await?;
            display::print_abtest(&response);
        }
        None => {
            let mut app = App::new(config)?;
            app.run().await?;
        }
    }

    Ok(())
}
