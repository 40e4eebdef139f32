use crate::abtest::Winner;
use crate::api::types::{AbTestResponse, Prompt, PromptVersion, TestResult};
use crate::template::Template;
use colored::{ColoredString, Colorize};

pub fn format_code(code: &str) -> ColoredString {
    code.bright_white()
}

pub fn format_success(message: &str) -> ColoredString {
    message.bright_green()
}

pub fn format_error(message: &str) -> ColoredString {
    message.bright_red()
}

pub fn format_info(message: &str) -> ColoredString {
    message.bright_blue()
}

pub fn print_prompts(prompts: &[Prompt]) {
    if prompts.is_empty() {
        println!("{}", format_info("No prompts yet."));
        return;
    }

    for prompt in prompts {
        println!(
            "{} {} {}",
            prompt.title.bold(),
            format!("({})", prompt.id).dimmed(),
            prompt.created_display().dimmed()
        );
        if !prompt.tags.is_empty() {
            println!("  tags: {}", prompt.tags.join(", ").cyan());
        }
        println!("  {}", preview(&prompt.content, 80));
    }
}

pub fn print_versions(versions: &[PromptVersion]) {
    if versions.is_empty() {
        println!("{}", format_info("No versions recorded."));
        return;
    }

    for version in versions {
        let created = version
            .created_at
            .as_deref()
            .map(crate::api::types::format_timestamp)
            .unwrap_or_default();
        println!(
            "{} {}",
            format!("v{}", version.version_number).bold(),
            created.dimmed()
        );
        if let Some(note) = version.note.as_deref().filter(|n| !n.is_empty()) {
            println!("  note: {}", note.italic());
        }
        println!("  {}", preview(&version.content, 80));
    }
}

pub fn print_templates(templates: &[Template]) {
    for template in templates {
        println!(
            "{} {} [{}]",
            template.name.bold(),
            format!("({})", template.id).dimmed(),
            template.category
        );
        if !template.description.is_empty() {
            println!("  {}", template.description);
        }
        for variable in &template.variables {
            let marker = if variable.required { "*" } else { " " };
            println!(
                "  {}{} {}",
                marker.bright_red(),
                variable.name.cyan(),
                variable.description.dimmed()
            );
        }
    }
}

pub fn print_test_results(results: &[TestResult]) {
    for result in results {
        println!(
            "{} {} {}",
            result.variation_name.bold(),
            result.model.dimmed(),
            format!("{:.2}s", result.latency).yellow()
        );
        println!("{}\n", result.llm_response);
    }
}

pub fn print_abtest(response: &AbTestResponse) {
    let metrics = &response.metrics;
    let local = Winner::pick(metrics.latency_a, metrics.latency_b);

    for (label, body, latency, tokens) in [
        ("A", &response.response_a, metrics.latency_a, metrics.tokens_a),
        ("B", &response.response_b, metrics.latency_b, metrics.tokens_b),
    ] {
        let latency = latency
            .map(|ms| format!("{:.2} ms", ms))
            .unwrap_or_else(|| "n/a".to_string());
        let tokens = tokens
            .map(|t| t.to_string())
            .unwrap_or_else(|| "n/a".to_string());
        println!(
            "{} latency {} tokens {}",
            format!("Variant {}", label).bold(),
            latency.yellow(),
            tokens.yellow()
        );
        println!("{}\n", body);
    }

    println!("{} {}", "Winner:".bright_green().bold(), metrics.winner);
    if metrics.winner != local.to_string() {
        log::warn!(
            "Backend picked {} but latencies favour {}",
            metrics.winner,
            local
        );
    }
}

/// First line of `content`, cut to `width` characters.
pub fn preview(content: &str, width: usize) -> String {
    let first = content.lines().next().unwrap_or("").trim();
    if first.chars().count() > width {
        let cut: String = first.chars().take(width).collect();
        format!("{}...", cut)
    } else {
        first.to_string()
    }
}
