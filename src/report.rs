use colored::Colorize;
use serde_json::Value;

use crate::config::ValidationConfig;
use crate::validator::{ValidationError, ValidationResult};

const MAX_ECHO_CHARS: usize = 60;

/// Print the report header.
pub fn print_header(title: &str, config: &ValidationConfig) {
    println!("{}", "=".repeat(80));
    println!("{}", title.bold());
    println!("{}", "=".repeat(80));
    println!("Max key length: {} characters", config.max_key_length);
    println!("Max value size: {} bytes", config.max_value_size);
    if let Some(pattern) = &config.key_pattern {
        println!("Key pattern: {}", pattern);
    }
    println!();
}

/// Print every violation found for one checked item.
pub fn print_result(subject: &str, result: &ValidationResult) {
    println!("{}", "-".repeat(80));

    if !result.has_errors() {
        println!("{} {}", "VALID".green().bold(), subject.cyan());
        return;
    }

    println!(
        "{} {} ({} violation(s))",
        "INVALID".red().bold(),
        subject.cyan(),
        result.len()
    );
    println!("{}", "-".repeat(80));

    for err in result {
        print_error(err);
    }
}

/// Print a single violation.
pub fn print_error(err: &ValidationError) {
    println!("  {} [{}]", err.target().yellow(), err.code().red());
    println!("    Message: {}", err);
    println!("    Value: {}", format_value(err.value()));

    for (key, value) in err.metadata() {
        println!("    {}: {}", key, value);
    }
    println!();
}

fn format_value(value: &Value) -> String {
    let rendered = match value {
        Value::String(s) => format!("\"{}\"", s),
        other => other.to_string(),
    };
    if rendered.chars().count() <= MAX_ECHO_CHARS {
        return rendered;
    }
    let head: String = rendered.chars().take(MAX_ECHO_CHARS).collect();
    format!("{}... ({} characters)", head, rendered.chars().count())
}

/// Print the summary footer.
pub fn print_summary(results: &[(String, ValidationResult)]) {
    println!("{}", "=".repeat(80));

    let failed = results.iter().filter(|(_, r)| r.has_errors()).count();
    let violations: usize = results.iter().map(|(_, r)| r.len()).sum();

    if failed == 0 {
        println!("{}", "All checks passed".green().bold());
    } else {
        println!(
            "{}: {} violation(s) in {} of {} item(s)",
            "Summary".bold(),
            violations.to_string().red(),
            failed,
            results.len()
        );
    }

    println!("{}", "=".repeat(80));
}
