//! Terminal output helpers. Styled text for humans, one JSON object per line for machines.
//!
//! Uses:
//! - `console` for colors (respects NO_COLOR, auto-disables when piped)
//! - `comfy-table` for the config listing
//! - `indicatif` for the "thinking" spinner

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use localchat_gateway::GatewayResult;
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::cli::OutputFormat;

// ── Global format flag ─────────────────────────────────────────────

static JSON_MODE: AtomicBool = AtomicBool::new(false);

pub fn init(format: OutputFormat) {
    if matches!(format, OutputFormat::Json) {
        JSON_MODE.store(true, Ordering::Relaxed);
    }
}

fn is_json() -> bool {
    JSON_MODE.load(Ordering::Relaxed)
}

// ── JSON envelope ──────────────────────────────────────────────────

#[derive(Serialize)]
struct Msg<'a> {
    level: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a JsonValue>,
}

fn envelope(level: &str, message: &str, data: Option<&JsonValue>) -> String {
    let msg = Msg {
        level,
        message,
        data,
    };
    serde_json::to_string(&msg).unwrap_or_else(|_| {
        let fallback = serde_json::json!({ "level": level, "message": message });
        fallback.to_string()
    })
}

fn emit_json(level: &str, message: &str, data: Option<&JsonValue>) {
    println!("{}", envelope(level, message, data));
}

// ── Public helpers ─────────────────────────────────────────────────

pub fn header(text: &str) {
    if is_json() {
        emit_json("info", text, None);
    } else {
        println!("{}", style(text).bold().cyan());
    }
}

pub fn error(text: &str) {
    if is_json() {
        eprintln!("{}", envelope("error", text, None));
    } else {
        eprintln!("{} {}", style("✗").red(), style(text).bright());
    }
}

pub fn warning(text: &str) {
    if is_json() {
        emit_json("warning", text, None);
    } else {
        println!("{} {}", style("!").yellow(), style(text).bright());
    }
}

pub fn dim(text: &str) {
    if is_json() {
        emit_json("info", text, None);
    } else {
        println!("{}", style(text).dim());
    }
}

/// Input marker for the interactive loop. Nothing in JSON mode.
pub fn prompt_marker() {
    if is_json() {
        return;
    }
    print!("{} ", style("you ›").green().bold());
    let _ = std::io::stdout().flush();
}

/// Print the outcome of one exchange. Fallbacks are styled as warnings
/// and tagged with their reason.
pub fn reply(result: &GatewayResult) {
    if is_json() {
        let data = serde_json::to_value(result).unwrap_or(JsonValue::Null);
        let level = if result.is_fallback() { "fallback" } else { "reply" };
        emit_json(level, result.text(), Some(&data));
        return;
    }

    match result {
        GatewayResult::Reply(text) => {
            println!("{} {}", style("assistant ›").cyan().bold(), text);
        }
        GatewayResult::Fallback { reason, text } => {
            println!(
                "{} {} {}",
                style("assistant ›").yellow().bold(),
                style(text).yellow(),
                style(format!("[{reason}]")).dim()
            );
        }
    }
}

// ── Tables ─────────────────────────────────────────────────────────

/// Create a styled two-column table.
pub fn table(col1: &str, col2: &str) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new(col1).fg(Color::Cyan).add_attribute(Attribute::Bold),
            Cell::new(col2).fg(Color::Cyan).add_attribute(Attribute::Bold),
        ]);
    table
}

pub fn table_row(table: &mut Table, name: &str, value: &str) {
    table.add_row(vec![Cell::new(name).fg(Color::Green), Cell::new(value)]);
}

/// Print a table (JSON mode emits `data` instead).
pub fn table_print(table: &Table, message: &str, data: &JsonValue) {
    if is_json() {
        emit_json("data", message, Some(data));
    } else {
        println!("{table}");
    }
}

// ── Spinners ───────────────────────────────────────────────────────

/// Spinner on stderr while a request is in flight. Hidden in JSON mode.
pub fn spinner(message: &str) -> ProgressBar {
    if is_json() {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}

#[cfg(test)]
mod tests {
    use super::*;
    use localchat_gateway::FallbackReason;

    #[test]
    fn test_envelope_omits_missing_data() {
        let line = envelope("info", "hello", None);
        let parsed: JsonValue = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["level"], "info");
        assert_eq!(parsed["message"], "hello");
        assert!(parsed.get("data").is_none());
    }

    #[test]
    fn test_envelope_escapes_message() {
        let line = envelope("error", "bad \"quote\"\nline", None);
        let parsed: JsonValue = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["message"], "bad \"quote\"\nline");
    }

    #[test]
    fn test_envelope_carries_fallback_data() {
        let result = GatewayResult::fallback(FallbackReason::BackendError { status: 502 });
        let data = serde_json::to_value(&result).unwrap();
        let line = envelope("fallback", result.text(), Some(&data));
        let parsed: JsonValue = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["message"], "Local LLM returned HTTP 502.");
        assert!(parsed["data"].is_object());
    }
}
