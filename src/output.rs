//! JSON and table output formatting for CLI commands.

use serde::Serialize;
use tabled::{Table, Tabled};

use civic_api::ApiError;

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    #[default]
    Json,
    /// Human-readable table
    Table,
}

/// Print a list of items in the selected format
pub fn print_list<T, R>(items: &[T], format: OutputFormat, row: impl Fn(&T) -> R)
where
    T: Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            if items.is_empty() {
                println!("No results found.");
            } else {
                let rows: Vec<R> = items.iter().map(row).collect();
                println!("{}", Table::new(rows));
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(items).unwrap_or_else(|_| "[]".to_string());
            println!("{}", json);
        }
    }
}

/// Print a single item in the selected format
pub fn print_item<T: Serialize + std::fmt::Debug>(item: &T, format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            println!("{:#?}", item);
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(item).unwrap_or_else(|_| "{}".to_string());
            println!("{}", json);
        }
    }
}

/// Print a success message
pub fn print_success(msg: &str) {
    println!("{}", serde_json::json!({ "ok": true, "message": msg }));
}

/// Print a facade error to stderr
pub fn print_error(err: &ApiError) {
    let json = serde_json::to_string(&err.to_response())
        .unwrap_or_else(|_| format!("{{\"error\":\"{}\"}}", err.code()));
    eprintln!("{}", json);
}
