//! CLI output formatting utilities.
//!
//! Status lines go through the `print_*` helpers; machine-readable results
//! are written to stdout as `.properties` text or JSON.

use anyhow::Context;
use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream};

use vstamp_lib::Properties;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

impl OutputFormat {
  pub fn is_json(self) -> bool {
    matches!(self, OutputFormat::Json)
  }
}

pub mod symbols {
  pub const ERROR: &str = "✗";
  pub const INFO: &str = "•";
}

pub fn print_error(message: &str) {
  eprintln!(
    "{} {}",
    symbols::ERROR.if_supports_color(Stream::Stderr, |s| s.red()),
    message.if_supports_color(Stream::Stderr, |s| s.red())
  );
}

pub fn print_info(message: &str) {
  println!(
    "{} {}",
    symbols::INFO.if_supports_color(Stream::Stdout, |s| s.blue()),
    message
  );
}

pub fn print_stat(label: &str, value: &str) {
  println!(
    "  {}: {}",
    label.if_supports_color(Stream::Stdout, |s| s.dimmed()),
    value
  );
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
  println!("{}", json);
  Ok(())
}

pub fn print_properties(properties: &Properties, format: OutputFormat) -> anyhow::Result<()> {
  if format.is_json() {
    print_json(properties)
  } else {
    print!("{}", properties.to_properties_string());
    Ok(())
  }
}
