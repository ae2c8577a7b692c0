// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Lenses CLI Authors

//! Output formatting and handling for lensesctl
//!
//! Results go to stdout so they can be piped; messages and logs go to
//! stderr.

use crate::error::LensesctlError;
use log::info;
use serde_json::Value;

/// Output format options
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    /// JSON output - structured data suitable for machine processing
    Json,
    /// YAML output - human-readable structured format
    Yaml,
}

impl From<crate::OutputFormat> for Format {
    fn from(format: crate::OutputFormat) -> Self {
        match format {
            crate::OutputFormat::Json => Format::Json,
            crate::OutputFormat::Yaml => Format::Yaml,
        }
    }
}

/// Output handler for formatting and displaying results
#[derive(Debug)]
pub struct OutputHandler {
    format: Format,
    quiet: bool,
}

impl OutputHandler {
    /// Create a new output handler
    pub fn new(format: crate::OutputFormat, quiet: bool) -> Self {
        Self {
            format: format.into(),
            quiet,
        }
    }

    /// Print a successful result to stdout
    pub fn success(&self, value: Value) {
        println!("{}", self.render(&value));
    }

    /// Print an error
    ///
    /// JSON errors go to stdout as a structured document; in YAML mode a
    /// plain message goes to stderr.
    pub fn error(&self, error: LensesctlError) {
        match self.format {
            Format::Json => {
                println!("{}", format_json(&error.to_json()));
            }
            Format::Yaml => {
                eprintln!("Error: {error}");
            }
        }
    }

    /// Informational message, suppressed in quiet mode
    pub fn info<T: AsRef<str>>(&self, message: T) {
        if !self.quiet {
            info!("{}", message.as_ref());
        }
    }

    fn render(&self, value: &Value) -> String {
        match self.format {
            Format::Json => format_json(value),
            Format::Yaml => format_yaml(value),
        }
    }
}

fn format_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

fn format_yaml(value: &Value) -> String {
    match serde_yaml::to_string(value) {
        Ok(yaml) => yaml.trim_end().to_string(),
        Err(_) => format_json(value),
    }
}
