// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Lenses CLI Authors

//! Error handling for lensesctl
//!
//! - [`LensesctlError`] - Main error enum covering all error types
//! - [`ErrorContext`] - Trait for adding context to errors
//! - JSON serialization support for structured error output

use lenses::config::ConfigError;
use serde_json::{json, Value};
use thiserror::Error;

use crate::client::error::ClientError;

/// Main error type for lensesctl operations
#[derive(Error, Debug)]
pub enum LensesctlError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Client-specific errors
    #[error("Client error: {0}")]
    Client(#[from] ClientError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("Error: {0:#}")]
    Generic(#[from] anyhow::Error),
}

impl LensesctlError {
    /// Create a new validation error
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    /// Error code for JSON output
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Config(ConfigError::UnknownContext { .. }) => {
                "UNKNOWN_CONTEXT"
            }
            Self::Config(_) => "CONFIG_ERROR",
            Self::Client(ClientError::Api { .. }) => "API_ERROR",
            Self::Client(_) => "CLIENT_ERROR",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::Generic(_) => "GENERIC_ERROR",
        }
    }

    /// Convert the error to a JSON value for output
    ///
    /// ```json
    /// {"error": {"code": "...", "message": "...", "details": null}}
    /// ```
    pub fn to_json(&self) -> Value {
        json!({
            "error": {
                "code": self.error_code(),
                "message": self.to_string(),
                "details": self.error_details()
            }
        })
    }

    fn error_details(&self) -> Value {
        match self {
            Self::Client(ClientError::Api { status, body }) => {
                let response = serde_json::from_str::<Value>(body)
                    .unwrap_or_else(|_| Value::String(body.clone()));
                json!({
                    "http_status": status,
                    "response": response
                })
            }
            Self::Config(ConfigError::UnknownContext { name }) => json!({
                "context": name
            }),
            _ => Value::Null,
        }
    }
}

/// Helper trait for adding context to results
pub trait ErrorContext<T> {
    /// Wrap the error with the message returned by `f`
    fn with_context<F>(self, f: F) -> Result<T, LensesctlError>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: Into<LensesctlError>,
{
    fn with_context<F>(self, f: F) -> Result<T, LensesctlError>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let base_error = e.into();
            LensesctlError::Generic(
                anyhow::Error::new(base_error).context(f()),
            )
        })
    }
}
