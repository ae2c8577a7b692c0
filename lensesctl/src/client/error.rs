// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Lenses CLI Authors

//! Client-specific error types for lensesctl
//!
//! These errors can be converted to the main `LensesctlError` type for
//! user-facing error messages.

use thiserror::Error;

/// Errors raised while building the HTTP client or talking to Lenses
#[derive(Error, Debug)]
pub enum ClientError {
    /// Network/HTTP errors from reqwest
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("API error (status: {status}): {body}")]
    Api { status: u16, body: String },

    /// JSON parsing errors
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// The profile timeout is not a duration
    #[error("Invalid timeout '{value}': {source}")]
    InvalidTimeout {
        value: String,
        source: humantime::DurationError,
    },

    /// Kerberos credentials are stored but cannot be used for requests
    #[error("Kerberos authentication ({method}, configuration {conf_file}) is not supported by this client; use basic authentication or a token")]
    KerberosUnsupported { method: String, conf_file: String },

    /// Client configuration errors
    #[error("Client configuration error: {message}")]
    Configuration { message: String },
}

impl ClientError {
    /// Create a new configuration error
    pub fn configuration<T: Into<String>>(message: T) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ClientError::Api {
            status: 503,
            body: "service unavailable".to_string(),
        };
        assert!(err.to_string().contains("503"));
        assert!(err.to_string().contains("service unavailable"));
    }

    #[test]
    fn test_kerberos_unsupported_names_material() {
        let err = ClientError::KerberosUnsupported {
            method: "keytab /etc/svc.keytab".to_string(),
            conf_file: "/etc/krb5.conf".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/etc/svc.keytab"));
        assert!(msg.contains("/etc/krb5.conf"));
    }

    #[test]
    fn test_configuration_error() {
        let err = ClientError::configuration("no host configured");
        assert_eq!(
            err.to_string(),
            "Client configuration error: no host configured"
        );
    }
}
