// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Lenses CLI Authors

//! HTTP client built from a resolved connection profile
//!
//! The client is created per command from the profile the configuration
//! manager resolved; nothing about it is cached between invocations.

use crate::client::error::ClientError;
use lenses::auth::{Authentication, KerberosAuth, KerberosMethod};
use lenses::profile::ClientProfile;
use log::{debug, warn};
use serde_json::Value;
use std::fmt;
use std::time::Duration;

/// Request timeout used when the profile does not set one
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

enum Credentials {
    Anonymous,
    Basic { username: String, password: String },
    Bearer(String),
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::Anonymous => f.write_str("Anonymous"),
            Credentials::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .finish_non_exhaustive(),
            Credentials::Bearer(_) => f.write_str("Bearer"),
        }
    }
}

/// HTTP client for one Lenses service
#[derive(Debug)]
pub struct BaseClient {
    /// The underlying HTTP client
    pub client: reqwest::Client,
    /// Service URL without a trailing slash
    pub base_url: String,
    credentials: Credentials,
    debug: bool,
}

impl BaseClient {
    /// Create a client for the service described by `profile`.
    ///
    /// A token is sent as a bearer token and takes precedence over a basic
    /// authentication login.
    ///
    /// # Errors
    ///
    /// - the profile has no host
    /// - the timeout is not a duration such as `30s` or `2m`
    /// - the profile authenticates with Kerberos
    /// - the HTTP client cannot be initialized
    pub fn new(profile: &ClientProfile) -> Result<Self, ClientError> {
        let base_url = profile.host.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ClientError::configuration(
                "no host configured for the current context",
            ));
        }

        let credentials = Self::credentials(profile)?;
        let client = Self::create_http_client(profile)?;
        debug!("Created client for {base_url} using {credentials:?}");

        Ok(Self {
            client,
            base_url,
            credentials,
            debug: profile.debug,
        })
    }

    /// Create the underlying HTTP client with the profile timeout and TLS
    /// settings.
    pub fn create_http_client(
        profile: &ClientProfile,
    ) -> Result<reqwest::Client, ClientError> {
        let timeout = parse_timeout(&profile.timeout)?;
        debug!("Creating HTTP client with timeout {timeout:?}");

        let mut builder = reqwest::Client::builder().timeout(timeout);
        if profile.insecure {
            builder = builder.danger_accept_invalid_certs(true);
            warn!("Server certificate verification is disabled");
        }

        builder.build().map_err(ClientError::Network)
    }

    fn credentials(profile: &ClientProfile) -> Result<Credentials, ClientError> {
        if !profile.token.is_empty() {
            return Ok(Credentials::Bearer(profile.token.clone()));
        }

        match profile.authentication {
            Some(Authentication::Basic(ref basic)) => Ok(Credentials::Basic {
                username: basic.username.clone(),
                password: basic.password.clone(),
            }),
            Some(Authentication::Kerberos(ref kerberos)) => {
                Err(kerberos_unsupported(kerberos))
            }
            None => Ok(Credentials::Anonymous),
        }
    }

    /// Absolute URL of `path` on this service
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Authenticated `GET` returning the decoded JSON body.
    pub async fn get_json(&self, path: &str) -> Result<Value, ClientError> {
        let url = self.url(path);
        if self.debug {
            debug!("GET {url}");
        }

        let request = self.client.get(&url);
        let request = match self.credentials {
            Credentials::Anonymous => request,
            Credentials::Basic {
                ref username,
                ref password,
            } => request.basic_auth(username, Some(password)),
            Credentials::Bearer(ref token) => request.bearer_auth(token),
        };

        let response = request.send().await?;
        self.handle_response(response).await
    }

    /// Turn a response into JSON, or into [`ClientError::Api`] for any
    /// non-success status. An empty body decodes to `null`.
    pub async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> Result<Value, ClientError> {
        let status = response.status();
        let body = response.text().await?;
        if self.debug {
            debug!("Response {status}: {body}");
        }

        if !status.is_success() {
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }
}

/// Parse a timeout such as `30s`, `1m 30s` or `500ms`. Empty means
/// [`DEFAULT_TIMEOUT`].
pub fn parse_timeout(value: &str) -> Result<Duration, ClientError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(DEFAULT_TIMEOUT);
    }

    humantime::parse_duration(value).map_err(|source| {
        ClientError::InvalidTimeout {
            value: value.to_string(),
            source,
        }
    })
}

fn kerberos_unsupported(kerberos: &KerberosAuth) -> ClientError {
    let method = match kerberos.method {
        KerberosMethod::WithPassword { ref username, .. } => {
            format!("password login as {username}")
        }
        KerberosMethod::WithKeytab {
            ref keytab_file, ..
        } => format!("keytab {keytab_file}"),
        KerberosMethod::FromCCache { ref ccache_file } => {
            format!("credential cache {ccache_file}")
        }
    };

    ClientError::KerberosUnsupported {
        method,
        conf_file: kerberos.conf_file.clone(),
    }
}
