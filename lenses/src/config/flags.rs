// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Lenses CLI Authors

//! Connection flags shared by every command.

use crate::auth::{AuthFlags, Authentication};
use crate::profile::ClientProfile;
use clap::Args;
use std::path::PathBuf;

/// Flags selecting and overriding the connection profile.
///
/// Flatten this into the top-level parser; all flags are global so they
/// may appear before or after the sub-command.
#[derive(Args, Clone, Debug, Default)]
pub struct ConnectionArgs {
    /// Configuration file to use instead of searching the default locations
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Context to use (and make the saved default)
    #[arg(long, global = true, value_name = "NAME")]
    pub context: Option<String>,

    /// Service URL, e.g. https://lenses.example.com
    #[arg(long, global = true, value_name = "URL")]
    pub host: Option<String>,

    /// Username for basic or Kerberos password authentication
    #[arg(long, global = true, value_name = "USER")]
    pub user: Option<String>,

    /// Password for basic or Kerberos password authentication
    #[arg(long, global = true, value_name = "PASSWORD")]
    pub pass: Option<String>,

    /// Kerberos configuration file (krb5.conf); selects Kerberos authentication
    #[arg(long = "kerberos-conf", global = true, value_name = "FILE")]
    pub kerberos_conf: Option<String>,

    /// Kerberos realm
    #[arg(long = "kerberos-realm", global = true, value_name = "REALM")]
    pub kerberos_realm: Option<String>,

    /// Kerberos keytab file
    #[arg(long = "kerberos-keytab", global = true, value_name = "FILE")]
    pub kerberos_keytab: Option<String>,

    /// Kerberos credential cache file
    #[arg(long = "kerberos-ccache", global = true, value_name = "FILE")]
    pub kerberos_ccache: Option<String>,

    /// Request timeout, e.g. 30s or 2m
    #[arg(long, global = true, value_name = "DURATION")]
    pub timeout: Option<String>,

    /// Skip TLS certificate verification
    #[arg(long, global = true)]
    pub insecure: bool,

    /// Access token
    #[arg(long, global = true, value_name = "TOKEN")]
    pub token: Option<String>,

    /// Log HTTP requests and responses
    #[arg(long, global = true)]
    pub debug: bool,
}

impl ConnectionArgs {
    fn auth_flags(&self) -> AuthFlags<'_> {
        AuthFlags {
            user: self.user.as_deref().unwrap_or_default(),
            pass: self.pass.as_deref().unwrap_or_default(),
            kerberos_conf: self.kerberos_conf.as_deref().unwrap_or_default(),
            kerberos_realm: self
                .kerberos_realm
                .as_deref()
                .unwrap_or_default(),
            kerberos_keytab: self
                .kerberos_keytab
                .as_deref()
                .unwrap_or_default(),
            kerberos_ccache: self
                .kerberos_ccache
                .as_deref()
                .unwrap_or_default(),
        }
    }

    /// Authentication described by the credential flags, if complete.
    pub fn authentication(&self) -> Option<Authentication> {
        Authentication::from_flags(&self.auth_flags())
    }

    /// Scalar flag values as a profile, ready to be laid over a stored one
    /// with [`ClientProfile::fill`]. Authentication is not included.
    pub fn overlay(&self) -> ClientProfile {
        ClientProfile {
            host: self.host.clone().unwrap_or_default(),
            token: self.token.clone().unwrap_or_default(),
            timeout: self.timeout.clone().unwrap_or_default(),
            insecure: self.insecure,
            debug: self.debug,
            authentication: None,
        }
    }

    /// The `--context` value, ignoring an empty string.
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref().filter(|name| !name.is_empty())
    }
}
