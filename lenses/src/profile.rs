// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Lenses CLI Authors

//! A single named connection profile.

use crate::auth::{Authentication, BasicAuth, KerberosAuth};
use crate::crypto::{self, CryptoError};
use serde::{Deserialize, Serialize};

/// Connection settings of one context.
///
/// The authentication is flattened into the profile object, so on disk a
/// profile looks like:
///
/// ```yaml
/// host: https://lenses.example.com
/// timeout: 30s
/// basic:
///   username: admin
///   password: <ciphertext>
/// ```
///
/// A malformed `basic` or `kerberos` object is a parse error, as is a
/// profile carrying both.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredProfile")]
pub struct ClientProfile {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub host: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub token: String,
    /// Request timeout, e.g. `30s`. Interpreted by the HTTP client only.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub timeout: String,
    #[serde(default)]
    pub insecure: bool,
    #[serde(default)]
    pub debug: bool,
    #[serde(flatten)]
    pub authentication: Option<Authentication>,
}

/// On-disk shape of a profile. The authentication keys are plain optional
/// fields here so that an error inside them is reported instead of being
/// read as "no authentication".
#[derive(Deserialize)]
struct StoredProfile {
    #[serde(default)]
    host: String,
    #[serde(default)]
    token: String,
    #[serde(default)]
    timeout: String,
    #[serde(default)]
    insecure: bool,
    #[serde(default)]
    debug: bool,
    #[serde(default)]
    basic: Option<BasicAuth>,
    #[serde(default)]
    kerberos: Option<KerberosAuth>,
}

impl TryFrom<StoredProfile> for ClientProfile {
    type Error = String;

    fn try_from(stored: StoredProfile) -> Result<Self, Self::Error> {
        let authentication = match (stored.basic, stored.kerberos) {
            (Some(_), Some(_)) => {
                return Err("a profile cannot carry both basic and kerberos \
                            authentication"
                    .to_string());
            }
            (Some(basic), None) => Some(Authentication::Basic(basic)),
            (None, Some(kerberos)) => Some(Authentication::Kerberos(kerberos)),
            (None, None) => None,
        };

        Ok(ClientProfile {
            host: stored.host,
            token: stored.token,
            timeout: stored.timeout,
            insecure: stored.insecure,
            debug: stored.debug,
            authentication,
        })
    }
}

impl ClientProfile {
    /// Copy every non-empty field of `other` onto `self`.
    ///
    /// Empty strings, `false` and a missing authentication never overwrite
    /// what is already set, so flag values can be laid over a stored
    /// profile without knowing which flags were actually given.
    pub fn fill(&mut self, other: &ClientProfile) {
        if !other.host.is_empty() {
            self.host = other.host.clone();
        }
        if !other.token.is_empty() {
            self.token = other.token.clone();
        }
        if !other.timeout.is_empty() {
            self.timeout = other.timeout.clone();
        }
        if other.insecure {
            self.insecure = true;
        }
        if other.debug {
            self.debug = true;
        }
        if let Some(ref authentication) = other.authentication {
            self.authentication = Some(authentication.clone());
        }
    }

    /// A profile is usable when it names a host and carries an
    /// authentication.
    pub fn is_valid(&self) -> bool {
        !self.host.is_empty() && self.authentication.is_some()
    }

    /// Trim surrounding whitespace and trailing slashes from the host.
    pub fn normalize_host(&mut self) {
        let normalized = self.host.trim().trim_end_matches('/').to_string();
        self.host = normalized;
    }

    /// Replace the plaintext password, if any, by its ciphertext.
    pub fn encrypt_password(&mut self) -> Result<(), CryptoError> {
        let host = self.host.clone();
        if let Some(password) = self
            .authentication
            .as_mut()
            .and_then(Authentication::password_mut)
        {
            *password = crypto::encrypt(password, &host)?;
        }
        Ok(())
    }

    /// Replace the stored ciphertext, if any, by the plaintext password.
    pub fn decrypt_password(&mut self) -> Result<(), CryptoError> {
        let host = self.host.clone();
        self.decrypt_password_with_host(&host)
    }

    /// Like [`ClientProfile::decrypt_password`], keyed by `host` instead of
    /// the current host of the profile.
    pub fn decrypt_password_with_host(
        &mut self,
        host: &str,
    ) -> Result<(), CryptoError> {
        if let Some(password) = self
            .authentication
            .as_mut()
            .and_then(Authentication::password_mut)
        {
            *password = crypto::decrypt(password, host)?;
        }
        Ok(())
    }

    /// Drop the password, keeping the rest of the authentication.
    pub fn clear_password(&mut self) {
        if let Some(password) = self
            .authentication
            .as_mut()
            .and_then(Authentication::password_mut)
        {
            password.clear();
        }
    }
}
