// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Lenses CLI Authors

//! Authentication variants a context can carry.
//!
//! A profile holds at most one [`Authentication`]. On disk the variant is
//! the key of the object (`basic` or `kerberos`) and, for Kerberos, the
//! active method is the key inside `method` (`password`, `keytab` or
//! `ccache`), so a Kerberos password login can never be read back as basic
//! authentication even though both carry a username and a password.

use log::warn;
use serde::{Deserialize, Serialize};

/// Raw credential flag values as given on the command line.
#[derive(Clone, Copy, Debug, Default)]
pub struct AuthFlags<'a> {
    pub user: &'a str,
    pub pass: &'a str,
    pub kerberos_conf: &'a str,
    pub kerberos_realm: &'a str,
    pub kerberos_keytab: &'a str,
    pub kerberos_ccache: &'a str,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Authentication {
    #[serde(rename = "basic")]
    Basic(BasicAuth),
    #[serde(rename = "kerberos")]
    Kerberos(KerberosAuth),
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicAuth {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KerberosAuth {
    #[serde(rename = "confFile")]
    pub conf_file: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub realm: String,
    #[serde(with = "serde_yaml::with::singleton_map")]
    pub method: KerberosMethod,
}

/// Source of the Kerberos credentials handed to the GSSAPI layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum KerberosMethod {
    #[serde(rename = "password")]
    WithPassword { username: String, password: String },
    #[serde(rename = "keytab")]
    WithKeytab {
        #[serde(default, skip_serializing_if = "String::is_empty")]
        username: String,
        #[serde(rename = "keytabFile")]
        keytab_file: String,
    },
    #[serde(rename = "ccache")]
    FromCCache {
        #[serde(rename = "ccacheFile")]
        ccache_file: String,
    },
}

impl Authentication {
    /// Build an authentication from command-line flags.
    ///
    /// A Kerberos configuration file is the strongest signal and wins over
    /// basic credentials. Within Kerberos a keytab wins over a credential
    /// cache, which wins over a username/password pair. Returns `None` when
    /// the flags do not describe a complete authentication.
    pub fn from_flags(flags: &AuthFlags<'_>) -> Option<Self> {
        if !flags.kerberos_conf.is_empty() {
            let method = if !flags.kerberos_keytab.is_empty() {
                KerberosMethod::WithKeytab {
                    username: flags.user.to_string(),
                    keytab_file: flags.kerberos_keytab.to_string(),
                }
            } else if !flags.kerberos_ccache.is_empty() {
                KerberosMethod::FromCCache {
                    ccache_file: flags.kerberos_ccache.to_string(),
                }
            } else if !flags.user.is_empty() && !flags.pass.is_empty() {
                KerberosMethod::WithPassword {
                    username: flags.user.to_string(),
                    password: flags.pass.to_string(),
                }
            } else {
                warn!(
                    "Ignoring --kerberos-conf {}: no keytab, credential cache or username/password given",
                    flags.kerberos_conf
                );
                return None;
            };

            return Some(Authentication::Kerberos(KerberosAuth {
                conf_file: flags.kerberos_conf.to_string(),
                realm: flags.kerberos_realm.to_string(),
                method,
            }));
        }

        if !flags.user.is_empty() && !flags.pass.is_empty() {
            return Some(Authentication::Basic(BasicAuth {
                username: flags.user.to_string(),
                password: flags.pass.to_string(),
            }));
        }

        None
    }

    pub fn as_basic(&self) -> Option<&BasicAuth> {
        match self {
            Authentication::Basic(basic) => Some(basic),
            Authentication::Kerberos(_) => None,
        }
    }

    pub fn as_kerberos(&self) -> Option<&KerberosAuth> {
        match self {
            Authentication::Basic(_) => None,
            Authentication::Kerberos(kerberos) => Some(kerberos),
        }
    }

    /// The secret carried by this authentication, if any.
    pub fn password(&self) -> Option<&str> {
        match self {
            Authentication::Basic(basic) => Some(basic.password.as_str()),
            Authentication::Kerberos(kerberos) => kerberos.method.password(),
        }
    }

    pub fn password_mut(&mut self) -> Option<&mut String> {
        match self {
            Authentication::Basic(basic) => Some(&mut basic.password),
            Authentication::Kerberos(kerberos) => {
                kerberos.method.password_mut()
            }
        }
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            Authentication::Basic(basic) => Some(basic.username.as_str()),
            Authentication::Kerberos(kerberos) => match &kerberos.method {
                KerberosMethod::WithPassword { username, .. }
                | KerberosMethod::WithKeytab { username, .. } => {
                    Some(username.as_str())
                }
                KerberosMethod::FromCCache { .. } => None,
            },
        }
    }

    /// Short label used when listing contexts.
    pub fn kind(&self) -> &'static str {
        match self {
            Authentication::Basic(_) => "basic",
            Authentication::Kerberos(kerberos) => match kerberos.method {
                KerberosMethod::WithPassword { .. } => "kerberos/password",
                KerberosMethod::WithKeytab { .. } => "kerberos/keytab",
                KerberosMethod::FromCCache { .. } => "kerberos/ccache",
            },
        }
    }
}

impl KerberosMethod {
    pub fn has_password(&self) -> bool {
        matches!(self, KerberosMethod::WithPassword { .. })
    }

    pub fn password(&self) -> Option<&str> {
        match self {
            KerberosMethod::WithPassword { password, .. } => {
                Some(password.as_str())
            }
            KerberosMethod::WithKeytab { .. }
            | KerberosMethod::FromCCache { .. } => None,
        }
    }

    fn password_mut(&mut self) -> Option<&mut String> {
        match self {
            KerberosMethod::WithPassword { password, .. } => Some(password),
            KerberosMethod::WithKeytab { .. }
            | KerberosMethod::FromCCache { .. } => None,
        }
    }
}
