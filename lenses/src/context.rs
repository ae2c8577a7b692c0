// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Lenses CLI Authors

//! Named contexts and the current-context pointer.
//!
//! [`Config`] is exactly what is persisted in the configuration file:
//!
//! ```yaml
//! currentContext: prod
//! contexts:
//!   prod:
//!     host: https://lenses.example.com
//!     basic:
//!       username: admin
//!       password: <ciphertext>
//! ```
//!
//! Contexts are kept in name order, so listing them and choosing a new
//! current context after a removal are deterministic.

use crate::profile::ClientProfile;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Name used when neither the command line nor the file selects a context.
pub const DEFAULT_CONTEXT: &str = "default";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ContextError {
    /// No context with this name
    #[error("context '{0}' does not exist")]
    NotFound(String),

    /// Refusing to leave the store without a current context
    #[error("context '{0}' is the current and only context and cannot be removed")]
    LastContext(String),
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(
        rename = "currentContext",
        default,
        skip_serializing_if = "String::is_empty"
    )]
    pub current_context: String,
    #[serde(default)]
    pub contexts: BTreeMap<String, ClientProfile>,
}

impl Config {
    /// Insert or replace a context.
    pub fn add_context(&mut self, name: &str, profile: ClientProfile) {
        if self.contexts.insert(name.to_string(), profile).is_some() {
            debug!("Replaced context {name}");
        }
    }

    /// Remove a context.
    ///
    /// When the removed context was the current one, the first remaining
    /// context in name order becomes current. Nothing changes on error.
    pub fn remove_context(&mut self, name: &str) -> Result<(), ContextError> {
        if !self.context_exists(name) {
            return Err(ContextError::NotFound(name.to_string()));
        }

        let is_current = self.current_context == name;
        if is_current && self.contexts.len() == 1 {
            return Err(ContextError::LastContext(name.to_string()));
        }

        let _ = self.contexts.remove(name);
        if is_current {
            if let Some(next) = self.contexts.keys().next() {
                debug!("Context {name} removed, switching to {next}");
                self.current_context = next.clone();
            }
        }
        Ok(())
    }

    /// Make `name` the current context, creating an empty one if needed.
    ///
    /// The returned borrow is the stored profile itself, so changes made
    /// through it are what a later save writes.
    pub fn set_current(&mut self, name: &str) -> &mut ClientProfile {
        self.current_context = name.to_string();
        self.contexts.entry(name.to_string()).or_insert_with(|| {
            debug!("Creating context {name}");
            ClientProfile::default()
        })
    }

    pub fn current(&self) -> Option<&ClientProfile> {
        self.contexts.get(&self.current_context)
    }

    pub fn current_mut(&mut self) -> Option<&mut ClientProfile> {
        self.contexts.get_mut(&self.current_context)
    }

    pub fn context(&self, name: &str) -> Option<&ClientProfile> {
        self.contexts.get(name)
    }

    pub fn context_exists(&self, name: &str) -> bool {
        self.contexts.contains_key(name)
    }

    pub fn current_context_exists(&self) -> bool {
        self.context_exists(&self.current_context)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.contexts.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{
        Authentication, BasicAuth, KerberosAuth, KerberosMethod,
    };

    fn profile(host: &str) -> ClientProfile {
        ClientProfile {
            host: host.to_string(),
            ..ClientProfile::default()
        }
    }

    fn store() -> Config {
        let mut config = Config::default();
        config.add_context("bar", profile("https://bar"));
        config.add_context("foo", profile("https://foo"));
        config.add_context("zed", profile("https://zed"));
        config.current_context = "foo".to_string();
        config
    }

    #[test]
    fn test_add_context_replaces() {
        let mut config = store();
        config.add_context("foo", profile("https://other"));
        assert_eq!(config.contexts.len(), 3);
        assert_eq!(config.context("foo").unwrap().host, "https://other"); //#[allow_ci]
    }

    #[test]
    fn test_remove_missing_context() {
        let mut config = store();
        let before = config.clone();
        assert_eq!(
            config.remove_context("nope"),
            Err(ContextError::NotFound("nope".to_string()))
        );
        assert_eq!(config, before);
    }

    #[test]
    fn test_remove_non_current_context() {
        let mut config = store();
        config.remove_context("zed").unwrap(); //#[allow_ci]
        assert!(!config.context_exists("zed"));
        assert_eq!(config.current_context, "foo");
    }

    #[test]
    fn test_remove_current_promotes_first_remaining() {
        let mut config = store();
        config.remove_context("foo").unwrap(); //#[allow_ci]
        assert_eq!(config.current_context, "bar");
        assert!(config.current_context_exists());
    }

    #[test]
    fn test_remove_last_current_context_fails() {
        let mut config = Config::default();
        let _ = config.set_current("only");
        let before = config.clone();
        assert_eq!(
            config.remove_context("only"),
            Err(ContextError::LastContext("only".to_string()))
        );
        assert_eq!(config, before);
    }

    #[test]
    fn test_remove_last_context_when_not_current() {
        let mut config = Config::default();
        config.add_context("only", profile("https://only"));
        config.remove_context("only").unwrap(); //#[allow_ci]
        assert!(config.is_empty());
    }

    #[test]
    fn test_set_current_creates_and_shares() {
        let mut config = store();
        config.set_current("new").host = "https://new".to_string();

        assert_eq!(config.current_context, "new");
        assert_eq!(config.current().unwrap().host, "https://new"); //#[allow_ci]
        assert_eq!(config.contexts.len(), 4);

        if let Some(current) = config.current_mut() {
            current.token = "t".to_string();
        }
        assert_eq!(config.context("new").unwrap().token, "t"); //#[allow_ci]
    }

    #[test]
    fn test_set_current_existing_keeps_profile() {
        let mut config = store();
        let current = config.set_current("bar");
        assert_eq!(current.host, "https://bar");
        assert_eq!(config.contexts.len(), 3);
    }

    #[test]
    fn test_current_context_exists() {
        let mut config = store();
        assert!(config.current_context_exists());
        config.current_context = "ghost".to_string();
        assert!(!config.current_context_exists());
        assert!(config.current().is_none());
    }

    #[test]
    fn test_clone_is_deep() {
        let mut config = store();
        let mut copy = config.clone();
        copy.set_current("foo").host = "https://changed".to_string();
        assert_eq!(config.current().unwrap().host, "https://foo"); //#[allow_ci]
        let _ = config.set_current("bar");
        assert_eq!(copy.current_context, "foo");
    }

    #[test]
    fn test_names_sorted() {
        let config = store();
        let names: Vec<&str> = config.names().collect();
        assert_eq!(names, vec!["bar", "foo", "zed"]);
    }

    fn all_variants() -> Config {
        let mut config = Config::default();
        config.add_context(
            "basic",
            ClientProfile {
                host: "https://basic.example.com".to_string(),
                token: "tok".to_string(),
                timeout: "30s".to_string(),
                insecure: true,
                debug: false,
                authentication: Some(Authentication::Basic(BasicAuth {
                    username: "admin".to_string(),
                    password: "c2VjcmV0".to_string(),
                })),
            },
        );
        config.add_context(
            "krb-password",
            ClientProfile {
                host: "https://krb.example.com".to_string(),
                authentication: Some(Authentication::Kerberos(
                    KerberosAuth {
                        conf_file: "/etc/krb5.conf".to_string(),
                        realm: "EXAMPLE.COM".to_string(),
                        method: KerberosMethod::WithPassword {
                            username: "admin".to_string(),
                            password: "c2VjcmV0".to_string(),
                        },
                    },
                )),
                ..ClientProfile::default()
            },
        );
        config.add_context(
            "krb-keytab",
            ClientProfile {
                host: "https://krb.example.com".to_string(),
                debug: true,
                authentication: Some(Authentication::Kerberos(
                    KerberosAuth {
                        conf_file: "/etc/krb5.conf".to_string(),
                        realm: String::new(),
                        method: KerberosMethod::WithKeytab {
                            username: "svc".to_string(),
                            keytab_file: "/etc/svc.keytab".to_string(),
                        },
                    },
                )),
                ..ClientProfile::default()
            },
        );
        config.add_context(
            "krb-ccache",
            ClientProfile {
                host: "https://krb.example.com".to_string(),
                authentication: Some(Authentication::Kerberos(
                    KerberosAuth {
                        conf_file: "/etc/krb5.conf".to_string(),
                        realm: "EXAMPLE.COM".to_string(),
                        method: KerberosMethod::FromCCache {
                            ccache_file: "/tmp/krb5cc_1000".to_string(),
                        },
                    },
                )),
                ..ClientProfile::default()
            },
        );
        config.current_context = "krb-password".to_string();
        config
    }

    #[test]
    fn test_yaml_roundtrip_all_variants() {
        let config = all_variants();
        let yaml = serde_yaml::to_string(&config).unwrap(); //#[allow_ci]
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap(); //#[allow_ci]
        assert_eq!(parsed, config);

        // The password login must stay Kerberos even though its fields look
        // like basic authentication
        let krb = parsed.context("krb-password").unwrap(); //#[allow_ci]
        assert!(krb.authentication.as_ref().unwrap().as_basic().is_none()); //#[allow_ci]
        assert_eq!(
            krb.authentication.as_ref().unwrap().kind(), //#[allow_ci]
            "kerberos/password"
        );
    }

    #[test]
    fn test_json_roundtrip_all_variants() {
        let config = all_variants();
        let json = serde_json::to_string_pretty(&config).unwrap(); //#[allow_ci]
        let parsed: Config = serde_json::from_str(&json).unwrap(); //#[allow_ci]
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_yaml_file_layout() {
        let yaml = r#"
currentContext: prod
contexts:
  prod:
    host: https://lenses.example.com
    timeout: 30s
    basic:
      username: admin
      password: c2VjcmV0
  krb:
    host: https://krb.example.com
    insecure: true
    kerberos:
      confFile: /etc/krb5.conf
      realm: EXAMPLE.COM
      method:
        keytab:
          username: svc
          keytabFile: /etc/svc.keytab
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap(); //#[allow_ci]
        assert_eq!(config.current_context, "prod");
        assert_eq!(config.contexts.len(), 2);
        assert_eq!(
            config.current().unwrap().authentication.as_ref().unwrap().kind(), //#[allow_ci]
            "basic"
        );
        let krb = config.context("krb").unwrap(); //#[allow_ci]
        assert!(krb.insecure);
        assert_eq!(
            krb.authentication.as_ref().unwrap().kind(), //#[allow_ci]
            "kerberos/keytab"
        );
    }

    #[test]
    fn test_empty_document_fields_default() {
        let config: Config = serde_yaml::from_str("contexts: {}\n").unwrap(); //#[allow_ci]
        assert!(config.current_context.is_empty());
        assert!(config.is_empty());
    }
}
