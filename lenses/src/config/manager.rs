// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Lenses CLI Authors

//! Resolution of the effective connection profile and persistence of the
//! context store.

use super::error::ConfigError;
use super::flags::ConnectionArgs;
use super::paths::SearchPaths;
use crate::context::{Config, DEFAULT_CONTEXT};
use crate::profile::ClientProfile;
use log::{debug, info, warn};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Environment variable selecting the context for the current shell.
pub const CONTEXT_ENV_VAR: &str = "LENSESCTL_CONTEXT";

type EnvLookup = Box<dyn Fn(&str) -> Option<String>>;

/// Owns the connection flags and the loaded context store.
///
/// One manager is built per invocation and handed to the command that runs.
pub struct Manager {
    args: ConnectionArgs,
    search_paths: SearchPaths,
    env: EnvLookup,
    config: Config,
    loaded_from: Option<PathBuf>,
    context_changed: bool,
    auth_from_flags: bool,
    /// Current context written back on save; differs from the live one
    /// while a context override from the environment is in effect
    persisted_current: String,
    /// Contexts whose password is still the ciphertext read from disk,
    /// with the host it is keyed by
    sealed: BTreeMap<String, String>,
}

impl fmt::Debug for Manager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Manager")
            .field("search_paths", &self.search_paths)
            .field("loaded_from", &self.loaded_from)
            .field("current_context", &self.config.current_context)
            .field("persisted_current", &self.persisted_current)
            .field("context_changed", &self.context_changed)
            .field("auth_from_flags", &self.auth_from_flags)
            .finish_non_exhaustive()
    }
}

impl Manager {
    pub fn new(args: ConnectionArgs) -> Self {
        Self {
            args,
            search_paths: SearchPaths::from_env(),
            env: Box::new(|name| std::env::var(name).ok()),
            config: Config::default(),
            loaded_from: None,
            context_changed: false,
            auth_from_flags: false,
            persisted_current: String::new(),
            sealed: BTreeMap::new(),
        }
    }

    /// Replace the directories probed for a configuration file.
    pub fn with_search_paths(mut self, search_paths: SearchPaths) -> Self {
        self.search_paths = search_paths;
        self
    }

    /// Replace the process environment lookup.
    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + 'static,
    {
        self.env = Box::new(lookup);
        self
    }

    /// Resolve the effective profile.
    ///
    /// Sources, highest precedence first: connection flags, the `--config`
    /// file or the first file found in the search paths, and the context
    /// override environment variable. Returns whether the resulting current
    /// profile is usable (see [`ClientProfile::is_valid`]).
    ///
    /// # Errors
    ///
    /// - the `--config` file (or a discovered file) cannot be read or parsed
    /// - switching context could not be saved
    /// - the context override names a context that does not exist
    pub fn load(&mut self) -> Result<bool, ConfigError> {
        let source = match self.args.config {
            Some(ref path) => Some(path.clone()),
            None => self.search_paths.find(),
        };

        match source {
            Some(path) => {
                debug!("Loading configuration from {}", path.display());
                self.config = read_config_file(&path)?;
                self.sealed = self
                    .config
                    .contexts
                    .iter()
                    .map(|(name, profile)| (name.clone(), profile.host.clone()))
                    .collect();
                self.loaded_from = Some(path);
            }
            None => {
                info!("No configuration file found, using command-line flags only");
                self.config = Config::default();
                self.sealed.clear();
                self.loaded_from = None;
            }
        }

        let stored = self.config.current_context.clone();
        let requested = self.args.context().map(str::to_string);
        self.context_changed =
            matches!(requested, Some(ref name) if *name != stored);

        let authentication = self.args.authentication();
        self.auth_from_flags = authentication.is_some();

        // The override only picks among stored contexts and never applies
        // on top of a context switch or credential flags
        let from_env = if !self.context_changed
            && !self.auth_from_flags
            && self.loaded_from.is_some()
        {
            self.context_from_env()
        } else {
            None
        };
        if let Some(ref name) = from_env {
            if !self.config.context_exists(name) {
                return Err(ConfigError::UnknownContext { name: name.clone() });
            }
            debug!("Context {name} selected by {CONTEXT_ENV_VAR}");
        }

        let overridden = from_env.is_some();
        let name = match from_env.or(requested) {
            Some(name) => name,
            None if !stored.is_empty() => stored.clone(),
            None => DEFAULT_CONTEXT.to_string(),
        };
        debug!("Using context {name}");
        self.persisted_current = if overridden { stored } else { name.clone() };

        let overlay = self.args.overlay();
        let current = self.config.set_current(&name);
        if let Some(authentication) = authentication {
            debug!(
                "Using {} authentication from command-line flags",
                authentication.kind()
            );
            current.authentication = Some(authentication);
            let _ = self.sealed.remove(&name);
        }
        current.fill(&overlay);

        if self.loaded_from.is_some() {
            if self.context_changed {
                self.decrypt_all();
                let path = self.save()?;
                info!(
                    "Current context set to {name} in {}",
                    path.display()
                );
            } else if !self.auth_from_flags {
                self.decrypt_all();
            }
        }

        Ok(self.config.current().is_some_and(ClientProfile::is_valid))
    }

    /// Write the context store, with passwords encrypted, to the loaded
    /// file or to `~/.lenses/lensesctl.yml`.
    ///
    /// The in-memory store is left untouched. A context selected through
    /// the environment override is not written as the current context. The file is replaced
    /// atomically and is readable by the owner only.
    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = self.save_path()?;

        let mut config = self.config.clone();
        if config.context_exists(&self.persisted_current) {
            config.current_context = self.persisted_current.clone();
        }
        for (name, profile) in config.contexts.iter_mut() {
            // Sealed passwords are keyed by the host as stored on disk, so
            // that host must not change under them.
            if self.sealed.contains_key(name) {
                continue;
            }
            profile.normalize_host();
            profile.encrypt_password().map_err(|source| {
                ConfigError::Encrypt {
                    context: name.clone(),
                    source,
                }
            })?;
        }

        let yaml =
            serde_yaml::to_string(&config).map_err(ConfigError::Serialize)?;
        write_config_file(&path, &yaml)?;
        debug!("Configuration saved to {}", path.display());
        Ok(path)
    }

    /// Make an existing context the current one.
    pub fn use_context(&mut self, name: &str) -> Result<(), ConfigError> {
        if !self.config.context_exists(name) {
            return Err(ConfigError::UnknownContext {
                name: name.to_string(),
            });
        }
        self.config.current_context = name.to_string();
        self.persisted_current = name.to_string();
        Ok(())
    }

    pub fn remove_context(&mut self, name: &str) -> Result<(), ConfigError> {
        self.config.remove_context(name)?;
        let _ = self.sealed.remove(name);
        if self.persisted_current == name {
            self.persisted_current = self.config.current_context.clone();
        }
        Ok(())
    }

    /// Discard the stored profile of the current context and rebuild it
    /// from the connection flags alone.
    pub fn reset_current(&mut self) -> &ClientProfile {
        let name = if self.config.current_context.is_empty() {
            DEFAULT_CONTEXT.to_string()
        } else {
            self.config.current_context.clone()
        };

        let mut profile = self.args.overlay();
        profile.authentication = self.args.authentication();
        let _ = self.sealed.remove(&name);
        self.config.add_context(&name, profile);
        self.config.set_current(&name)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn current_context(&self) -> &str {
        &self.config.current_context
    }

    pub fn current_profile(&self) -> Option<&ClientProfile> {
        self.config.current()
    }

    /// File the configuration was read from, if any.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.loaded_from.as_deref()
    }

    /// Whether `--context` switched away from the stored current context.
    pub fn context_changed(&self) -> bool {
        self.context_changed
    }

    /// Whether the credential flags produced the current authentication.
    pub fn auth_from_flags(&self) -> bool {
        self.auth_from_flags
    }

    pub fn search_paths(&self) -> &SearchPaths {
        &self.search_paths
    }

    fn save_path(&self) -> Result<PathBuf, ConfigError> {
        self.loaded_from
            .clone()
            .or_else(|| self.search_paths.home_config())
            .ok_or(ConfigError::NoSavePath)
    }

    /// Decrypt every sealed password with the host it was stored under. A
    /// password that does not decrypt is dropped so the rest of the store
    /// stays usable.
    fn decrypt_all(&mut self) {
        for (name, host) in std::mem::take(&mut self.sealed) {
            let Some(profile) = self.config.contexts.get_mut(&name) else {
                continue;
            };
            if let Err(e) = profile.decrypt_password_with_host(&host) {
                warn!("Cannot decrypt the password of context {name}, ignoring it: {e}");
                profile.clear_password();
            }
        }
    }

    /// Context override from the environment, then from `./.env`.
    fn context_from_env(&self) -> Option<String> {
        if let Some(name) =
            (self.env)(CONTEXT_ENV_VAR).filter(|name| !name.is_empty())
        {
            return Some(name);
        }

        let dotenv = self.search_paths.dotenv()?;
        if !dotenv.is_file() {
            return None;
        }

        match dotenvy::from_path_iter(&dotenv) {
            Ok(entries) => entries
                .filter_map(Result::ok)
                .find(|(key, _)| key == CONTEXT_ENV_VAR)
                .map(|(_, value)| value)
                .filter(|value| !value.is_empty()),
            Err(e) => {
                warn!("Ignoring {}: {e}", dotenv.display());
                None
            }
        }
    }
}

/// Read a configuration file. Files ending in `.json` are parsed as JSON,
/// anything else as YAML.
pub fn read_config_file(path: &Path) -> Result<Config, ConfigError> {
    let contents =
        fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        return serde_json::from_str(&contents).map_err(|source| {
            ConfigError::ParseJson {
                path: path.to_path_buf(),
                source,
            }
        });
    }

    if contents.trim().is_empty() {
        return Ok(Config::default());
    }
    serde_yaml::from_str(&contents).map_err(|source| ConfigError::ParseYaml {
        path: path.to_path_buf(),
        source,
    })
}

/// Replace `path` with `contents`, creating parent directories as needed.
fn write_config_file(path: &Path, contents: &str) -> Result<(), ConfigError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent).map_err(|source| ConfigError::CreateDir {
        path: parent.clone(),
        source,
    })?;

    let write_error = |source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    };

    // NamedTempFile is created with mode 0600
    let mut file =
        tempfile::NamedTempFile::new_in(&parent).map_err(write_error)?;
    file.write_all(contents.as_bytes()).map_err(write_error)?;
    file.flush().map_err(write_error)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(file.path(), fs::Permissions::from_mode(0o600))
            .map_err(write_error)?;
    }
    let _ = file.persist(path).map_err(|e| write_error(e.error))?;
    Ok(())
}
