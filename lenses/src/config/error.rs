// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Lenses CLI Authors

//! Errors raised while resolving or persisting the configuration.

use crate::context::ContextError;
use crate::crypto::CryptoError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("failed to read configuration file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The configuration file is not valid YAML for a configuration
    #[error("failed to parse configuration file {}: {source}", path.display())]
    ParseYaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// The configuration file is not valid JSON for a configuration
    #[error("failed to parse configuration file {}: {source}", path.display())]
    ParseJson {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The selected context is not in the configuration
    #[error("unknown context [{name}] given, please use: lensesctl configure --context={name} --reset")]
    UnknownContext { name: String },

    /// Context store operation failed
    #[error(transparent)]
    Context(#[from] ContextError),

    /// A password could not be sealed before saving
    #[error("failed to encrypt the password of context {context}")]
    Encrypt {
        context: String,
        source: CryptoError,
    },

    /// The configuration could not be serialized
    #[error("failed to serialize configuration")]
    Serialize(#[source] serde_yaml::Error),

    /// The directory holding the configuration file could not be created
    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The configuration file could not be written
    #[error("failed to write configuration file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// No location to save to
    #[error("cannot determine where to save the configuration: no configuration file was loaded and HOME is not set")]
    NoSavePath,
}
