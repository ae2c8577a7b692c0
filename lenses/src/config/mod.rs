// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Lenses CLI Authors

//! Configuration management for lensesctl
//!
//! The effective connection profile is resolved from several sources, in
//! order of precedence:
//!
//! 1. Command-line flags (highest priority)
//! 2. The configuration file, either given with `--config` or the first of:
//!    - `./lensesctl.yml`
//!    - `<directory of the executable>/lensesctl.yml`
//!    - `~/.lenses/lensesctl.yml`
//! 3. `LENSESCTL_CONTEXT`, from the environment or `./.env`, which selects
//!    the context for one invocation without being saved
//!
//! # Module Structure
//!
//! - [`error`]: errors raised while loading or saving
//! - [`flags`]: the connection flags shared by every command
//! - [`paths`]: configuration search paths
//! - [`Manager`]: the resolution itself, plus saving
//!
//! # Passwords
//!
//! Passwords are stored encrypted with a key derived from the profile host
//! (see [`crate::crypto`]). They are decrypted while loading and encrypted
//! again on every save; the file on disk never holds plaintext.

pub mod error;
pub mod flags;
mod manager;
pub mod paths;

pub use error::ConfigError;
pub use flags::ConnectionArgs;
pub use manager::{read_config_file, Manager, CONTEXT_ENV_VAR};
pub use paths::SearchPaths;
