// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Lenses CLI Authors

//! Command implementations for lensesctl

pub mod api;
pub mod configure;
pub mod context;
pub mod info;

use lenses::auth::Authentication;
use lenses::profile::ClientProfile;
use serde_json::Value;

use crate::error::{ErrorContext, LensesctlError};

/// Shown in place of passwords and tokens
pub const MASK: &str = "********";

/// A profile as shown to users, with its password and token masked.
pub fn masked_profile(profile: &ClientProfile) -> Result<Value, LensesctlError> {
    let mut shown = profile.clone();
    if !shown.token.is_empty() {
        shown.token = MASK.to_string();
    }
    if let Some(password) = shown
        .authentication
        .as_mut()
        .and_then(Authentication::password_mut)
    {
        if !password.is_empty() {
            *password = MASK.to_string();
        }
    }

    serde_json::to_value(&shown)
        .with_context(|| format!("Failed to render profile for {}", profile.host))
}

/// A manager reading and writing only below `tmpdir`, with the
/// environment hidden.
#[cfg(test)]
pub fn test_manager(
    tmpdir: &tempfile::TempDir,
    flags: &[&str],
) -> lenses::config::Manager {
    use clap::Parser;
    use lenses::config::{Manager, SearchPaths};

    let mut argv = vec!["lensesctl"];
    argv.extend_from_slice(flags);
    let cli = crate::Cli::try_parse_from(argv).unwrap(); //#[allow_ci]

    let cwd = tmpdir.path().join("cwd");
    std::fs::create_dir_all(&cwd).unwrap(); //#[allow_ci]
    Manager::new(cli.connection)
        .with_search_paths(SearchPaths {
            cwd: Some(cwd),
            exe_dir: None,
            home: Some(tmpdir.path().join("home")),
        })
        .with_env(|_| None)
}
