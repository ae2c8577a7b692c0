// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Lenses CLI Authors

//! Show where the configuration came from and what it resolved to

use lenses::auth::Authentication;
use lenses::config::{Manager, CONTEXT_ENV_VAR};
use serde_json::{json, Value};

use crate::commands::masked_profile;
use crate::error::LensesctlError;

/// Execute the info command.
pub fn execute(manager: &Manager, valid: bool) -> Result<Value, LensesctlError> {
    let search_paths: Vec<String> = manager
        .search_paths()
        .candidates()
        .iter()
        .map(|path| path.display().to_string())
        .collect();

    let profile = match manager.current_profile() {
        Some(profile) => masked_profile(profile)?,
        None => Value::Null,
    };
    let authentication = manager
        .current_profile()
        .and_then(|profile| profile.authentication.as_ref())
        .map(Authentication::kind);

    Ok(json!({
        "config_file": manager.loaded_from().map(|path| path.display().to_string()),
        "search_paths": search_paths,
        "context_env": CONTEXT_ENV_VAR,
        "currentContext": manager.current_context(),
        "contexts": manager.config().names().collect::<Vec<_>>(),
        "authentication": authentication,
        "context_changed": manager.context_changed(),
        "auth_from_flags": manager.auth_from_flags(),
        "valid": valid,
        "profile": profile,
    }))
}
