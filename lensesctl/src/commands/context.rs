// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Lenses CLI Authors

//! Context management commands

use lenses::auth::Authentication;
use lenses::config::Manager;
use log::debug;
use serde::Serialize;
use serde_json::{json, Value};

use crate::commands::masked_profile;
use crate::error::{ErrorContext, LensesctlError};
use crate::output::OutputHandler;
use crate::ContextAction;

#[derive(Debug, Serialize)]
struct ContextSummary<'a> {
    name: &'a str,
    current: bool,
    host: &'a str,
    authentication: &'static str,
    valid: bool,
}

/// Execute a context command.
pub fn execute(
    action: &ContextAction,
    manager: &mut Manager,
    output: &OutputHandler,
) -> Result<Value, LensesctlError> {
    match action {
        ContextAction::List => list(manager),
        ContextAction::Current => current(manager),
        ContextAction::Use { name } => use_context(name, manager, output),
        ContextAction::Remove { name } => remove(name, manager, output),
    }
}

fn list(manager: &Manager) -> Result<Value, LensesctlError> {
    let config = manager.config();
    let contexts: Vec<ContextSummary<'_>> = config
        .contexts
        .iter()
        .map(|(name, profile)| ContextSummary {
            name,
            current: *name == config.current_context,
            host: &profile.host,
            authentication: profile
                .authentication
                .as_ref()
                .map_or("none", Authentication::kind),
            valid: profile.is_valid(),
        })
        .collect();

    Ok(json!({
        "currentContext": config.current_context,
        "contexts": contexts,
    }))
}

fn current(manager: &Manager) -> Result<Value, LensesctlError> {
    let name = manager.current_context();
    let profile = manager.current_profile().ok_or_else(|| {
        LensesctlError::validation(format!("context [{name}] has no profile"))
    })?;

    Ok(json!({
        "name": name,
        "valid": profile.is_valid(),
        "profile": masked_profile(profile)?,
    }))
}

fn use_context(
    name: &str,
    manager: &mut Manager,
    output: &OutputHandler,
) -> Result<Value, LensesctlError> {
    manager.use_context(name)?;
    let path = manager
        .save()
        .with_context(|| format!("Failed to switch to context {name}"))?;
    output.info(format!("Switched to context {name}"));

    Ok(json!({
        "status": "success",
        "currentContext": name,
        "config_path": path.display().to_string(),
    }))
}

fn remove(
    name: &str,
    manager: &mut Manager,
    output: &OutputHandler,
) -> Result<Value, LensesctlError> {
    manager.remove_context(name)?;
    debug!("Current context is now {}", manager.current_context());
    let path = manager
        .save()
        .with_context(|| format!("Failed to remove context {name}"))?;
    output.info(format!("Removed context {name}"));

    Ok(json!({
        "status": "success",
        "removed": name,
        "currentContext": manager.current_context(),
        "config_path": path.display().to_string(),
    }))
}
