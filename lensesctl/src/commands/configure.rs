// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Lenses CLI Authors

//! Persist the current context
//!
//! The connection flags given on the command line have already been laid
//! over the current context while loading; this command writes the result.

use lenses::config::Manager;
use log::debug;
use serde_json::{json, Value};

use crate::commands::masked_profile;
use crate::error::{ErrorContext, LensesctlError};
use crate::output::OutputHandler;

/// Execute the configure command.
///
/// With `reset`, the stored profile of the current context is discarded
/// first and rebuilt from the flags alone.
pub fn execute(
    reset: bool,
    manager: &mut Manager,
    output: &OutputHandler,
) -> Result<Value, LensesctlError> {
    if reset {
        debug!("Resetting context {}", manager.current_context());
        let _ = manager.reset_current();
    }

    let name = manager.current_context().to_string();
    let path = manager
        .save()
        .with_context(|| format!("Failed to save context {name}"))?;

    let profile = manager.current_profile().ok_or_else(|| {
        LensesctlError::validation(format!("context [{name}] has no profile"))
    })?;
    if !profile.is_valid() {
        output.info(format!(
            "Context {name} still needs a host and credentials to be usable"
        ));
    }
    output.info(format!("Context {name} saved to {}", path.display()));

    Ok(json!({
        "status": "success",
        "context": name,
        "config_path": path.display().to_string(),
        "valid": profile.is_valid(),
        "profile": masked_profile(profile)?,
    }))
}
