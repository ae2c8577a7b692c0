// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Lenses CLI Authors

//! Authenticated requests against the Lenses API

use lenses::config::Manager;
use log::debug;
use serde_json::Value;

use crate::client::base::BaseClient;
use crate::error::LensesctlError;

/// Execute the api command: `GET <host><path>` with the current context.
pub async fn execute(
    path: &str,
    manager: &Manager,
    valid: bool,
) -> Result<Value, LensesctlError> {
    let name = manager.current_context();
    let profile = match manager.current_profile() {
        Some(profile) if valid => profile,
        _ => {
            return Err(LensesctlError::validation(format!(
                "context [{name}] is not fully configured, set a host and credentials with: lensesctl configure --context={name}"
            )));
        }
    };

    let client = BaseClient::new(profile)?;
    debug!("Requesting {} with context {name}", client.url(path));
    Ok(client.get_json(path).await?)
}
