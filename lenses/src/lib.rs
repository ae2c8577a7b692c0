// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Lenses CLI Authors

pub mod auth;
pub mod config;
pub mod context;
pub mod crypto;
pub mod profile;
