// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Lenses CLI Authors

//! HTTP client for the Lenses API

pub mod base;
pub mod error;
