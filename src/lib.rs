// Copyright 2026 Namewatch Contributors
// SPDX-License-Identifier: Apache-2.0

//! Namewatch library — track a profile's display-name changes and mirror
//! them on a self-refreshing display.
//!
//! This library crate exposes the core modules for integration testing.

pub mod cli;
pub mod config;
pub mod error;
pub mod events;
pub mod model;
pub mod poller;
pub mod render;
pub mod server;
pub mod tracker;
