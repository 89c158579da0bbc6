// SPDX-License-Identifier: MIT

//! Courtdesk: tennis tournament administration backend.
//!
//! This crate provides the API for the role-aware user directory behind the
//! tournament admin dashboard: multi-role users (Coach/Referee/Player/
//! Super Admin), role assignment and removal with field attachment and
//! cleanup, and a pluggable persisted store.

pub mod config;
pub mod directory;
pub mod error;
pub mod models;
pub mod roles;
pub mod routes;
pub mod store;

use config::Config;
use directory::UserDirectory;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub directory: UserDirectory,
}
