//! Core use-case services.
//!
//! # Responsibility
//! - Expose one method per REST use case, delegating to the repositories.
//! - Keep HTTP/UI layers decoupled from storage details.

pub mod command_handler;
pub mod commands;
