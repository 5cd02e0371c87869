//! TerryAnn is an interactive terminal client for the TerryAnn journey
//! intelligence gateway.
//!
//! - [`core`] owns the request client, configuration, session identity, and
//!   the journey catalogs and parameter assembly.
//! - [`ui`] runs the chat session loop, the journey selection wizard, the
//!   status presenter, and the splash banner.
//! - [`api`] defines the gateway and backend wire payloads.
//!
//! The binary routes through [`crate::cli::main`], which resolves
//! configuration and dispatches into [`ui::chat_loop`] or the `status` check.

pub mod api;
pub mod auth;
pub mod cli;
pub mod core;
pub mod logging;
pub mod ui;
pub mod utils;
