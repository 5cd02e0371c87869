pub mod catalog;
pub mod client;
pub mod config;
pub mod journey;
pub mod keyring;
pub mod session;
