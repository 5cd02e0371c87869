use std::io::{self, Write};

use ratatui::crossterm::style::Stylize;
use tracing::debug;

use crate::api::HealthResponse;
use crate::core::client::Gateway;

/// Print gateway health. Returns `false` when the check failed.
pub async fn check_status<G: Gateway, W: Write>(
    gateway: &G,
    gateway_url: &str,
    out: &mut W,
) -> io::Result<bool> {
    writeln!(out, "Gateway: {gateway_url}")?;

    match gateway.health_check().await {
        Ok(value) => {
            let health: HealthResponse = serde_json::from_value(value).unwrap_or_else(|err| {
                debug!("health response did not match the expected shape: {err}");
                HealthResponse::default()
            });
            let status = health.status.as_deref().unwrap_or("unknown");
            writeln!(out, "Status:  {}", status.green())?;
            if let Some(version) = health.version {
                writeln!(out, "Version: {version}")?;
            }
            Ok(true)
        }
        Err(err) => {
            debug!("health check failed: {err}");
            writeln!(out, "{}", err.user_message().red())?;
            Ok(false)
        }
    }
}
