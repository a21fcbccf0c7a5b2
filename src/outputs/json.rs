//! JSON output of the dashboard for external consumers.
//!
//! The file holds the full [`Dashboard`] plus the time it was generated:
//!
//! ```text
//! {
//!   "generated_at": "2025-11-02T08:00:00+02:00",
//!   "filter": { "source": null, "category": "sports", "sentiment": null },
//!   "total_articles": 42,
//!   ...
//! }
//! ```

use crate::dashboard::Dashboard;
use serde::Serialize;
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{error, info, instrument};

#[derive(Debug, Serialize)]
struct DashboardSnapshot<'a> {
    generated_at: &'a str,
    #[serde(flatten)]
    dashboard: &'a Dashboard,
}

/// Serialize a dashboard snapshot to a pretty-printed JSON string.
///
/// # Errors
///
/// Returns an error if `serde_json` fails to serialize the snapshot.
pub fn dashboard_to_json(dashboard: &Dashboard, generated_at: &str) -> Result<String, Box<dyn Error>> {
    let snapshot = DashboardSnapshot {
        generated_at,
        dashboard,
    };
    Ok(serde_json::to_string_pretty(&snapshot)?)
}

/// Write a dashboard snapshot to `path`, creating parent directories.
///
/// # Arguments
///
/// * `dashboard` - The dashboard to serialize
/// * `generated_at` - Timestamp stored as the top-level `generated_at` field
/// * `path` - Output file, usually `{reports_dir}/dashboard.json`
///
/// # Returns
///
/// `Ok(())` on success, or an error if serialization, directory creation or
/// file writing fails.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_dashboard(
    dashboard: &Dashboard,
    generated_at: &str,
    path: &Path,
) -> Result<(), Box<dyn Error>> {
    let json = dashboard_to_json(dashboard, generated_at)?;

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        if let Err(e) = fs::create_dir_all(dir).await {
            error!(dir = %dir.display(), error = %e, "Failed to create JSON dir");
            return Err(e.into());
        }
    }

    fs::write(path, json).await?;
    info!(articles = dashboard.filtered_articles, "Wrote JSON dashboard");
    Ok(())
}
