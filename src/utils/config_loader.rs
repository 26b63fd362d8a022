use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::config::proc_loader::file_to_config;
use crate::config::types::ServiceConfig;

/// Load `.env` (when present) and then the YAML service config.
pub async fn run(config_path: &str) -> Result<ServiceConfig> {
    if let Ok(path) = dotenvy::dotenv() {
        debug!("loaded environment from {}", path.display());
    }
    let path = Path::new(config_path);
    file_to_config(path)
        .await
        .with_context(|| format!("Invalid config {}", config_path))
}
