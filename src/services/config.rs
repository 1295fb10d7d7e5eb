use crate::domain::constants::CONFIG_FILE;
use crate::domain::models::ProjectConfig;
use crate::error::{ForgeError, Result};
use std::path::Path;

/// Load `promptforge.toml` from the project root. A missing file means
/// defaults; a malformed one is an error rather than a silent fallback.
pub fn load_config(project_dir: &Path) -> Result<ProjectConfig> {
    let path = project_dir.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(ProjectConfig::default());
    }
    let raw = std::fs::read_to_string(&path).map_err(|e| ForgeError::io("read", &path, e))?;
    let config =
        toml::from_str(&raw).map_err(|source| ForgeError::Config { path: path.clone(), source })?;
    tracing::debug!(path = %path.display(), "loaded project config");
    Ok(config)
}
