pub mod schema;
pub mod watcher;

pub use schema::{AssetConfig, ElementConfig, PortalConfig, ThemeConfig};
pub use watcher::ConfigWatcher;

use portal_core::{PortalError, Result};
use std::path::{Path, PathBuf};

/// Load configuration from a TOML file.  Returns `PortalConfig::default()` if
/// the file doesn't exist so a page always has a theme to render with.
pub fn load(path: impl AsRef<Path>) -> Result<PortalConfig> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::warn!(
            "Config file not found at '{}'; using defaults.",
            path.display()
        );
        return Ok(PortalConfig::default());
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| PortalError::Config(format!("cannot read '{}': {e}", path.display())))?;

    parse(&raw)
}

/// Parse configuration from TOML text.
pub fn parse(raw: &str) -> Result<PortalConfig> {
    toml::from_str(raw).map_err(|e| PortalError::Config(format!("TOML parse error: {e}")))
}

/// Return the default config path, honouring `$XDG_CONFIG_HOME`.
pub fn default_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("portal").join("portal.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let config = load("/definitely/not/here/portal.toml").unwrap();
        assert_eq!(config, PortalConfig::default());
    }

    #[test]
    fn bad_toml_is_a_config_error() {
        assert!(matches!(parse("theme = ["), Err(PortalError::Config(_))));
    }
}
