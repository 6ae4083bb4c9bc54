mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Largest accepted `report.hex_preview`.
pub const MAX_HEX_PREVIEW: usize = 64;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = ["./flvscope.toml", "~/.config/flvscope/config.toml"];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.report.hex_preview > MAX_HEX_PREVIEW {
        anyhow::bail!(
            "report.hex_preview is {} but cannot exceed {}",
            config.report.hex_preview,
            MAX_HEX_PREVIEW
        );
    }

    if config.report.max_tags == Some(0) {
        anyhow::bail!("report.max_tags must be at least 1 when set");
    }

    Ok(())
}
