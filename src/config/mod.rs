mod init;
mod schema;

pub use init::write_default_config;
pub use schema::Config;

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::scoring::{validate_catalog, Profile};

/// Get the config directory path (~/.config/majorpick/)
pub fn get_config_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Could not determine home directory");
    home.join(".config").join("majorpick")
}

/// Get the default config file path (~/.config/majorpick/config.yaml)
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.yaml")
}

/// Ensure the config directory exists
pub fn ensure_config_dir() -> Result<()> {
    let config_dir = get_config_dir();
    if !config_dir.exists() {
        fs::create_dir_all(&config_dir).with_context(|| {
            format!(
                "Failed to create config directory at {}",
                config_dir.display()
            )
        })?;
    }
    Ok(())
}

/// Load and validate configuration from a YAML file.
///
/// Weight and anchor defects are a setup problem, so they fail here at load
/// time rather than on every scoring call.
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses default path (~/.config/majorpick/config.yaml)
///
/// # Errors
///
/// Returns an error if:
/// - The config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
/// - Criterion weights do not sum to 1.0, or the catalog does not fit the
///   criteria/anchor tables
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = path.unwrap_or_else(get_config_path);

    if !config_path.exists() {
        anyhow::bail!(
            "Config file not found at {}. Run `majorpick init` to create one.",
            config_path.display()
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content).with_context(|| {
        format!(
            "Failed to parse config: invalid YAML in {}",
            config_path.display()
        )
    })?;

    config
        .scoring
        .validate()
        .with_context(|| format!("Invalid scoring setup in {}", config_path.display()))?;

    if let Err(errors) = validate_catalog(&config.catalog, &config.scoring) {
        anyhow::bail!(
            "Invalid catalog in {}:\n  - {}",
            config_path.display(),
            errors.join("\n  - ")
        );
    }

    Ok(config)
}

/// Load a student profile from a YAML file.
pub fn load_profile(path: &Path) -> Result<Profile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read profile file at {}", path.display()))?;

    let profile: Profile = serde_saphyr::from_str(&content).with_context(|| {
        format!("Failed to parse profile: invalid YAML in {}", path.display())
    })?;

    Ok(profile)
}
