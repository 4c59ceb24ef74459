//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod process;

use invox_core::models::config::InvoxConfig;

/// Load the configuration from an explicit path, falling back to the default
/// location and then to built-in defaults when no file exists.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<InvoxConfig> {
    if let Some(path) = config_path {
        return Ok(InvoxConfig::from_file(std::path::Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        Ok(InvoxConfig::from_file(&default_path)?)
    } else {
        Ok(InvoxConfig::default())
    }
}
