use crate::cli::LayerArgs;
use crate::error::{CliError, Result};
use crate::utils::parser;
use settree::{Settings, io};
use std::path::PathBuf;
use tracing::{debug, info};

/// Loads `files` in order and layers them into one tree.
///
/// By default each later file overrides earlier ones (`update`). With `soft` set,
/// later files only fill in what is still missing (`soft_update`).
pub fn load_layers(files: &[PathBuf], soft: bool) -> Result<Settings> {
    let (first, rest) = files
        .split_first()
        .ok_or_else(|| CliError::Config("At least one settings file is required.".to_string()))?;

    let mut settings = io::load(first)?;
    info!("Loaded base settings from {:?}", first);

    for path in rest {
        let layer = io::load(path)?;
        if soft {
            debug!("Soft-updating with {:?}", path);
            settings.soft_update(&layer);
        } else {
            debug!("Updating with {:?}", path);
            settings.update(&layer);
        }
    }
    Ok(settings)
}

/// Applies `KEY=VALUE` overrides, creating intermediate nodes as needed.
pub fn apply_set_values(settings: &mut Settings, set_values: &[String]) -> Result<()> {
    for assignment in set_values {
        let (key, raw) = parser::parse_assignment(assignment)?;
        let value = parser::parse_value(raw);
        debug!("Setting '{}' to {:?}", key, value);
        settings.set_path(key, value)?;
    }
    Ok(())
}

pub fn build_settings(files: &[PathBuf], layering: &LayerArgs) -> Result<Settings> {
    let mut settings = load_layers(files, layering.soft)?;
    apply_set_values(&mut settings, &layering.set_values)?;
    Ok(settings)
}
