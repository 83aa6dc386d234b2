use super::error::LoadError;
use super::traits::SettingsFile;
use crate::core::settings::Settings;

/// TOML settings files. Tables become nodes, arrays of tables become lists of nodes.
///
/// TOML has no null and only string keys, so trees holding either cannot be written.
pub struct TomlFile;

impl SettingsFile for TomlFile {
    fn parse(text: &str, origin: &str) -> Result<Settings, LoadError> {
        toml::from_str(text).map_err(|source| LoadError::Toml {
            path: origin.to_string(),
            source,
        })
    }

    fn render(settings: &Settings) -> Result<String, LoadError> {
        Ok(toml::to_string(settings)?)
    }
}
