//! Reading and writing settings trees.
//!
//! Each supported format implements [`SettingsFile`]. [`Format`] picks the
//! implementation from a file extension, and [`load`]/[`save`] are the path-based
//! shortcuts built on top of it. [`load_as`], [`from_str`] and [`to_string`] take the
//! format explicitly.

pub mod error;
pub mod json_file;
pub mod toml_file;
pub mod traits;

pub use error::LoadError;
pub use json_file::JsonFile;
pub use toml_file::TomlFile;
pub use traits::SettingsFile;

use crate::core::settings::Settings;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Toml,
    Json,
}

impl Format {
    /// Detects the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("toml") => Ok(Format::Toml),
            Some("json") => Ok(Format::Json),
            _ => Err(LoadError::UnsupportedFormat(path.display().to_string())),
        }
    }

    pub fn parse(self, text: &str, origin: &str) -> Result<Settings, LoadError> {
        match self {
            Format::Toml => TomlFile::parse(text, origin),
            Format::Json => JsonFile::parse(text, origin),
        }
    }

    pub fn render(self, settings: &Settings) -> Result<String, LoadError> {
        match self {
            Format::Toml => TomlFile::render(settings),
            Format::Json => JsonFile::render(settings),
        }
    }
}

/// Loads a settings file, choosing the format from its extension.
pub fn load(path: impl AsRef<Path>) -> Result<Settings, LoadError> {
    let path = path.as_ref();
    match Format::from_path(path)? {
        Format::Toml => TomlFile::read_from_path(path),
        Format::Json => JsonFile::read_from_path(path),
    }
}

/// Loads a settings file in the given format, whatever its extension.
pub fn load_as(path: impl AsRef<Path>, format: Format) -> Result<Settings, LoadError> {
    let path = path.as_ref();
    match format {
        Format::Toml => TomlFile::read_from_path(path),
        Format::Json => JsonFile::read_from_path(path),
    }
}

/// Parses settings text in the given format.
pub fn from_str(text: &str, format: Format) -> Result<Settings, LoadError> {
    format.parse(text, "<string>")
}

/// Serializes a settings tree in the given format.
pub fn to_string(settings: &Settings, format: Format) -> Result<String, LoadError> {
    format.render(settings)
}

/// Saves a settings tree, choosing the format from the target extension.
pub fn save(settings: &Settings, path: impl AsRef<Path>) -> Result<(), LoadError> {
    let path = path.as_ref();
    match Format::from_path(path)? {
        Format::Toml => TomlFile::write_to_path(settings, path),
        Format::Json => JsonFile::write_to_path(settings, path),
    }
}
