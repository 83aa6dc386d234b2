use super::error::LoadError;
use crate::core::settings::Settings;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::debug;

/// A file format that settings trees can be read from and written to.
pub trait SettingsFile {
    /// Parses a settings tree from `text`. `origin` names the source in error messages.
    fn parse(text: &str, origin: &str) -> Result<Settings, LoadError>;

    /// Serializes a settings tree into a string.
    fn render(settings: &Settings) -> Result<String, LoadError>;

    /// Reads a settings tree from a reader.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails or the content does not parse.
    fn read_from(reader: &mut impl Read, origin: &str) -> Result<Settings, LoadError> {
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .map_err(|source| LoadError::Io {
                path: origin.to_string(),
                source,
            })?;
        Self::parse(&text, origin)
    }

    /// Writes a settings tree to a writer.
    fn write_to(settings: &Settings, writer: &mut impl Write) -> Result<(), LoadError> {
        let text = Self::render(settings)?;
        writer
            .write_all(text.as_bytes())
            .map_err(|source| LoadError::Io {
                path: "<writer>".to_string(),
                source,
            })
    }

    /// Reads a settings tree from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Settings, LoadError> {
        let path = path.as_ref();
        let origin = path.display().to_string();
        debug!("Loading settings from {:?}", path);
        let file = File::open(path).map_err(|source| LoadError::Io {
            path: origin.clone(),
            source,
        })?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader, &origin)
    }

    /// Writes a settings tree to a file path, replacing any existing file.
    fn write_to_path<P: AsRef<Path>>(settings: &Settings, path: P) -> Result<(), LoadError> {
        let path = path.as_ref();
        debug!("Writing settings to {:?}", path);
        let file = File::create(path).map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        Self::write_to(settings, &mut writer)?;
        writer.flush().map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        })
    }
}
