//! Configuration loading and saving.
//!
//! Generic JSON/TOML readers and writers for any serde type, plus
//! [`SeriesConfig`] for describing a series in a config file:
//!
//! ```toml
//! capacity = 120
//! interval = "500ms"
//! ```

use crate::duration::Interval;
use crate::error::{Result, SeriesError};
use crate::series::BoundedSeries;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::Path;

/// Settings for constructing a [`BoundedSeries`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesConfig {
    /// Maximum retained samples (0 = unbounded).
    /// Default: 60
    pub capacity: usize,

    /// Nominal spacing between samples.
    /// Default: 1s
    pub interval: Interval,
}

impl Default for SeriesConfig {
    fn default() -> Self {
        Self {
            capacity: 60,
            interval: Interval::from_secs(1),
        }
    }
}

impl SeriesConfig {
    pub fn build(&self) -> BoundedSeries {
        BoundedSeries::new(self.capacity, self.interval)
    }
}

pub fn read_json<T: DeserializeOwned, R: Read>(reader: R) -> Result<T> {
    Ok(serde_json::from_reader(reader)?)
}

pub fn read_toml<T: DeserializeOwned, R: Read>(mut reader: R) -> Result<T> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    Ok(toml::from_str(&text)?)
}

/// Read `T` as JSON, falling back to TOML.
///
/// # Errors
///
/// [`SeriesError::Config`] carries both parser errors when neither format
/// matches.
pub fn read_generic<T: DeserializeOwned, R: Read>(mut reader: R) -> Result<T> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;

    let json_err = match serde_json::from_str(&text) {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };
    toml::from_str(&text).map_err(|toml_err| SeriesError::Config {
        json: json_err.to_string(),
        toml: toml_err.to_string(),
    })
}

/// Write `value` as tab-indented JSON followed by a newline.
pub fn write_json<T: Serialize, W: Write>(value: &T, mut writer: W) -> Result<()> {
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut ser = serde_json::Serializer::with_formatter(&mut writer, formatter);
    value.serialize(&mut ser)?;
    writer.write_all(b"\n")?;
    Ok(())
}

pub fn write_toml<T: Serialize, W: Write>(value: &T, mut writer: W) -> Result<()> {
    let text = toml::to_string(value)?;
    writer.write_all(text.as_bytes())?;
    Ok(())
}

pub fn read_json_file<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    read_file(path.as_ref(), |file| read_json(file))
}

pub fn read_toml_file<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    read_file(path.as_ref(), |file| read_toml(file))
}

pub fn read_generic_file<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    read_file(path.as_ref(), |file| read_generic(file))
}

pub fn write_json_file<T: Serialize>(value: &T, path: impl AsRef<Path>) -> Result<()> {
    write_file(value, path.as_ref(), |v, file| write_json(v, file))
}

pub fn write_toml_file<T: Serialize>(value: &T, path: impl AsRef<Path>) -> Result<()> {
    write_file(value, path.as_ref(), |v, file| write_toml(v, file))
}

/// Open `path` for reading and hand it to `read`.
fn read_file<T>(path: &Path, read: impl FnOnce(File) -> Result<T>) -> Result<T> {
    let file = File::open(path).map_err(|e| SeriesError::from(e).in_file(path))?;
    read(file).map_err(|e| e.in_file(path))
}

/// Create or truncate `path` (owner-only on Unix) and hand it to `write`.
fn write_file<T>(
    value: &T,
    path: &Path,
    write: impl FnOnce(&T, &mut File) -> Result<()>,
) -> Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options
        .open(path)
        .map_err(|e| SeriesError::from(e).in_file(path))?;
    write(value, &mut file).map_err(|e| e.in_file(path))?;
    file.flush().map_err(|e| SeriesError::from(e).in_file(path))
}
