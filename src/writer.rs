//! Serializing a collection and writing it to the output file for its mode.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;

use crate::collection::Collection;
use crate::error::ZoneError;
use crate::ZoneMode;

/// Destination for serialized collections, addressed by file name.
pub trait Sink {
    /// Replaces whatever is stored under `file_name` with `bytes`.
    ///
    /// # Errors
    ///
    /// Returns [`ZoneError::Io`] if the bytes cannot be stored.
    fn write_file(&mut self, file_name: &str, bytes: &[u8]) -> Result<(), ZoneError>;
}

/// Writes files into a directory on disk.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }
}

impl Sink for DirectorySink {
    fn write_file(&mut self, file_name: &str, bytes: &[u8]) -> Result<(), ZoneError> {
        let path = self.path_for(file_name);
        if path.exists() {
            log::debug!("Removing existing {}", path.display());
            fs::remove_file(&path).map_err(|e| ZoneError::io(&path, e))?;
        }

        let mut file = File::create(&path).map_err(|e| ZoneError::io(&path, e))?;
        file.write_all(bytes).map_err(|e| ZoneError::io(&path, e))?;
        log::info!("Wrote {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }
}

/// Keeps written files in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub files: BTreeMap<String, Vec<u8>>,
}

impl Sink for MemorySink {
    fn write_file(&mut self, file_name: &str, bytes: &[u8]) -> Result<(), ZoneError> {
        self.files.insert(file_name.to_owned(), bytes.to_vec());
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Compact,
    Pretty,
}

/// Serializes `collection` and hands it to `sink` under the file name of
/// `mode`. Returns the file name used.
///
/// # Errors
///
/// Returns [`ZoneError::Json`] if serialization fails and whatever the sink
/// returns if the write fails.
pub fn write_collection<S: Sink + ?Sized>(
    collection: &Collection,
    mode: ZoneMode,
    sink: &mut S,
    format: OutputFormat,
) -> Result<&'static str, ZoneError> {
    let document = collection.to_geojson();
    let bytes = match format {
        OutputFormat::Compact => serde_json::to_vec(&document)?,
        OutputFormat::Pretty => serde_json::to_vec_pretty(&document)?,
    };

    let file_name = mode.output_file_name();
    sink.write_file(file_name, &bytes)?;
    Ok(file_name)
}
