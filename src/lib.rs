use std::fmt;
use std::path::PathBuf;

pub mod collection;
pub mod coordinates;
pub mod error;
pub mod features;
pub mod records;
pub mod writer;

pub use collection::{assemble, Collection, CollectionMetadata};
pub use coordinates::{parse_point, parse_ring, NumericPolicy};
pub use error::{CoordinateError, ZoneError};
pub use features::{build_feature, build_features, group_by_district, Feature, Geometry, GeometryKind};
pub use records::{filter_records, read_records, read_records_from_path, Record, RowErrorPolicy};
pub use writer::{write_collection, DirectorySink, MemorySink, OutputFormat, Sink};

/// Which side of the status flag gets converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZoneMode {
    /// Rows whose status is not "Ok".
    #[default]
    NonFlagged,
    /// Rows whose status is "Ok" (the FD zone).
    Flagged,
}

impl ZoneMode {
    /// Maps the `0`/`1` command line value; anything but `1` is non-flagged.
    pub fn from_flag(flag: u8) -> Self {
        Self::from(flag == 1)
    }

    pub fn is_flagged(self) -> bool {
        matches!(self, Self::Flagged)
    }

    pub fn output_file_name(self) -> &'static str {
        match self {
            Self::Flagged => "FD_zone.geojson",
            Self::NonFlagged => "non_FD_zone.geojson",
        }
    }
}

impl From<bool> for ZoneMode {
    fn from(flagged: bool) -> Self {
        if flagged {
            Self::Flagged
        } else {
            Self::NonFlagged
        }
    }
}

impl fmt::Display for ZoneMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flagged => f.write_str("FD zone"),
            Self::NonFlagged => f.write_str("non-FD zone"),
        }
    }
}

/// Everything one conversion run needs.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub input: PathBuf,
    pub mode: ZoneMode,
    pub numeric_policy: NumericPolicy,
    pub row_policy: RowErrorPolicy,
    pub group_districts: bool,
    pub format: OutputFormat,
    pub metadata: CollectionMetadata,
}

impl ConvertOptions {
    pub fn new(input: impl Into<PathBuf>, mode: ZoneMode) -> Self {
        Self {
            input: input.into(),
            mode,
            numeric_policy: NumericPolicy::default(),
            row_policy: RowErrorPolicy::default(),
            group_districts: false,
            format: OutputFormat::default(),
            metadata: CollectionMetadata::default(),
        }
    }
}

/// Reads, filters and converts the input CSV into a collection.
///
/// # Errors
///
/// Returns the first [`ZoneError`] raised while reading rows or parsing
/// their geometry.
pub fn build_collection(options: &ConvertOptions) -> Result<Collection, ZoneError> {
    let records = read_records_from_path(&options.input, options.row_policy)?;
    let selected = filter_records(records, options.mode);
    let mut features = build_features(&selected, options.numeric_policy)?;
    if options.group_districts {
        features = group_by_district(features);
    }
    Ok(assemble(features, options.metadata.clone()))
}

/// Runs the whole conversion and writes the result through `sink`. Returns
/// the name of the file written.
///
/// # Errors
///
/// Returns the first [`ZoneError`] from any stage. Nothing is written if an
/// earlier stage fails.
pub fn convert<S: Sink + ?Sized>(options: &ConvertOptions, sink: &mut S) -> Result<&'static str, ZoneError> {
    log::info!("=== Converting {} ({}) ===", options.input.display(), options.mode);
    let collection = build_collection(options)?;
    let file_name = write_collection(&collection, options.mode, sink, options.format)?;
    log::info!("=== Wrote {} features to {} ===", collection.features.len(), file_name);
    Ok(file_name)
}
