//! Reading dex files from disk.
//!
//! A dex directory holds one file per record kind (`species`, `evolutions`),
//! written in RON, JSON, or TOML. The extension picks the parser; having the
//! same kind in two formats is an error rather than a silent preference.

use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

// ===========================================================================
// Errors
// ===========================================================================

/// Why a dex directory or engine config file could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// No `{file}.ron`, `{file}.json`, or `{file}.toml` in the dex directory.
    #[error("dex directory {dir} has no '{file}' file")]
    MissingRequired { file: String, dir: PathBuf },

    /// Not a `.ron`, `.json`, or `.toml` file.
    #[error("cannot read {file}: expected a .ron, .json or .toml file")]
    UnsupportedFormat { file: PathBuf },

    /// One record kind present in two formats.
    #[error("both {a} and {b} exist; keep only one")]
    ConflictingFormats { a: PathBuf, b: PathBuf },

    /// The file's contents do not match the expected records.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// A record names a species the dex does not define.
    #[error("unresolved {expected_kind} reference '{name}' in {file}")]
    UnresolvedRef {
        file: PathBuf,
        name: String,
        expected_kind: &'static str,
    },

    /// Two species share a reference key.
    #[error("species name '{name}' defined twice in {file}")]
    DuplicateName { file: PathBuf, name: String },

    /// Two species share a dex number.
    #[error("duplicate dex number {number} in {file}")]
    DuplicateNumber { file: PathBuf, number: u32 },

    /// A configuration file parsed but holds unusable values.
    #[error("invalid configuration in {file}: {detail}")]
    InvalidConfig { file: PathBuf, detail: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Formats
// ===========================================================================

/// On-disk encodings a dex file may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

/// Extensions probed when looking for a record kind, in probe order.
const EXTENSIONS: [(&str, Format); 3] = [
    ("ron", Format::Ron),
    ("toml", Format::Toml),
    ("json", Format::Json),
];

/// Map a path's extension to its [`Format`].
pub fn detect_format(path: &Path) -> Result<Format, DataLoadError> {
    let ext = path.extension().and_then(|e| e.to_str());
    EXTENSIONS
        .iter()
        .find(|(known, _)| Some(*known) == ext)
        .map(|&(_, format)| format)
        .ok_or_else(|| DataLoadError::UnsupportedFormat {
            file: path.to_path_buf(),
        })
}

// ===========================================================================
// Discovery
// ===========================================================================

/// Locate the file holding record kind `base_name` in `dir`.
///
/// `Ok(None)` when the kind is absent; `ConflictingFormats` when it exists
/// under more than one extension.
pub fn find_data_file(dir: &Path, base_name: &str) -> Result<Option<PathBuf>, DataLoadError> {
    let mut present = EXTENSIONS
        .iter()
        .map(|(ext, _)| dir.join(format!("{base_name}.{ext}")))
        .filter(|path| path.exists());

    let first = present.next();
    if let (Some(a), Some(b)) = (&first, present.next()) {
        return Err(DataLoadError::ConflictingFormats { a: a.clone(), b });
    }
    Ok(first)
}

/// [`find_data_file`] for record kinds a dex cannot do without.
pub fn require_data_file(dir: &Path, base_name: &str) -> Result<PathBuf, DataLoadError> {
    match find_data_file(dir, base_name)? {
        Some(path) => Ok(path),
        None => Err(DataLoadError::MissingRequired {
            file: base_name.to_string(),
            dir: dir.to_path_buf(),
        }),
    }
}

// ===========================================================================
// Parsing
// ===========================================================================

fn parse_error(path: &Path, e: impl ToString) -> DataLoadError {
    DataLoadError::Parse {
        file: path.to_path_buf(),
        detail: e.to_string(),
    }
}

fn read(path: &Path) -> Result<(Format, String), DataLoadError> {
    let format = detect_format(path)?;
    Ok((format, std::fs::read_to_string(path)?))
}

/// Parse a whole file as `T`, using the parser its extension names.
pub fn deserialize_file<T: DeserializeOwned>(path: &Path) -> Result<T, DataLoadError> {
    let (format, text) = read(path)?;
    match format {
        Format::Ron => ron::from_str(&text).map_err(|e| parse_error(path, e)),
        Format::Json => serde_json::from_str(&text).map_err(|e| parse_error(path, e)),
        Format::Toml => toml::from_str(&text).map_err(|e| parse_error(path, e)),
    }
}

/// Parse a file of records. RON and JSON files are a bare list; TOML has no
/// top-level arrays, so its records sit in an array of tables named `toml_key`
/// (`[[species]]`, `[[evolutions]]`).
pub fn deserialize_list<T: DeserializeOwned>(
    path: &Path,
    toml_key: &str,
) -> Result<Vec<T>, DataLoadError> {
    let (format, text) = read(path)?;
    match format {
        Format::Ron => ron::from_str(&text).map_err(|e| parse_error(path, e)),
        Format::Json => serde_json::from_str(&text).map_err(|e| parse_error(path, e)),
        Format::Toml => {
            let mut document: toml::Table =
                toml::from_str(&text).map_err(|e| parse_error(path, e))?;
            let records = document
                .remove(toml_key)
                .ok_or_else(|| parse_error(path, format!("no [[{toml_key}]] tables")))?;
            records
                .try_into()
                .map_err(|e: toml::de::Error| parse_error(path, e))
        }
    }
}

// ===========================================================================
// Name lookups
// ===========================================================================

/// Resolve a species reference key against the names loaded so far.
pub fn resolve_name<'a, V>(
    map: &'a HashMap<String, V>,
    name: &str,
    file: &Path,
    expected_kind: &'static str,
) -> Result<&'a V, DataLoadError> {
    map.get(name).ok_or_else(|| DataLoadError::UnresolvedRef {
        file: file.to_path_buf(),
        name: name.to_string(),
        expected_kind,
    })
}

/// Reject a species reference key that is already taken.
pub fn check_duplicate<V>(
    map: &HashMap<String, V>,
    name: &str,
    file: &Path,
) -> Result<(), DataLoadError> {
    if !map.contains_key(name) {
        return Ok(());
    }
    Err(DataLoadError::DuplicateName {
        file: file.to_path_buf(),
        name: name.to_string(),
    })
}
