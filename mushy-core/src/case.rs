//! On-disk solver case access.
//!
//! A case directory follows the usual layout: one subdirectory per output
//! time holding the field files, `constant/` for material configuration and
//! gravity, and `system/` for solution controls. All files are JSON.
//!
//! Primary fields are must-read: a missing file is fatal and reported with
//! the field name before any property work begins.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::dimensions::Dimensions;
use crate::error::CaseError;
use crate::field::{VolScalarField, VolVectorField};
use crate::scalar::{DimensionedScalar, DimensionedVector};

/// Reads a JSON file, failing with [`CaseError::MissingConfig`] if absent.
///
/// # Errors
///
/// Returns [`CaseError`] when the file is missing, unreadable, or malformed.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CaseError> {
    match read_json_optional(path)? {
        Some(value) => Ok(value),
        None => Err(CaseError::MissingConfig {
            path: path.to_path_buf(),
        }),
    }
}

/// Reads a JSON file, returning `None` if it does not exist.
///
/// # Errors
///
/// Returns [`CaseError`] when the file exists but is unreadable or malformed.
pub fn read_json_optional<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, CaseError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(CaseError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    serde_json::from_reader(BufReader::new(file))
        .map(Some)
        .map_err(|source| CaseError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), CaseError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| CaseError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let file = File::create(path).map_err(|source| CaseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::to_writer_pretty(BufWriter::new(file), value).map_err(|source| {
        CaseError::Parse {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// A solver case rooted at a directory, opened at a specific time.
#[derive(Debug, Clone)]
pub struct Case {
    root: PathBuf,
    time: String,
}

impl Case {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, time: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            time: time.into(),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn time(&self) -> &str {
        &self.time
    }

    #[must_use]
    pub fn time_dir(&self) -> PathBuf {
        self.root.join(&self.time)
    }

    #[must_use]
    pub fn constant_dir(&self) -> PathBuf {
        self.root.join("constant")
    }

    #[must_use]
    pub fn system_dir(&self) -> PathBuf {
        self.root.join("system")
    }

    #[must_use]
    pub fn field_path(&self, name: &str) -> PathBuf {
        self.time_dir().join(format!("{name}.json"))
    }

    /// Reads a must-read scalar field from the case's time directory.
    ///
    /// # Errors
    ///
    /// Returns [`CaseError::MissingField`] naming the field when the file is
    /// absent, or a parse/io error otherwise.
    pub fn must_read(&self, name: &str) -> Result<VolScalarField, CaseError> {
        let path = self.field_path(name);
        match read_json_optional(&path)? {
            Some(field) => Ok(field),
            None => Err(CaseError::MissingField {
                name: name.to_string(),
                path,
            }),
        }
    }

    /// Reads a must-read vector field from the case's time directory.
    ///
    /// # Errors
    ///
    /// Returns [`CaseError::MissingField`] naming the field when the file is
    /// absent, or a parse/io error otherwise.
    pub fn must_read_vector(&self, name: &str) -> Result<VolVectorField, CaseError> {
        let path = self.field_path(name);
        match read_json_optional(&path)? {
            Some(field) => Ok(field),
            None => Err(CaseError::MissingField {
                name: name.to_string(),
                path,
            }),
        }
    }

    /// Persists a scalar field into the case's time directory.
    ///
    /// # Errors
    ///
    /// Returns [`CaseError`] on io failure.
    pub fn write(&self, field: &VolScalarField) -> Result<(), CaseError> {
        write_json(&self.field_path(field.name()), field)
    }

    /// Persists a vector field into the case's time directory.
    ///
    /// # Errors
    ///
    /// Returns [`CaseError`] on io failure.
    pub fn write_vector(&self, field: &VolVectorField) -> Result<(), CaseError> {
        write_json(&self.field_path(field.name()), field)
    }

    /// Reads the gravitational acceleration from `constant/g.json`.
    ///
    /// # Errors
    ///
    /// Returns [`CaseError::MissingConfig`] when the file is absent.
    pub fn gravity(&self) -> Result<DimensionedVector, CaseError> {
        read_json(&self.constant_dir().join("g.json"))
    }

    /// Reads the reference height from `constant/h_ref.json`, defaulting to
    /// a zero length when the file is absent.
    ///
    /// # Errors
    ///
    /// Returns [`CaseError`] when the file exists but cannot be read.
    pub fn h_ref(&self) -> Result<DimensionedScalar, CaseError> {
        let read = read_json_optional(&self.constant_dir().join("h_ref.json"))?;
        Ok(read.unwrap_or_else(|| DimensionedScalar::zero("hRef", Dimensions::LENGTH)))
    }
}
