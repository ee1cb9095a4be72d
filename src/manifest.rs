//! File manifest extraction for `.torrent` documents.
//!
//! A torrent file is a bencode dictionary whose `info` entry describes either
//! a single file (`name` + `length`) or a directory of files (`name` +
//! `files`, each with a `path` list and a `length`). This module walks a
//! decoded [`Value`] and flattens that structure into a plain list of paths
//! and sizes.

use std::path::PathBuf;

use thiserror::Error;

use crate::decode::decode;
use crate::error::{DecodeError, TypeError};
use crate::value::{Kind, Value};

/// Errors that can occur when extracting a manifest from a torrent document.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The document is not valid bencode.
    #[error("bencode error: {0}")]
    Bencode(#[from] DecodeError),

    /// A field has a different kind than the torrent structure requires.
    #[error("unexpected field type: {0}")]
    FieldType(#[from] TypeError),

    /// A required field is missing from the document.
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// A field is present but its contents are unusable.
    #[error("invalid field: {0}")]
    InvalidField(&'static str),
}

/// A single file within a torrent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Path to the file, rooted at the torrent name.
    pub path: PathBuf,
    /// Size of the file in bytes.
    pub length: u64,
}

/// The flattened file list of a torrent document.
///
/// # Examples
///
/// ```
/// use rbenc::Manifest;
///
/// let data = b"d4:infod6:lengthi1024e4:name8:demo.txt12:piece lengthi16384eee";
/// let manifest = Manifest::from_bytes(data).unwrap();
/// assert_eq!(manifest.name, "demo.txt");
/// assert_eq!(manifest.files.len(), 1);
/// assert_eq!(manifest.total_length(), 1024);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    /// Suggested name for the file or directory.
    pub name: String,
    /// All files in the torrent, one entry for a single-file torrent.
    pub files: Vec<FileEntry>,
}

impl Manifest {
    /// Decodes a torrent document and extracts its manifest.
    ///
    /// # Errors
    ///
    /// Returns an error if the data is not valid bencode or if the decoded
    /// structure does not have the torrent layout.
    pub fn from_bytes(data: &[u8]) -> Result<Self, ManifestError> {
        Self::from_value(&decode(data)?)
    }

    /// Extracts a manifest from an already-decoded torrent document.
    ///
    /// Field lookups lean on the [`Value::get`] sentinel: an absent required
    /// field surfaces as a [`TypeError`] naming `undefined` as the actual
    /// kind.
    ///
    /// # Errors
    ///
    /// Returns an error if the structure does not have the torrent layout.
    pub fn from_value(torrent: &Value) -> Result<Self, ManifestError> {
        let info = torrent.get(b"info")?;
        if info.kind() == Kind::Undefined {
            return Err(ManifestError::MissingField("info"));
        }

        let name = std::str::from_utf8(info.get(b"name")?.as_string()?)
            .map_err(|_| ManifestError::InvalidField("name"))?
            .to_owned();

        let files = info.get(b"files")?;
        let mut entries = Vec::new();
        if files.kind() != Kind::Undefined {
            // Multiple files, each rooted under the torrent name.
            for file in files.as_array()? {
                let mut path = PathBuf::from(&name);
                for part in file.get(b"path")?.as_array()? {
                    let part = std::str::from_utf8(part.as_string()?)
                        .map_err(|_| ManifestError::InvalidField("path"))?;
                    path.push(part);
                }
                entries.push(FileEntry {
                    path,
                    length: file.get(b"length")?.narrow_integer()?,
                });
            }
        } else {
            entries.push(FileEntry {
                path: PathBuf::from(&name),
                length: info.get(b"length")?.narrow_integer()?,
            });
        }

        Ok(Manifest {
            name,
            files: entries,
        })
    }

    /// Total size of all files in the torrent.
    pub fn total_length(&self) -> u64 {
        self.files.iter().map(|f| f.length).sum()
    }
}
