//! Flat JSON stock file.
//!
//! The file is a single JSON object: item names as keys, integer quantities
//! as values. Key order is kept on read and write.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use thiserror::Error;

use stockroom_core::Quantity;

/// Item name -> quantity, in insertion order.
pub type StockMap = IndexMap<String, Quantity>;

const INDENT: &[u8] = b"    ";

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    /// Not JSON, or JSON that is not an object of integers.
    #[error("invalid JSON format in {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize inventory: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl PersistenceError {
    fn io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            return Self::NotFound {
                path: path.to_path_buf(),
            };
        }
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Read a stock file.
pub fn read_stock_file(path: &Path) -> Result<StockMap, PersistenceError> {
    let file = File::open(path).map_err(|err| PersistenceError::io(path, err))?;

    serde_json::from_reader(BufReader::new(file)).map_err(|err| {
        if err.is_io() {
            PersistenceError::io(path, err.into())
        } else {
            PersistenceError::Malformed {
                path: path.to_path_buf(),
                source: err,
            }
        }
    })
}

/// Write `stock` as 4-space indented JSON, replacing any existing file.
pub fn write_stock_file(path: &Path, stock: &StockMap) -> Result<(), PersistenceError> {
    let file = File::create(path).map_err(|err| PersistenceError::io(path, err))?;
    let mut writer = BufWriter::new(file);

    let mut serializer =
        serde_json::Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(INDENT));
    stock.serialize(&mut serializer).map_err(|err| {
        if err.is_io() {
            PersistenceError::io(path, err.into())
        } else {
            PersistenceError::Serialize(err)
        }
    })?;

    writer
        .write_all(b"\n")
        .and_then(|()| writer.flush())
        .map_err(|err| PersistenceError::io(path, err))
}
