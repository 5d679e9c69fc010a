pub mod shots;

use std::fs;
use std::io::Cursor;
use std::path::Path;

use bincode::ErrorKind;
use log::info;
use thiserror::Error;

use crate::clubs::ClubTable;

pub use shots::{parse_shots_csv, read_shots_from_file};

/// Compression level used when encoding serialized club tables.
const TABLE_COMPRESSION_LEVEL: i32 = 19;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialize(#[from] Box<ErrorKind>),
    #[error("Compression error: {0}")]
    Compression(#[source] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing required column {0:?}")]
    MissingColumn(&'static str),
}

pub fn serialize_table(table: &ClubTable) -> Result<Vec<u8>, DataError> {
    let encoded = bincode::serialize(table)?;
    let mut cursor = Cursor::new(encoded);
    zstd::stream::encode_all(&mut cursor, TABLE_COMPRESSION_LEVEL).map_err(DataError::Compression)
}

pub fn deserialize_table(bytes: &[u8]) -> Result<ClubTable, DataError> {
    let mut cursor = Cursor::new(bytes);
    let decoded = zstd::stream::decode_all(&mut cursor).map_err(DataError::Compression)?;
    let table: ClubTable = bincode::deserialize(&decoded)?;
    Ok(table)
}

pub fn write_table_to_file<P: AsRef<Path>>(table: &ClubTable, path: P) -> Result<(), DataError> {
    let bytes = serialize_table(table)?;
    fs::write(path, bytes)?;
    Ok(())
}

pub fn read_table_from_file<P: AsRef<Path>>(path: P) -> Result<ClubTable, DataError> {
    let bytes = fs::read(path)?;
    deserialize_table(&bytes)
}

/// Reads a JSON array of club profiles.
pub fn load_table_json<P: AsRef<Path>>(path: P) -> Result<ClubTable, DataError> {
    let bytes = fs::read(path)?;
    let table: ClubTable = serde_json::from_slice(&bytes)?;
    Ok(table)
}

/// Loads a table by extension: `.json` as JSON, anything else as a compressed bundle.
pub fn load_table<P: AsRef<Path>>(path: P) -> Result<ClubTable, DataError> {
    let path = path.as_ref();
    let table = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => load_table_json(path)?,
        _ => read_table_from_file(path)?,
    };
    info!("Loaded {} clubs from {}", table.len(), path.display());
    Ok(table)
}
