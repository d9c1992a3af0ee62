//! JSON output boundary.
//!
//! Serialization and file persistence for scrape results. Parent directories
//! are created as needed; the serialized form round-trips losslessly.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::Result;

/// Serialize a value to a JSON string.
pub fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

/// Serialize a value and write it to `output_path`, returning the path.
pub fn save_json<T: Serialize>(value: &T, output_path: &Path, pretty: bool) -> Result<PathBuf> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(output_path, to_json(value, pretty)?)?;
    Ok(output_path.to_path_buf())
}
