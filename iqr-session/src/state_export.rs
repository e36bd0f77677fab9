//! Session state export: positive/negative vectors as a zip archive with
//! a single JSON entry named by the session uuid.

use std::io::{Cursor, Write};

use iqr_core::errors::{IqrError, IqrResult};
use serde::{Deserialize, Serialize};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// The exported bundle: labeled training vectors for the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IqrStateBundle {
    pub pos: Vec<Vec<f32>>,
    pub neg: Vec<Vec<f32>>,
}

/// Serialize the bundle into a deflate-compressed zip archive whose single
/// entry is named by the session uuid.
pub fn write_state_archive(session_uuid: &str, bundle: &IqrStateBundle) -> IqrResult<Vec<u8>> {
    let json = serde_json::to_vec(bundle).map_err(|e| IqrError::StateExport {
        reason: format!("bundle serialization failed: {e}"),
    })?;

    let mut buffer = Vec::new();
    let mut archive = ZipWriter::new(Cursor::new(&mut buffer));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    archive
        .start_file(session_uuid, options)
        .map_err(archive_err)?;
    archive.write_all(&json).map_err(archive_err)?;
    archive.finish().map_err(archive_err)?;

    Ok(buffer)
}

fn archive_err(e: impl std::fmt::Display) -> IqrError {
    IqrError::StateExport {
        reason: format!("archive write failed: {e}"),
    }
}
