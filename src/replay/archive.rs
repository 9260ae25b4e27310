//! Compressed, integrity-checked history archive.
//!
//! A finished run is stored together with the grid it was sampled on so a
//! viewer can replay it without recomputing anything. Payload layout:
//! `bincode(ArchivePayload)` compressed with zstd, then hashed with blake3.
//! The grid is stored as `(half_width, spacing)` and rebuilt on restore.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::engine::grid::Grid;
use crate::engine::scheme::Scheme;
use crate::error::{AdvectError, AdvectResult};
use crate::replay::History;

/// Archive format version.
pub const ARCHIVE_VERSION: u32 = 1;

/// Default zstd compression level.
pub const DEFAULT_COMPRESSION_LEVEL: i32 = 3;

#[derive(Debug, Serialize, Deserialize)]
struct ArchivePayload {
    grid: Grid,
    history: History,
}

/// Persisted run: compressed history plus the metadata needed to plot it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryArchive {
    /// Format version.
    pub version: u32,
    /// Scheme that produced the history.
    pub scheme: Scheme,
    /// Domain half-width `L`, for axis scaling.
    pub half_width: f64,
    /// Number of snapshots stored.
    pub snapshots: usize,
    /// Compressed payload.
    pub data: Vec<u8>,
    /// Blake3 hash of `data`.
    pub hash: [u8; 32],
}

impl HistoryArchive {
    /// Pack a history and its grid axis.
    ///
    /// # Errors
    ///
    /// Returns error if serialization or compression fails.
    pub fn create(
        history: &History,
        grid: &Grid,
        scheme: Scheme,
        compression_level: i32,
    ) -> AdvectResult<Self> {
        let payload = ArchivePayload {
            grid: grid.clone(),
            history: history.clone(),
        };
        let serialized =
            bincode::serialize(&payload).map_err(|e| AdvectError::serialization(e.to_string()))?;

        let compressed = zstd::encode_all(&serialized[..], compression_level)?;
        let hash = blake3::hash(&compressed);

        tracing::debug!(
            scheme = %scheme,
            snapshots = history.len(),
            raw_bytes = serialized.len(),
            compressed_bytes = compressed.len(),
            "history archived"
        );

        Ok(Self {
            version: ARCHIVE_VERSION,
            scheme,
            half_width: grid.half_width(),
            snapshots: history.len(),
            data: compressed,
            hash: *hash.as_bytes(),
        })
    }

    /// Unpack the history and the axis it was sampled on.
    ///
    /// # Errors
    ///
    /// Returns `ArchiveIntegrity` if the hash does not match, a
    /// serialization error if the payload cannot be decoded or its grid is
    /// rejected, or `ShapeMismatch` if a snapshot does not fit the grid.
    pub fn restore(&self) -> AdvectResult<(History, Vec<f64>)> {
        let computed = blake3::hash(&self.data);
        if computed.as_bytes() != &self.hash {
            return Err(AdvectError::ArchiveIntegrity);
        }

        let decompressed = zstd::decode_all(&self.data[..])?;
        let payload: ArchivePayload = bincode::deserialize(&decompressed)
            .map_err(|e| AdvectError::serialization(e.to_string()))?;

        if payload.history.len() != self.snapshots {
            return Err(AdvectError::serialization(format!(
                "archive header lists {} snapshots, payload holds {}",
                self.snapshots,
                payload.history.len()
            )));
        }

        let n = payload.grid.n();
        if let Some(state) = payload.history.states().iter().find(|s| s.len() != n) {
            return Err(AdvectError::ShapeMismatch {
                expected: n,
                actual: state.len(),
            });
        }

        Ok((payload.history, payload.grid.x().to_vec()))
    }

    /// Write the archive to `path`.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be created or written.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> AdvectResult<()> {
        let mut writer = BufWriter::new(File::create(path.as_ref())?);
        bincode::serialize_into(&mut writer, self)
            .map_err(|e| AdvectError::serialization(e.to_string()))?;
        writer.flush()?;
        tracing::info!(path = %path.as_ref().display(), bytes = self.data.len(), "archive written");
        Ok(())
    }

    /// Read an archive from `path`.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, decoded, or has an
    /// unsupported version.
    pub fn load<P: AsRef<Path>>(path: P) -> AdvectResult<Self> {
        let reader = BufReader::new(File::open(path.as_ref())?);
        let archive: Self =
            bincode::deserialize_from(reader).map_err(|e| AdvectError::serialization(e.to_string()))?;
        if archive.version != ARCHIVE_VERSION {
            return Err(AdvectError::serialization(format!(
                "unsupported archive version {} (expected {ARCHIVE_VERSION})",
                archive.version
            )));
        }
        Ok(archive)
    }

    /// Compressed payload size in bytes.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn compressed_size(&self) -> usize {
        self.data.len()
    }
}
