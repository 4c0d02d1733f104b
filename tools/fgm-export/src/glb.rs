//! GLB container reader
//!
//! # Layout
//! ```text
//! 0x00: magic "glTF"
//! 0x04: version u32 (must be 2)
//! 0x08: total_size u32 (whole file, header included)
//! 0x0C: chunk 0: length u32, type u32 ("JSON"), payload
//! var:  chunk 1: length u32, type u32 ("BIN\0"), payload
//! ```
//!
//! All integers are little-endian. Exactly these two chunks are accepted.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use crate::error::{ChunkKind, DecodeError, FormatError};

pub const GLB_MAGIC: [u8; 4] = *b"glTF";
pub const GLB_VERSION: u32 = 2;
pub const CHUNK_TYPE_JSON: u32 = 0x4E4F_534A;
pub const CHUNK_TYPE_BIN: u32 = 0x004E_4942;

/// Size of the file header (magic, version, total size)
pub const HEADER_SIZE: u64 = 12;
/// Size of a chunk header (length, type)
pub const CHUNK_HEADER_SIZE: u64 = 8;

/// Magic as written by big-endian writers that emit it as a u32
const GLB_MAGIC_SWAPPED: [u8; 4] = *b"FTlg";

/// The two chunks of a GLB file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlbContainer {
    pub declared_size: u32,
    pub json: Vec<u8>,
    pub bin: Vec<u8>,
}

impl GlbContainer {
    /// Read a GLB file from disk
    pub fn open(path: &Path) -> Result<Self, DecodeError> {
        let file = File::open(path).map_err(|source| DecodeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        read_container(BufReader::new(file))
    }

    /// Read a GLB held in memory
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        read_container(bytes)
    }

    /// Bytes the two chunks occupy, headers included
    pub fn encoded_len(&self) -> u64 {
        HEADER_SIZE + 2 * CHUNK_HEADER_SIZE + self.json.len() as u64 + self.bin.len() as u64
    }
}

/// Read and validate a GLB container from `reader`
///
/// The header is checked before any chunk is read, so a wrong magic or
/// version never costs a payload allocation.
pub fn read_container<R: Read>(mut reader: R) -> Result<GlbContainer, DecodeError> {
    let magic = read_array(&mut reader)?;
    let version = u32::from_le_bytes(read_array(&mut reader)?);
    let declared_size = u32::from_le_bytes(read_array(&mut reader)?);

    if magic == GLB_MAGIC_SWAPPED {
        tracing::warn!("GLB magic is byte-swapped, reading as little-endian anyway");
    } else if magic != GLB_MAGIC {
        return Err(FormatError::BadMagic { found: magic }.into());
    }
    if version != GLB_VERSION {
        return Err(FormatError::BadVersion(version).into());
    }

    let json = read_chunk(&mut reader, 0, ChunkKind::Json)?;
    let bin = read_chunk(&mut reader, 1, ChunkKind::Bin)?;
    let container = GlbContainer {
        declared_size,
        json,
        bin,
    };

    let actual = container.encoded_len();
    if actual != u64::from(declared_size) {
        return Err(FormatError::SizeMismatch {
            declared: u64::from(declared_size),
            actual,
        }
        .into());
    }

    let mut extra = [0u8; 1];
    if reader.read(&mut extra)? != 0 {
        return Err(FormatError::TrailingData.into());
    }

    tracing::debug!(
        "GLB container: {} bytes JSON, {} bytes BIN",
        container.json.len(),
        container.bin.len()
    );
    Ok(container)
}

fn read_array<R: Read>(reader: &mut R) -> io::Result<[u8; 4]> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(buf)
}

fn read_chunk<R: Read>(
    reader: &mut R,
    index: usize,
    kind: ChunkKind,
) -> Result<Vec<u8>, DecodeError> {
    let truncated = |err: io::Error| -> DecodeError {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            FormatError::ChunkReadError { chunk: kind }.into()
        } else {
            err.into()
        }
    };

    let length = u32::from_le_bytes(read_array(reader).map_err(truncated)?);
    let chunk_type = u32::from_le_bytes(read_array(reader).map_err(truncated)?);

    let expected_type = match kind {
        ChunkKind::Json => CHUNK_TYPE_JSON,
        ChunkKind::Bin => CHUNK_TYPE_BIN,
    };
    if chunk_type != expected_type {
        return Err(FormatError::UnexpectedChunkType {
            index,
            expected: kind,
            found: chunk_type,
        }
        .into());
    }

    // Bounded read: a lying length field cannot force a large allocation.
    let mut payload = Vec::new();
    reader
        .by_ref()
        .take(u64::from(length))
        .read_to_end(&mut payload)?;
    if payload.len() as u64 != u64::from(length) {
        return Err(FormatError::ChunkReadError { chunk: kind }.into());
    }
    Ok(payload)
}
