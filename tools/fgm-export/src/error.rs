//! Error types for GLB decoding

use std::io;
use std::path::PathBuf;

use crate::json::{ParseError, ValueKind};

/// Which of the two GLB chunks an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkKind {
    Json,
    Bin,
}

impl std::fmt::Display for ChunkKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChunkKind::Json => f.write_str("JSON"),
            ChunkKind::Bin => f.write_str("BIN"),
        }
    }
}

/// The container structure is wrong
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("bad magic {found:02X?} (expected \"glTF\")")]
    BadMagic { found: [u8; 4] },

    #[error("unsupported container version {0} (must be 2)")]
    BadVersion(u32),

    #[error("{chunk} chunk is truncated")]
    ChunkReadError { chunk: ChunkKind },

    #[error("chunk {index} has type 0x{found:08X}, expected {expected} chunk")]
    UnexpectedChunkType {
        index: usize,
        expected: ChunkKind,
        found: u32,
    },

    #[error("header declares {declared} bytes, chunks occupy {actual}")]
    SizeMismatch { declared: u64, actual: u64 },

    #[error("unexpected data after the BIN chunk")]
    TrailingData,
}

/// The glTF JSON does not describe what the extractor needs
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("missing field \"{0}\"")]
    MissingField(String),

    #[error("primitive has no \"{0}\" accessor")]
    MissingAttribute(String),

    #[error("field \"{field}\" should be {expected}, found {found}")]
    InvalidField {
        field: String,
        expected: &'static str,
        found: ValueKind,
    },

    #[error("{array}[{index}] does not exist")]
    IndexOutOfRange { array: &'static str, index: i64 },

    #[error("byte range {offset}+{length} overruns BIN chunk of {available} bytes")]
    BufferOverrun {
        offset: u64,
        length: u64,
        available: u64,
    },

    #[error("accessor {accessor} needs {required} bytes, its bufferView holds {byte_length}")]
    ElementsExceedView {
        accessor: usize,
        required: u64,
        byte_length: u64,
    },

    #[error("bufferView {view} has byteStride {stride}, elements are {element_size} bytes")]
    UnsupportedStride {
        view: usize,
        stride: u64,
        element_size: u64,
    },

    #[error("size of {0} overflows")]
    SizeOverflow(&'static str),

    #[error("\"meshes\" is empty")]
    NoMeshes,
}

/// Any failure of one decode
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("read failed: {0}")]
    Read(#[from] io::Error),

    #[error("invalid GLB container: {0}")]
    Format(#[from] FormatError),

    #[error("invalid JSON chunk: {0}")]
    Parse(#[from] ParseError),

    #[error("invalid glTF document: {0}")]
    Schema(#[from] SchemaError),

    #[error("mesh {index}: {source}")]
    Mesh {
        index: usize,
        #[source]
        source: SchemaError,
    },
}

impl DecodeError {
    /// The schema error behind this failure, document-level or per mesh
    pub fn schema_error(&self) -> Option<&SchemaError> {
        match self {
            DecodeError::Schema(err) | DecodeError::Mesh { source: err, .. } => Some(err),
            _ => None,
        }
    }
}
