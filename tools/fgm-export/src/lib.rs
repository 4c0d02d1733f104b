//! fgm-export library
//!
//! Reads binary glTF (GLB) files and flattens the first primitive of every
//! mesh into one load-ready buffer: positions, normals, texcoords and indices
//! back to back, plus a size record per mesh. The GLB JSON chunk is read with
//! a small built-in parser.

pub mod config;
pub mod convert;
pub mod decode;
pub mod error;
pub mod glb;
pub mod json;
pub mod mesh;

pub use config::{BufferViewLookup, DecodeOptions, load_options};
pub use convert::{convert_glb, write_decoded};
pub use decode::{decode, decode_bytes, decode_with_options};
pub use error::{ChunkKind, DecodeError, FormatError, SchemaError};
pub use glb::{GlbContainer, read_container};
pub use mesh::{AttributeDescriptor, DecodedMeshes, MeshAssembler};

// Re-export the output format
pub use fgm_common::{FGM_EXT, FgmFile, MeshSizes, write_fgm};
