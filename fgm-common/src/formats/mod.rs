//! FGM binary format
//!
//! POD format - no magic bytes, no mesh count. The number of meshes is known
//! by whoever produced the file (it is the length of the size table).

mod fgm_file;
mod mesh_sizes;

pub use fgm_file::{FgmFile, mesh_regions, write_fgm};
pub use mesh_sizes::MeshSizes;

/// File extension for flattened mesh files
pub const FGM_EXT: &str = "fgm";
