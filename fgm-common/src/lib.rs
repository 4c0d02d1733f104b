//! Shared types for the FGM mesh format
//!
//! FGM ("Fight Game Mesh") is a flattened, load-ready dump of the meshes in a
//! GLB file. This crate is shared between:
//! - `fgm-export` (asset pipeline, writes `.fgm`)
//! - runtime loaders (read `.fgm`)
//!
//! # Modules
//!
//! - [`formats`] - the size table record and the file writer/reader

pub mod formats;

pub use formats::{FGM_EXT, FgmFile, MeshSizes, mesh_regions, write_fgm};
