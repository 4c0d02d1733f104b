//! GLB file -> flattened meshes

use std::path::Path;

use crate::config::DecodeOptions;
use crate::error::DecodeError;
use crate::glb::GlbContainer;
use crate::json::Parser;
use crate::mesh::{DecodedMeshes, assemble};

/// Decode a GLB file with default options
pub fn decode(path: impl AsRef<Path>) -> Result<DecodedMeshes, DecodeError> {
    decode_with_options(path, &DecodeOptions::default())
}

pub fn decode_with_options(
    path: impl AsRef<Path>,
    options: &DecodeOptions,
) -> Result<DecodedMeshes, DecodeError> {
    let path = path.as_ref();
    tracing::debug!("Decoding {:?}", path);
    let container = GlbContainer::open(path)?;
    decode_container(&container, options)
}

/// Decode a GLB held in memory
pub fn decode_bytes(bytes: &[u8], options: &DecodeOptions) -> Result<DecodedMeshes, DecodeError> {
    let container = GlbContainer::from_bytes(bytes)?;
    decode_container(&container, options)
}

fn decode_container(
    container: &GlbContainer,
    options: &DecodeOptions,
) -> Result<DecodedMeshes, DecodeError> {
    let root = Parser::new(&container.json)
        .with_nesting_limit(options.nesting_limit)
        .parse()?;
    tracing::debug!("JSON chunk: {} values", root.value_count());

    let decoded = assemble(&root, &container.bin, options)?;
    tracing::info!(
        "Decoded {} meshes ({} bytes)",
        decoded.mesh_count(),
        decoded.buffer.len()
    );
    Ok(decoded)
}
