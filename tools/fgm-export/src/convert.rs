//! GLB -> .fgm conversion

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use fgm_common::write_fgm;

use crate::config::DecodeOptions;
use crate::decode::decode_with_options;
use crate::mesh::DecodedMeshes;

/// Decode `input` and write the flattened meshes to `output`
///
/// Nothing is created at `output` when decoding fails.
pub fn convert_glb(input: &Path, output: &Path, options: &DecodeOptions) -> Result<DecodedMeshes> {
    let decoded = decode_with_options(input, options)
        .with_context(|| format!("Failed to decode {:?}", input))?;

    write_decoded(output, &decoded)?;

    for (index, sizes) in decoded.sizes.iter().enumerate() {
        tracing::info!(
            "Mesh {}: position={} normals={} texcoords={} indices={}",
            index,
            sizes.position,
            sizes.normals,
            sizes.texcoords,
            sizes.indices
        );
    }
    tracing::info!(
        "Converted {} meshes, {} bytes payload",
        decoded.mesh_count(),
        decoded.buffer.len()
    );

    Ok(decoded)
}

/// Write `decoded` as an .fgm file
///
/// A partially written file is removed on failure.
pub fn write_decoded(output: &Path, decoded: &DecodedMeshes) -> Result<()> {
    let result = write_file(output, decoded);
    if result.is_err() && output.exists() {
        if let Err(err) = std::fs::remove_file(output) {
            tracing::warn!("Failed to remove partial output {:?}: {}", output, err);
        }
    }
    result
}

fn write_file(output: &Path, decoded: &DecodedMeshes) -> Result<()> {
    let file =
        File::create(output).with_context(|| format!("Failed to create output: {:?}", output))?;
    let mut writer = BufWriter::new(file);
    write_fgm(&mut writer, &decoded.sizes, &decoded.buffer)
        .and_then(|()| writer.flush().map_err(Into::into))
        .with_context(|| format!("Failed to write output: {:?}", output))
}
