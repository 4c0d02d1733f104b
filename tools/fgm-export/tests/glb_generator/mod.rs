//! Programmatic GLB generation for integration tests.
//!
//! Each mesh gets four tightly packed bufferViews (positions, normals, UVs,
//! u16 indices) and one accessor per view. Accessors always name their view
//! through `bufferView`; [`ViewOrder`] controls whether view indices line up
//! with accessor indices.

#![allow(dead_code)]

mod binary_packing;
mod glb_assembly;
mod gltf_json;
mod mesh_data;

pub use binary_packing::ViewOrder;
pub use mesh_data::{MeshData, create_quad, create_triangle};

use serde_json::Value;

/// Generate a GLB holding `meshes` in order
pub fn generate_glb(meshes: &[MeshData], order: ViewOrder) -> Vec<u8> {
    let scene = binary_packing::pack_meshes(meshes, order);
    let root = gltf_json::build_gltf_json(&scene);
    glb_assembly::assemble_glb(&root, &scene.buffer)
}

/// Generate a GLB from a hand-edited glTF document
///
/// `edit` runs on the generated JSON before assembly.
pub fn generate_glb_with(
    meshes: &[MeshData],
    order: ViewOrder,
    edit: impl FnOnce(&mut Value),
) -> Vec<u8> {
    let scene = binary_packing::pack_meshes(meshes, order);
    let mut root = gltf_json::build_gltf_json(&scene);
    edit(&mut root);
    glb_assembly::assemble_glb(&root, &scene.buffer)
}

/// Expected flattened bytes for `meshes`: each mesh's four regions back to back
pub fn expected_buffer(meshes: &[MeshData]) -> Vec<u8> {
    meshes
        .iter()
        .flat_map(|mesh| mesh.attribute_bytes())
        .flatten()
        .collect()
}
