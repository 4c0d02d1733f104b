//! glTF JSON document construction.

use serde_json::{Value, json};

use super::binary_packing::PackedScene;

/// Build the glTF root object for a packed scene
pub fn build_gltf_json(scene: &PackedScene) -> Value {
    json!({
        "asset": { "version": "2.0", "generator": "fgm-export tests" },
        "scene": 0,
        "scenes": [{ "nodes": (0..scene.meshes.len()).collect::<Vec<_>>() }],
        "nodes": (0..scene.meshes.len())
            .map(|mesh| json!({ "mesh": mesh }))
            .collect::<Vec<_>>(),
        "meshes": scene.meshes,
        "accessors": scene.accessors,
        "bufferViews": scene.buffer_views,
        "buffers": [{ "byteLength": scene.buffer.len() }],
    })
}
