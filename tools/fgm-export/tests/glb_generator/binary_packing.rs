//! Binary data packing for the BIN chunk.

use serde_json::{Value, json};

use super::mesh_data::MeshData;

/// glTF componentType for f32
const FLOAT: u32 = 5126;
/// glTF componentType for u16
const UNSIGNED_SHORT: u32 = 5123;

/// Order in which bufferViews are listed relative to accessors
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewOrder {
    /// bufferViews[i] belongs to accessors[i]
    Sequential,
    /// Position and normal views of each mesh trade places
    SwapPositionNormal,
    /// All bufferViews listed back to front
    Reversed,
}

/// BIN chunk contents plus the JSON describing them
pub struct PackedScene {
    pub buffer: Vec<u8>,
    pub buffer_views: Vec<Value>,
    pub accessors: Vec<Value>,
    pub meshes: Vec<Value>,
}

fn align_buffer(buffer: &mut Vec<u8>) {
    while !buffer.len().is_multiple_of(4) {
        buffer.push(0);
    }
}

/// Pack every mesh into one buffer: four views and four accessors per mesh
pub fn pack_meshes(meshes: &[MeshData], order: ViewOrder) -> PackedScene {
    let mut buffer = Vec::new();
    let mut views = Vec::new();
    let mut accessors = Vec::new();
    let mut mesh_json = Vec::new();

    for mesh in meshes {
        let first = accessors.len();
        let layouts = [
            (mesh.positions.len(), FLOAT, "VEC3"),
            (mesh.normals.len(), FLOAT, "VEC3"),
            (mesh.uvs.len(), FLOAT, "VEC2"),
            (mesh.indices.len(), UNSIGNED_SHORT, "SCALAR"),
        ];

        for (bytes, (count, component_type, type_)) in mesh.attribute_bytes().iter().zip(layouts) {
            align_buffer(&mut buffer);
            let offset = buffer.len();
            buffer.extend_from_slice(bytes);
            views.push(json!({
                "buffer": 0,
                "byteOffset": offset,
                "byteLength": bytes.len(),
            }));
            accessors.push(json!({
                "componentType": component_type,
                "count": count,
                "type": type_,
            }));
        }

        mesh_json.push(json!({
            "primitives": [{
                "attributes": {
                    "POSITION": first,
                    "NORMAL": first + 1,
                    "TEXCOORD_0": first + 2,
                },
                "indices": first + 3,
                "mode": 4,
            }]
        }));
    }
    align_buffer(&mut buffer);

    // view_of[accessor] = index of its bufferView in the final list
    let n = views.len();
    let view_of: Vec<usize> = (0..n)
        .map(|i| match order {
            ViewOrder::Sequential => i,
            ViewOrder::SwapPositionNormal => match i % 4 {
                0 => i + 1,
                1 => i - 1,
                _ => i,
            },
            ViewOrder::Reversed => n - 1 - i,
        })
        .collect();

    let mut ordered = vec![Value::Null; n];
    for (index, (accessor, view)) in accessors.iter_mut().zip(views).enumerate() {
        ordered[view_of[index]] = view;
        accessor["bufferView"] = json!(view_of[index]);
    }

    PackedScene {
        buffer,
        buffer_views: ordered,
        accessors,
        meshes: mesh_json,
    }
}
