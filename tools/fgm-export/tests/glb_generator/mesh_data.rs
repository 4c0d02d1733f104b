//! Mesh geometry for generated GLB files.

/// Raw attribute data of one mesh
#[derive(Clone)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u16>,
}

impl MeshData {
    /// Bytes of each attribute, in output order
    pub fn attribute_bytes(&self) -> [Vec<u8>; 4] {
        [
            bytemuck::cast_slice::<_, u8>(self.positions.as_slice()).to_vec(),
            bytemuck::cast_slice::<_, u8>(self.normals.as_slice()).to_vec(),
            bytemuck::cast_slice::<_, u8>(self.uvs.as_slice()).to_vec(),
            bytemuck::cast_slice::<_, u8>(self.indices.as_slice()).to_vec(),
        ]
    }
}

/// Unit quad facing +Z (4 vertices, 2 triangles)
pub fn create_quad() -> MeshData {
    MeshData {
        positions: vec![
            [-0.5, -0.5, 0.0],
            [0.5, -0.5, 0.0],
            [0.5, 0.5, 0.0],
            [-0.5, 0.5, 0.0],
        ],
        normals: vec![[0.0, 0.0, 1.0]; 4],
        uvs: vec![[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]],
        indices: vec![0, 1, 2, 0, 2, 3],
    }
}

/// Single triangle in the XY plane; 3 indices leave the index view unaligned
pub fn create_triangle() -> MeshData {
    MeshData {
        positions: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
        normals: vec![[0.0, 0.0, 1.0]; 3],
        uvs: vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]],
        indices: vec![0, 1, 2],
    }
}
