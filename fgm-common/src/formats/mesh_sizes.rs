//! Per-mesh size record
//!
//! # Layout
//! ```text
//! 0x00: position u64   (bytes of POSITION data)
//! 0x08: normals u64    (bytes of NORMAL data)
//! 0x10: texcoords u64  (bytes of TEXCOORD_0 data)
//! 0x18: indices u64    (bytes of index data)
//! ```
//!
//! The mesh payload that follows the size table stores the four regions in
//! the same order.

/// Byte lengths of the four regions of one flattened mesh (32 bytes)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[repr(C)]
pub struct MeshSizes {
    pub position: u64,
    pub normals: u64,
    pub texcoords: u64,
    pub indices: u64,
}

impl MeshSizes {
    pub const SIZE: usize = 32;

    pub fn new(position: u64, normals: u64, texcoords: u64, indices: u64) -> Self {
        Self {
            position,
            normals,
            texcoords,
            indices,
        }
    }

    /// Total payload bytes of this mesh, `None` on overflow
    pub fn total(&self) -> Option<u64> {
        self.position
            .checked_add(self.normals)?
            .checked_add(self.texcoords)?
            .checked_add(self.indices)
    }

    /// Region lengths in payload order
    pub fn regions(&self) -> [u64; 4] {
        [self.position, self.normals, self.texcoords, self.indices]
    }

    /// Write record to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..8].copy_from_slice(&self.position.to_le_bytes());
        bytes[8..16].copy_from_slice(&self.normals.to_le_bytes());
        bytes[16..24].copy_from_slice(&self.texcoords.to_le_bytes());
        bytes[24..32].copy_from_slice(&self.indices.to_le_bytes());
        bytes
    }

    /// Read record from bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE {
            return None;
        }
        let field = |at: usize| {
            let mut raw = [0u8; 8];
            raw.copy_from_slice(&bytes[at..at + 8]);
            u64::from_le_bytes(raw)
        };
        Some(Self {
            position: field(0),
            normals: field(8),
            texcoords: field(16),
            indices: field(24),
        })
    }
}
