//! Attribute descriptors and glTF type tables

/// glTF `componentType` codes
pub const COMPONENT_BYTE: i64 = 5120;
pub const COMPONENT_UNSIGNED_BYTE: i64 = 5121;
pub const COMPONENT_SHORT: i64 = 5122;
pub const COMPONENT_UNSIGNED_SHORT: i64 = 5123;
pub const COMPONENT_UNSIGNED_INT: i64 = 5125;
pub const COMPONENT_FLOAT: i64 = 5126;

/// Byte size of one component for a glTF `componentType` code
///
/// Unknown codes are treated as one byte.
pub fn component_byte_size(component_type: i64) -> u64 {
    match component_type {
        COMPONENT_UNSIGNED_INT | COMPONENT_FLOAT => 4,
        COMPONENT_SHORT | COMPONENT_UNSIGNED_SHORT => 2,
        _ => 1,
    }
}

const TYPE_COMPONENTS: [(&str, u64); 7] = [
    ("SCALAR", 1),
    ("VEC2", 2),
    ("VEC3", 3),
    ("VEC4", 4),
    ("MAT2", 4),
    ("MAT3", 9),
    ("MAT4", 16),
];

/// Components per element for a glTF accessor `type` string
///
/// Matched by prefix, so `"VEC3_x"` counts as `VEC3`. Unknown types are
/// treated as scalars.
pub fn components_per_element(accessor_type: &str) -> u64 {
    TYPE_COMPONENTS
        .iter()
        .find(|(name, _)| accessor_type.starts_with(*name))
        .map_or(1, |&(_, components)| components)
}

/// The four per-mesh attributes, in output order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Position,
    Normal,
    TexCoord0,
    Indices,
}

impl Attribute {
    pub const ALL: [Attribute; 4] = [
        Attribute::Position,
        Attribute::Normal,
        Attribute::TexCoord0,
        Attribute::Indices,
    ];

    /// Name as it appears in the primitive JSON
    pub fn gltf_name(self) -> &'static str {
        match self {
            Attribute::Position => "POSITION",
            Attribute::Normal => "NORMAL",
            Attribute::TexCoord0 => "TEXCOORD_0",
            Attribute::Indices => "indices",
        }
    }
}

/// Where one accessor's bytes live in the BIN chunk and how they are laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeDescriptor {
    pub accessor_id: usize,
    /// bufferView the accessor was resolved against
    pub buffer_view: usize,
    pub byte_length: u64,
    pub byte_offset: u64,
    pub element_count: u64,
    pub component_byte_size: u64,
    pub components_per_element: u64,
}

impl AttributeDescriptor {
    /// Bytes per element (`None` on overflow)
    pub fn element_size(&self) -> Option<u64> {
        self.components_per_element
            .checked_mul(self.component_byte_size)
    }

    /// Bytes the elements occupy when tightly packed (`None` on overflow)
    pub fn packed_len(&self) -> Option<u64> {
        self.element_size()?.checked_mul(self.element_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_byte_size() {
        assert_eq!(component_byte_size(COMPONENT_FLOAT), 4);
        assert_eq!(component_byte_size(COMPONENT_UNSIGNED_INT), 4);
        assert_eq!(component_byte_size(COMPONENT_SHORT), 2);
        assert_eq!(component_byte_size(COMPONENT_UNSIGNED_SHORT), 2);
        assert_eq!(component_byte_size(COMPONENT_BYTE), 1);
        assert_eq!(component_byte_size(COMPONENT_UNSIGNED_BYTE), 1);
        assert_eq!(component_byte_size(9999), 1);
    }

    #[test]
    fn test_components_per_element() {
        assert_eq!(components_per_element("SCALAR"), 1);
        assert_eq!(components_per_element("VEC2"), 2);
        assert_eq!(components_per_element("VEC3"), 3);
        assert_eq!(components_per_element("VEC4"), 4);
        assert_eq!(components_per_element("MAT2"), 4);
        assert_eq!(components_per_element("MAT3"), 9);
        assert_eq!(components_per_element("MAT4"), 16);
        assert_eq!(components_per_element("VEC5"), 1);
        assert_eq!(components_per_element(""), 1);
    }

    #[test]
    fn test_components_per_element_matches_prefix() {
        assert_eq!(components_per_element("VEC3_x"), 3);
        assert_eq!(components_per_element("MAT4x4"), 16);
        assert_eq!(components_per_element("SCALARS"), 1);
        assert_eq!(components_per_element("VEC"), 1);
        assert_eq!(components_per_element("vec3"), 1);
    }

    #[test]
    fn test_packed_len() {
        let descriptor = AttributeDescriptor {
            accessor_id: 0,
            buffer_view: 0,
            byte_length: 36,
            byte_offset: 0,
            element_count: 3,
            component_byte_size: 4,
            components_per_element: 3,
        };
        assert_eq!(descriptor.element_size(), Some(12));
        assert_eq!(descriptor.packed_len(), Some(36));

        let huge = AttributeDescriptor {
            element_count: u64::MAX,
            ..descriptor
        };
        assert_eq!(huge.packed_len(), None);
    }
}
