//! Flatten every mesh of a glTF document into one buffer

use fgm_common::{MeshSizes, mesh_regions};

use crate::config::DecodeOptions;
use crate::error::{DecodeError, SchemaError};
use crate::json::{JsonValue, ValueKind};

use super::extract::extract_attribute;
use super::resolve::Resolver;
use super::types::Attribute;

/// Result of one decode: the flattened buffer and one size record per mesh
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedMeshes {
    pub buffer: Vec<u8>,
    pub sizes: Vec<MeshSizes>,
}

impl DecodedMeshes {
    pub fn mesh_count(&self) -> usize {
        self.sizes.len()
    }

    /// The four regions of mesh `index`: positions, normals, texcoords, indices
    pub fn mesh(&self, index: usize) -> Option<[&[u8]; 4]> {
        mesh_regions(&self.sizes, &self.buffer, index)
    }

    pub fn into_parts(self) -> (Vec<u8>, Vec<MeshSizes>) {
        (self.buffer, self.sizes)
    }
}

/// Accumulates meshes for a single decode
pub struct MeshAssembler<'a> {
    resolver: Resolver<'a>,
    bin: &'a [u8],
    case_sensitive: bool,
    buffer: Vec<u8>,
    sizes: Vec<MeshSizes>,
    write_offset: usize,
}

impl<'a> MeshAssembler<'a> {
    pub fn new(resolver: Resolver<'a>, bin: &'a [u8], options: &DecodeOptions) -> Self {
        Self {
            resolver,
            bin,
            case_sensitive: options.case_sensitive_keys,
            buffer: Vec::new(),
            sizes: Vec::new(),
            write_offset: 0,
        }
    }

    /// Bytes written so far
    pub fn write_offset(&self) -> usize {
        self.write_offset
    }

    /// Resolve, extract and append the first primitive of `mesh`
    ///
    /// Nothing is appended unless all four attributes succeed.
    pub fn push_mesh(&mut self, mesh: &JsonValue) -> Result<MeshSizes, SchemaError> {
        let primitive = self.first_primitive(mesh)?;
        let attributes = self.member(primitive, "attributes")?;

        // All four ids must be present before any data is touched
        let mut accessor_ids = [0i64; 4];
        for (slot, attribute) in accessor_ids.iter_mut().zip(Attribute::ALL) {
            let source = match attribute {
                Attribute::Indices => primitive,
                _ => attributes,
            };
            *slot = self.accessor_id(source, attribute)?;
        }

        let mut regions = Vec::with_capacity(accessor_ids.len());
        for accessor_id in accessor_ids {
            let descriptor = self.resolver.resolve(accessor_id)?;
            regions.push(extract_attribute(&descriptor, self.bin)?);
        }

        let mesh_len = regions
            .iter()
            .try_fold(0usize, |acc, region| acc.checked_add(region.len()))
            .ok_or(SchemaError::SizeOverflow("mesh"))?;
        let end = self
            .write_offset
            .checked_add(mesh_len)
            .ok_or(SchemaError::SizeOverflow("output buffer"))?;

        self.buffer.resize(end, 0);
        for region in &regions {
            let next = self.write_offset + region.len();
            self.buffer[self.write_offset..next].copy_from_slice(region);
            self.write_offset = next;
        }

        let sizes = MeshSizes::new(
            regions[0].len() as u64,
            regions[1].len() as u64,
            regions[2].len() as u64,
            regions[3].len() as u64,
        );
        self.sizes.push(sizes);
        Ok(sizes)
    }

    pub fn finish(self) -> DecodedMeshes {
        DecodedMeshes {
            buffer: self.buffer,
            sizes: self.sizes,
        }
    }

    fn member<'v>(&self, value: &'v JsonValue, key: &str) -> Result<&'v JsonValue, SchemaError> {
        value
            .get_member_with(key, self.case_sensitive)
            .ok_or_else(|| SchemaError::MissingField(key.to_string()))
    }

    fn first_primitive<'v>(&self, mesh: &'v JsonValue) -> Result<&'v JsonValue, SchemaError> {
        let primitives = self.member(mesh, "primitives")?;
        if primitives.kind() != ValueKind::Array {
            return Err(SchemaError::InvalidField {
                field: "primitives".to_string(),
                expected: "an array",
                found: primitives.kind(),
            });
        }
        primitives
            .get_element(0)
            .ok_or(SchemaError::IndexOutOfRange {
                array: "primitives",
                index: 0,
            })
    }

    fn accessor_id(&self, source: &JsonValue, attribute: Attribute) -> Result<i64, SchemaError> {
        let name = attribute.gltf_name();
        let value = source
            .get_member_with(name, self.case_sensitive)
            .ok_or_else(|| SchemaError::MissingAttribute(name.to_string()))?;
        value.as_i64().ok_or_else(|| SchemaError::InvalidField {
            field: name.to_string(),
            expected: "an accessor index",
            found: value.kind(),
        })
    }
}

/// Flatten all meshes of `root` in array order
pub fn assemble(
    root: &JsonValue,
    bin: &[u8],
    options: &DecodeOptions,
) -> Result<DecodedMeshes, DecodeError> {
    let meshes = root
        .get_member_with("meshes", options.case_sensitive_keys)
        .ok_or_else(|| SchemaError::MissingField("meshes".to_string()))?;
    let meshes = meshes.as_array().ok_or_else(|| SchemaError::InvalidField {
        field: "meshes".to_string(),
        expected: "an array",
        found: meshes.kind(),
    })?;
    if meshes.is_empty() {
        return Err(SchemaError::NoMeshes.into());
    }

    let resolver = Resolver::new(root, options)?;
    let mut assembler = MeshAssembler::new(resolver, bin, options);

    for (index, mesh) in meshes.iter().enumerate() {
        let sizes = assembler
            .push_mesh(mesh)
            .map_err(|source| DecodeError::Mesh { index, source })?;
        tracing::debug!(
            "mesh {}: position {} B, normals {} B, texcoords {} B, indices {} B",
            index,
            sizes.position,
            sizes.normals,
            sizes.texcoords,
            sizes.indices
        );
    }

    tracing::debug!(
        "assembled {} meshes, {} bytes",
        meshes.len(),
        assembler.write_offset()
    );
    Ok(assembler.finish())
}
