//! Mesh flattening (glTF accessors -> packed byte regions)

mod assemble;
mod extract;
mod resolve;
mod types;

pub use assemble::{DecodedMeshes, MeshAssembler, assemble};
pub use extract::extract_attribute;
pub use resolve::Resolver;
pub use types::{Attribute, AttributeDescriptor, component_byte_size, components_per_element};
