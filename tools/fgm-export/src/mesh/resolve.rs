//! Accessor → bufferView resolution

use crate::config::{BufferViewLookup, DecodeOptions};
use crate::error::SchemaError;
use crate::json::{JsonValue, ValueKind};

use super::types::{AttributeDescriptor, component_byte_size, components_per_element};

/// Turns accessor indices into [`AttributeDescriptor`]s against one glTF document
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    accessors: &'a JsonValue,
    buffer_views: &'a JsonValue,
    lookup: BufferViewLookup,
    case_sensitive: bool,
}

impl<'a> Resolver<'a> {
    /// Fails if the document has no `accessors` or `bufferViews` array
    pub fn new(root: &'a JsonValue, options: &DecodeOptions) -> Result<Self, SchemaError> {
        let case_sensitive = options.case_sensitive_keys;
        Ok(Self {
            accessors: top_level_array(root, "accessors", case_sensitive)?,
            buffer_views: top_level_array(root, "bufferViews", case_sensitive)?,
            lookup: options.buffer_view_lookup,
            case_sensitive,
        })
    }

    pub fn lookup(&self) -> BufferViewLookup {
        self.lookup
    }

    /// Resolve `accessors[accessor_id]` and the bufferView it reads from
    pub fn resolve(&self, accessor_id: i64) -> Result<AttributeDescriptor, SchemaError> {
        let accessor = self.entry(self.accessors, "accessors", accessor_id)?;
        let element_count = accessor.required_u64("count")?;
        let component_type = accessor.required_i64("componentType")?;
        let accessor_type = accessor.required_str("type")?;

        let view_id = match self.lookup {
            BufferViewLookup::Referenced => match accessor.field("bufferView") {
                Some(value) => value
                    .as_i64()
                    .ok_or_else(|| accessor.invalid("bufferView", "an integer", value))?,
                None => accessor_id,
            },
            BufferViewLookup::AccessorIndex => accessor_id,
        };
        let view = self.entry(self.buffer_views, "bufferViews", view_id)?;

        let descriptor = AttributeDescriptor {
            accessor_id: accessor.index,
            buffer_view: view.index,
            byte_length: view.required_u64("byteLength")?,
            byte_offset: view.optional_u64("byteOffset")?.unwrap_or(0),
            element_count,
            component_byte_size: component_byte_size(component_type),
            components_per_element: components_per_element(accessor_type),
        };

        if let Some(stride) = view.optional_u64("byteStride")? {
            let element_size = descriptor
                .element_size()
                .ok_or(SchemaError::SizeOverflow("element size"))?;
            if stride != element_size {
                return Err(SchemaError::UnsupportedStride {
                    view: view.index,
                    stride,
                    element_size,
                });
            }
        }

        tracing::debug!(
            "accessor {} -> bufferView {}: {} x {}x{} bytes, range {}+{}",
            descriptor.accessor_id,
            descriptor.buffer_view,
            descriptor.element_count,
            descriptor.components_per_element,
            descriptor.component_byte_size,
            descriptor.byte_offset,
            descriptor.byte_length
        );
        Ok(descriptor)
    }

    fn entry(
        &self,
        array: &'a JsonValue,
        name: &'static str,
        index: i64,
    ) -> Result<Entry<'a>, SchemaError> {
        let value = array
            .get_element(index)
            .ok_or(SchemaError::IndexOutOfRange { array: name, index })?;
        let index = usize::try_from(index).map_err(|_| SchemaError::IndexOutOfRange {
            array: name,
            index,
        })?;
        if value.kind() != ValueKind::Object {
            return Err(SchemaError::InvalidField {
                field: format!("{name}[{index}]"),
                expected: "an object",
                found: value.kind(),
            });
        }
        Ok(Entry {
            array: name,
            index,
            value,
            case_sensitive: self.case_sensitive,
        })
    }
}

fn top_level_array<'a>(
    root: &'a JsonValue,
    key: &str,
    case_sensitive: bool,
) -> Result<&'a JsonValue, SchemaError> {
    let value = root
        .get_member_with(key, case_sensitive)
        .ok_or_else(|| SchemaError::MissingField(key.to_string()))?;
    match value.kind() {
        ValueKind::Array => Ok(value),
        found => Err(SchemaError::InvalidField {
            field: key.to_string(),
            expected: "an array",
            found,
        }),
    }
}

/// One object of `accessors` or `bufferViews`
struct Entry<'a> {
    array: &'static str,
    index: usize,
    value: &'a JsonValue,
    case_sensitive: bool,
}

impl<'a> Entry<'a> {
    fn field(&self, key: &str) -> Option<&'a JsonValue> {
        self.value.get_member_with(key, self.case_sensitive)
    }

    fn path(&self, key: &str) -> String {
        format!("{}[{}].{}", self.array, self.index, key)
    }

    fn invalid(&self, key: &str, expected: &'static str, found: &JsonValue) -> SchemaError {
        SchemaError::InvalidField {
            field: self.path(key),
            expected,
            found: found.kind(),
        }
    }

    fn required(&self, key: &str) -> Result<&'a JsonValue, SchemaError> {
        self.field(key)
            .ok_or_else(|| SchemaError::MissingField(self.path(key)))
    }

    fn required_i64(&self, key: &str) -> Result<i64, SchemaError> {
        let value = self.required(key)?;
        value
            .as_i64()
            .ok_or_else(|| self.invalid(key, "an integer", value))
    }

    fn required_u64(&self, key: &str) -> Result<u64, SchemaError> {
        let value = self.required(key)?;
        self.non_negative(key, value)
    }

    fn optional_u64(&self, key: &str) -> Result<Option<u64>, SchemaError> {
        self.field(key)
            .map(|value| self.non_negative(key, value))
            .transpose()
    }

    fn required_str(&self, key: &str) -> Result<&'a str, SchemaError> {
        let value = self.required(key)?;
        value
            .as_str()
            .ok_or_else(|| self.invalid(key, "a string", value))
    }

    fn non_negative(&self, key: &str, value: &JsonValue) -> Result<u64, SchemaError> {
        value
            .as_i64()
            .and_then(|n| u64::try_from(n).ok())
            .ok_or_else(|| self.invalid(key, "a non-negative integer", value))
    }
}
