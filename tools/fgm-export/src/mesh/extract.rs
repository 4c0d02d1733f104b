//! Copy one attribute's bytes out of the BIN chunk

use crate::error::SchemaError;

use super::types::AttributeDescriptor;

/// Copy the bufferView range of `descriptor` out of `bin`, element by element
///
/// The result is exactly `byte_length` bytes. Elements come first in their
/// original component order; any bytes of the view past the last element
/// follow unchanged.
pub fn extract_attribute(
    descriptor: &AttributeDescriptor,
    bin: &[u8],
) -> Result<Vec<u8>, SchemaError> {
    let overrun = SchemaError::BufferOverrun {
        offset: descriptor.byte_offset,
        length: descriptor.byte_length,
        available: bin.len() as u64,
    };
    let end = descriptor
        .byte_offset
        .checked_add(descriptor.byte_length)
        .ok_or_else(|| overrun.clone())?;
    if end > bin.len() as u64 {
        return Err(overrun);
    }
    // Both bounds are <= bin.len(), so they fit in usize.
    let source = &bin[descriptor.byte_offset as usize..end as usize];

    let element_size = descriptor
        .element_size()
        .ok_or(SchemaError::SizeOverflow("element size"))?;
    let packed = descriptor
        .packed_len()
        .ok_or(SchemaError::SizeOverflow("accessor elements"))?;
    if packed > descriptor.byte_length {
        return Err(SchemaError::ElementsExceedView {
            accessor: descriptor.accessor_id,
            required: packed,
            byte_length: descriptor.byte_length,
        });
    }
    let packed = packed as usize;
    let element_size = element_size as usize;
    let component_size = descriptor.component_byte_size as usize;

    let mut out = vec![0u8; source.len()];
    let (elements_out, tail_out) = out.split_at_mut(packed);
    let (elements_in, tail_in) = source.split_at(packed);

    for (dst, src) in elements_out
        .chunks_exact_mut(element_size)
        .zip(elements_in.chunks_exact(element_size))
    {
        for (dst, src) in dst
            .chunks_exact_mut(component_size)
            .zip(src.chunks_exact(component_size))
        {
            dst.copy_from_slice(src);
        }
    }
    tail_out.copy_from_slice(tail_in);

    Ok(out)
}
