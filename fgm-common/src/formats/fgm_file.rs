//! FGM file (.fgm)
//!
//! # Layout
//! ```text
//! 0x00: size table (mesh_count × 32 bytes, see `MeshSizes`)
//! var:  payload, per mesh: positions | normals | texcoords | indices
//! ```

use anyhow::{Context, Result, bail, ensure};
use std::io::Write;

use super::MeshSizes;

/// Write a complete FGM file
///
/// The payload must hold exactly the bytes described by `sizes`.
pub fn write_fgm<W: Write>(w: &mut W, sizes: &[MeshSizes], payload: &[u8]) -> Result<()> {
    let expected = payload_len(sizes)?;
    ensure!(
        expected == payload.len() as u64,
        "Size table describes {} payload bytes, buffer holds {}",
        expected,
        payload.len()
    );

    for record in sizes {
        w.write_all(&record.to_bytes())?;
    }
    w.write_all(payload)?;
    Ok(())
}

/// Parsed FGM file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FgmFile {
    pub sizes: Vec<MeshSizes>,
    pub payload: Vec<u8>,
}

impl FgmFile {
    /// Parse an FGM file holding `mesh_count` meshes
    pub fn parse(bytes: &[u8], mesh_count: usize) -> Result<Self> {
        let table_len = mesh_count
            .checked_mul(MeshSizes::SIZE)
            .context("Size table length overflows")?;
        ensure!(
            bytes.len() >= table_len,
            "File is {} bytes, size table for {} meshes needs {}",
            bytes.len(),
            mesh_count,
            table_len
        );

        let sizes: Vec<MeshSizes> = bytes[..table_len]
            .chunks_exact(MeshSizes::SIZE)
            .filter_map(MeshSizes::from_bytes)
            .collect();

        let payload = &bytes[table_len..];
        let expected = payload_len(&sizes)?;
        if expected != payload.len() as u64 {
            bail!(
                "Payload is {} bytes, size table describes {}",
                payload.len(),
                expected
            );
        }

        Ok(Self {
            sizes,
            payload: payload.to_vec(),
        })
    }

    pub fn mesh_count(&self) -> usize {
        self.sizes.len()
    }

    /// The four regions of mesh `index`: positions, normals, texcoords, indices
    pub fn mesh(&self, index: usize) -> Option<[&[u8]; 4]> {
        mesh_regions(&self.sizes, &self.payload, index)
    }
}

/// Slice the four regions of mesh `index` out of a flattened payload
pub fn mesh_regions<'a>(
    sizes: &[MeshSizes],
    payload: &'a [u8],
    index: usize,
) -> Option<[&'a [u8]; 4]> {
    let start = sizes
        .get(..index)?
        .iter()
        .try_fold(0u64, |acc, record| acc.checked_add(record.total()?))?;
    let mut cursor = usize::try_from(start).ok()?;
    let regions = sizes.get(index)?.regions();

    let mut out: [&[u8]; 4] = [&[]; 4];
    for (slot, len) in out.iter_mut().zip(regions) {
        let end = cursor.checked_add(usize::try_from(len).ok()?)?;
        *slot = payload.get(cursor..end)?;
        cursor = end;
    }
    Some(out)
}

fn payload_len(sizes: &[MeshSizes]) -> Result<u64> {
    sizes.iter().try_fold(0u64, |acc, record| {
        record
            .total()
            .and_then(|total| acc.checked_add(total))
            .context("Size table total overflows")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_meshes() -> (Vec<MeshSizes>, Vec<u8>) {
        let sizes = vec![MeshSizes::new(2, 2, 1, 1), MeshSizes::new(1, 1, 1, 3)];
        let payload: Vec<u8> = (0u8..12).collect();
        (sizes, payload)
    }

    #[test]
    fn test_write_layout() {
        let (sizes, payload) = two_meshes();
        let mut out = Vec::new();
        write_fgm(&mut out, &sizes, &payload).unwrap();

        assert_eq!(out.len(), 2 * MeshSizes::SIZE + payload.len());
        assert_eq!(&out[..MeshSizes::SIZE], &sizes[0].to_bytes());
        assert_eq!(&out[MeshSizes::SIZE..2 * MeshSizes::SIZE], &sizes[1].to_bytes());
        assert_eq!(&out[2 * MeshSizes::SIZE..], payload.as_slice());
    }

    #[test]
    fn test_write_rejects_mismatched_payload() {
        let (sizes, mut payload) = two_meshes();
        payload.pop();
        let mut out = Vec::new();
        assert!(write_fgm(&mut out, &sizes, &payload).is_err());
        assert!(out.is_empty(), "nothing should be written on error");
    }

    #[test]
    fn test_parse_and_split_meshes() {
        let (sizes, payload) = two_meshes();
        let mut out = Vec::new();
        write_fgm(&mut out, &sizes, &payload).unwrap();

        let file = FgmFile::parse(&out, 2).unwrap();
        assert_eq!(file.mesh_count(), 2);
        assert_eq!(file.sizes, sizes);

        let [pos, nrm, uv, idx] = file.mesh(1).unwrap();
        assert_eq!(pos, &[6u8]);
        assert_eq!(nrm, &[7u8]);
        assert_eq!(uv, &[8u8]);
        assert_eq!(idx, &[9u8, 10, 11]);
        assert!(file.mesh(2).is_none());
    }

    #[test]
    fn test_mesh_regions_overflowing_sizes() {
        let payload = [0u8; 4];
        let sizes = [MeshSizes::new(u64::MAX, 1, 0, 0), MeshSizes::new(1, 1, 1, 1)];
        assert!(mesh_regions(&sizes, &payload, 1).is_none());

        let sizes = [
            MeshSizes::new(u64::MAX / 2 + 1, 0, 0, 0),
            MeshSizes::new(u64::MAX / 2 + 1, 0, 0, 0),
            MeshSizes::new(1, 1, 1, 1),
        ];
        assert!(mesh_regions(&sizes, &payload, 2).is_none());

        let sizes = [MeshSizes::new(1, 1, 1, 1)];
        let [pos, _, _, idx] = mesh_regions(&sizes, &[1, 2, 3, 4], 0).unwrap();
        assert_eq!(pos, &[1u8]);
        assert_eq!(idx, &[4u8]);
    }

    #[test]
    fn test_parse_wrong_mesh_count() {
        let (sizes, payload) = two_meshes();
        let mut out = Vec::new();
        write_fgm(&mut out, &sizes, &payload).unwrap();

        assert!(FgmFile::parse(&out, 1).is_err());
        assert!(FgmFile::parse(&out[..40], 2).is_err());
    }
}
