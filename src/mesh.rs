//! A minimal in-memory triangle mesh, standing in for the generic mesh-I/O
//! host framework the MZ3 codec was designed to sit behind (see `SPEC_FULL.md`
//! §3.5, §4.3). It has no topology validation, no normals, no cell data
//! beyond triangles, and exists only to drive the codec end-to-end from the
//! CLI and the test suite.

use std::path::Path;

use crate::config::TRIANGLE_CELL_TYPE;
use crate::error::Result;
use crate::format::types::ScalarIntegerType;
use crate::io::codec::{
    CellComponentBuffer, Mz3Reader, Mz3Writer, PointAttributeData, PointComponentBuffer,
    PointDataBuffer, WriteOptions, WritePixelKind,
};
use crate::log_at;

/// A per-vertex attribute a [`TriangleMesh`] may carry. At most one kind is
/// present at a time, mirroring the format's mutually-exclusive attribute
/// bits. The integer scalar variants exist only on the write side: the
/// on-disk scalar attribute is always `float32`/`float64`, so
/// [`TriangleMesh::read_mz3`] never produces them back — writing one
/// promotes its values to `float32`, matching the original format's integer
/// scalar promotion rule.
#[derive(Debug, Clone, PartialEq)]
pub enum PointAttribute {
    Rgba(Vec<[u8; 4]>),
    ScalarF32(Vec<f32>),
    ScalarF64(Vec<f64>),
    ScalarI8(Vec<i8>),
    ScalarU8(Vec<u8>),
    ScalarI16(Vec<i16>),
    ScalarU16(Vec<u16>),
}

/// The crate's minimal in-memory mesh representation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    pub vertices: Vec<[f32; 3]>,
    pub faces: Vec<[u32; 3]>,
    pub point_attribute: Option<PointAttribute>,
}

impl TriangleMesh {
    /// Reads an MZ3 file (plain or gzip, auto-detected) into a fresh mesh,
    /// driving the codec's four-phase read protocol: info, points, cells,
    /// point-data.
    pub fn read_mz3(path: &Path) -> Result<TriangleMesh> {
        let (info, mut session) = Mz3Reader::read_info(path)?;
        log_at!(
            3,
            "{}: {} vertices, {} faces\n",
            path.display(),
            info.n_vert,
            info.n_face
        );

        let mut vertices = Vec::new();
        if info.update_points {
            let mut flat = vec![0f32; 3 * info.n_vert as usize];
            session.read_points(&mut flat)?;
            vertices = flat.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect();
        }

        let mut faces = Vec::new();
        if info.update_cells {
            let mut cells = vec![0u32; info.cell_buffer_size as usize];
            session.read_cells(&mut cells)?;
            faces = cells.chunks_exact(5).map(|c| [c[2], c[3], c[4]]).collect();
        }

        let point_attribute = if info.update_point_data {
            session.read_point_data()?.map(|data| match data {
                PointAttributeData::Rgba(v) => PointAttribute::Rgba(v),
                PointAttributeData::ScalarF32(v) => PointAttribute::ScalarF32(v),
                PointAttributeData::ScalarF64(v) => PointAttribute::ScalarF64(v),
            })
        } else {
            None
        };

        session.finalize()?;
        Ok(TriangleMesh {
            vertices,
            faces,
            point_attribute,
        })
    }

    /// Writes this mesh out as an MZ3 file, gzip-wrapped when
    /// `use_compression`, driving the codec's four-phase write protocol.
    pub fn write_mz3(&self, path: &Path, use_compression: bool) -> Result<()> {
        let pixel_kind = match &self.point_attribute {
            Some(PointAttribute::Rgba(_)) => WritePixelKind::Rgba,
            Some(PointAttribute::ScalarF32(_)) => WritePixelKind::ScalarF32,
            Some(PointAttribute::ScalarF64(_)) => WritePixelKind::ScalarF64,
            Some(PointAttribute::ScalarI8(_)) => WritePixelKind::ScalarInt(ScalarIntegerType::I8),
            Some(PointAttribute::ScalarU8(_)) => WritePixelKind::ScalarInt(ScalarIntegerType::U8),
            Some(PointAttribute::ScalarI16(_)) => WritePixelKind::ScalarInt(ScalarIntegerType::I16),
            Some(PointAttribute::ScalarU16(_)) => WritePixelKind::ScalarInt(ScalarIntegerType::U16),
            None => WritePixelKind::None,
        };

        let mut session = Mz3Writer::write_info(
            path,
            self.vertices.len() as u32,
            self.faces.len() as u32,
            WriteOptions {
                use_compression,
                pixel_kind,
            },
        )?;

        let flat_vertices: Vec<f32> = self
            .vertices
            .iter()
            .flat_map(|v| v.iter().copied())
            .collect();
        session.write_points(PointComponentBuffer::F32(&flat_vertices))?;

        let cell_buffer: Vec<u32> = self
            .faces
            .iter()
            .flat_map(|f| [TRIANGLE_CELL_TYPE, 3, f[0], f[1], f[2]])
            .collect();
        session.write_cells(CellComponentBuffer::U32(&cell_buffer))?;

        match &self.point_attribute {
            Some(PointAttribute::Rgba(colors)) => {
                session.write_point_data(PointDataBuffer::Rgba(colors), true)?;
            }
            Some(PointAttribute::ScalarF32(values)) => {
                session.write_point_data(PointDataBuffer::ScalarF32(values), true)?;
            }
            Some(PointAttribute::ScalarF64(values)) => {
                session.write_point_data(PointDataBuffer::ScalarF64(values), true)?;
            }
            Some(PointAttribute::ScalarI8(values)) => {
                session.write_point_data(PointDataBuffer::ScalarI8(values), true)?;
            }
            Some(PointAttribute::ScalarU8(values)) => {
                session.write_point_data(PointDataBuffer::ScalarU8(values), true)?;
            }
            Some(PointAttribute::ScalarI16(values)) => {
                session.write_point_data(PointDataBuffer::ScalarI16(values), true)?;
            }
            Some(PointAttribute::ScalarU16(values)) => {
                session.write_point_data(PointDataBuffer::ScalarU16(values), true)?;
            }
            None => {}
        }

        session.finalize()?;
        log_at!(
            3,
            "{}: wrote {} vertices, {} faces\n",
            path.display(),
            self.vertices.len(),
            self.faces.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_mesh() -> TriangleMesh {
        TriangleMesh {
            vertices: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            faces: vec![[0, 1, 2]],
            point_attribute: None,
        }
    }

    #[test]
    fn plain_roundtrip_identity() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mesh.mz3");
        let mesh = minimal_mesh();
        mesh.write_mz3(&path, false).unwrap();
        let decoded = TriangleMesh::read_mz3(&path).unwrap();
        assert_eq!(mesh, decoded);
    }

    #[test]
    fn gzip_roundtrip_identity() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mesh.mz3");
        let mesh = minimal_mesh();
        mesh.write_mz3(&path, true).unwrap();
        assert!(crate::io::adapter::is_gzip_file(&path).unwrap());
        let decoded = TriangleMesh::read_mz3(&path).unwrap();
        assert_eq!(mesh, decoded);
    }

    #[test]
    fn integer_scalar_attribute_promotes_to_float32_on_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("int_scalar.mz3");
        let mut mesh = minimal_mesh();
        mesh.point_attribute = Some(PointAttribute::ScalarU8(vec![10, 20, 30]));
        mesh.write_mz3(&path, false).unwrap();

        let decoded = TriangleMesh::read_mz3(&path).unwrap();
        assert_eq!(
            decoded.point_attribute,
            Some(PointAttribute::ScalarF32(vec![10.0, 20.0, 30.0]))
        );
    }

    #[test]
    fn rgba_attribute_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rgba.mz3");
        let mut mesh = minimal_mesh();
        mesh.point_attribute = Some(PointAttribute::Rgba(vec![
            [255, 0, 0, 255],
            [0, 255, 0, 255],
            [0, 0, 255, 255],
        ]));
        mesh.write_mz3(&path, false).unwrap();
        let decoded = TriangleMesh::read_mz3(&path).unwrap();
        assert_eq!(mesh, decoded);

        let (info, _) = Mz3Reader::read_info(&path).unwrap();
        assert_eq!(
            info.point_pixel_type,
            Some(crate::format::PointPixelType::Rgba)
        );
    }

    #[test]
    fn scenario_a_exact_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.mz3");
        minimal_mesh().write_mz3(&path, false).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        let mut expected = vec![
            0x4D, 0x5A, 0x03, 0x00, 0x01, 0x00, 0x00, 0x00, 0x03, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00,
        ];
        expected.extend_from_slice(&[
            0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00,
        ]);
        expected.extend_from_slice(&[
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        ]);
        expected.extend_from_slice(&[
            0x00, 0x00, 0x80, 0x3F, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        ]);
        expected.extend_from_slice(&[
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x80, 0x3F, 0x00, 0x00, 0x00, 0x00,
        ]);
        assert_eq!(bytes, expected);
        assert_eq!(bytes.len(), 64);
    }
}
