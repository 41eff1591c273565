//! The MZ3 codec: header parse/emit, attribute-flag interpretation, block
//! layout arithmetic, and the four-phase read/write protocol.
//!
//! Phase ordering is enforced at compile time rather than with a runtime
//! state machine: [`Mz3Reader::read_info`] consumes the entry point and
//! returns a [`ReadSession`] that only exposes `read_points`/`read_cells`/
//! `read_point_data`/`finalize`; there is no way to call those before a
//! header has been parsed. The write side mirrors this with [`WriteSession`].

use std::path::{Path, PathBuf};

use crate::config::{FACE_STRIDE, HEADER_SIZE, MZ3_EXTENSION, TRIANGLE_CELL_TYPE, VERTEX_STRIDE};
use crate::error::{Mz3Error, Result};
use crate::format::header::{read_le32, write_le_f32};
use crate::format::{Attributes, CellComponentType, Header, PointComponentType, PointPixelType};
use crate::io::adapter::{ReadAdapter, WriteAdapter};

fn has_mz3_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(&MZ3_EXTENSION[1..]))
        .unwrap_or(false)
}

/// The shape of a mesh as reported by [`Mz3Reader::read_info`], mirroring
/// the fields the host's four-phase protocol expects to see published.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshInfo {
    pub n_vert: u32,
    pub n_face: u32,
    pub point_dimension: u32,
    pub cell_buffer_size: u64,
    pub update_points: bool,
    pub update_cells: bool,
    pub update_point_data: bool,
    pub point_pixel_type: Option<PointPixelType>,
}

/// Entry point for reading an MZ3 stream.
pub struct Mz3Reader;

impl Mz3Reader {
    /// `true` iff `path` exists, has a `.mz3` extension, and its first two
    /// bytes are the MZ3 or gzip magic. Swallows I/O failures as `false`.
    pub fn can_read(path: &Path) -> bool {
        if !has_mz3_extension(path) {
            return false;
        }
        let Ok(mut adapter) = ReadAdapter::open(path) else {
            return false;
        };
        let mut magic = [0u8; 2];
        adapter.read_exact(path, &mut magic).is_ok()
            && (magic == crate::config::MZ3_MAGIC || magic == crate::config::GZIP_MAGIC)
    }

    /// Opens `path`, auto-selecting plain vs gzip, and parses the header.
    pub fn read_info(path: &Path) -> Result<(MeshInfo, ReadSession)> {
        let mut adapter = ReadAdapter::open(path)?;
        let mut buf = [0u8; HEADER_SIZE as usize];
        adapter.read_exact(path, &mut buf)?;
        let header = Header::decode(&buf).ok_or_else(|| Mz3Error::BadMagic {
            path: path.to_path_buf(),
            found: [buf[0], buf[1]],
        })?;

        let point_pixel_type = header.attributes.point_attribute_kind();
        let info = MeshInfo {
            n_vert: header.n_vert,
            n_face: header.n_face,
            point_dimension: 3,
            cell_buffer_size: 5 * header.n_face as u64,
            update_points: header.n_vert > 0,
            update_cells: header.n_face > 0,
            update_point_data: point_pixel_type.is_some(),
            point_pixel_type,
        };
        let session = ReadSession {
            path: path.to_path_buf(),
            adapter,
            header,
        };
        Ok((info, session))
    }
}

/// An open read session past `read_info`, able to service `read_points`,
/// `read_cells`, and `read_point_data` in any order (the on-disk offset of
/// each block is computed fresh from the header each time).
pub struct ReadSession {
    path: PathBuf,
    adapter: ReadAdapter,
    header: Header,
}

impl ReadSession {
    fn seek_after_header(&mut self, skip_faces: bool, skip_verts: bool) -> Result<()> {
        self.adapter
            .seek_to(&self.path, HEADER_SIZE + self.header.skip as u64)?;
        if skip_faces && self.header.attributes.is_face() {
            let forward = FACE_STRIDE * self.header.n_face as u64;
            let target = HEADER_SIZE + self.header.skip as u64 + forward;
            self.adapter.seek_to(&self.path, target)?;
        }
        if skip_verts && self.header.attributes.is_vert() {
            let base = HEADER_SIZE
                + self.header.skip as u64
                + if skip_faces && self.header.attributes.is_face() {
                    FACE_STRIDE * self.header.n_face as u64
                } else {
                    0
                };
            self.adapter
                .seek_to(&self.path, base + VERTEX_STRIDE * self.header.n_vert as u64)?;
        }
        Ok(())
    }

    /// Reads `3 * n_vert` vertex coordinates into `out`.
    pub fn read_points(&mut self, out: &mut [f32]) -> Result<()> {
        debug_assert_eq!(out.len(), 3 * self.header.n_vert as usize);
        self.seek_after_header(true, false)?;
        let mut raw = vec![0u8; VERTEX_STRIDE as usize * self.header.n_vert as usize];
        self.adapter.read_exact(&self.path, &mut raw)?;
        for (i, v) in out.iter_mut().enumerate() {
            *v = crate::format::header::read_le_f32(&raw, i * 4);
        }
        Ok(())
    }

    /// Expands the on-disk face block into the host's cell encoding: for
    /// each face, five `u32`s `(TRIANGLE_CELL_TYPE, 3, v0, v1, v2)`. No-op
    /// if the isFACE bit is clear.
    pub fn read_cells(&mut self, out: &mut [u32]) -> Result<()> {
        if !self.header.attributes.is_face() {
            return Ok(());
        }
        debug_assert_eq!(out.len(), 5 * self.header.n_face as usize);
        self.seek_after_header(false, false)?;
        let mut raw = vec![0u8; FACE_STRIDE as usize * self.header.n_face as usize];
        self.adapter.read_exact(&self.path, &mut raw)?;
        for face in 0..self.header.n_face as usize {
            let v0 = read_le32(&raw, face * 12);
            let v1 = read_le32(&raw, face * 12 + 4);
            let v2 = read_le32(&raw, face * 12 + 8);
            let o = face * 5;
            out[o] = TRIANGLE_CELL_TYPE;
            out[o + 1] = 3;
            out[o + 2] = v0;
            out[o + 3] = v1;
            out[o + 4] = v2;
        }
        Ok(())
    }

    /// Reads the single per-vertex attribute block, if any. Mirrors the
    /// source quirk of always skipping `12 * n_vert` bytes when isVERT is
    /// set, regardless of whether a vertex block was actually written at
    /// that position (see the design notes on this crate's read protocol).
    pub fn read_point_data(&mut self) -> Result<Option<PointAttributeData>> {
        let kind = match self.header.attributes.point_attribute_kind() {
            Some(k) => k,
            None => return Ok(None),
        };
        self.seek_after_header(true, true)?;
        let n_vert = self.header.n_vert as usize;
        let data = match kind {
            PointPixelType::Rgba => {
                let mut raw = vec![0u8; 4 * n_vert];
                self.adapter.read_exact(&self.path, &mut raw)?;
                let colors = raw
                    .chunks_exact(4)
                    .map(|c| [c[0], c[1], c[2], c[3]])
                    .collect();
                PointAttributeData::Rgba(colors)
            }
            PointPixelType::ScalarF32 => {
                let mut raw = vec![0u8; 4 * n_vert];
                self.adapter.read_exact(&self.path, &mut raw)?;
                let values = (0..n_vert)
                    .map(|i| crate::format::header::read_le_f32(&raw, i * 4))
                    .collect();
                PointAttributeData::ScalarF32(values)
            }
            PointPixelType::ScalarF64 => {
                let mut raw = vec![0u8; 8 * n_vert];
                self.adapter.read_exact(&self.path, &mut raw)?;
                let values = (0..n_vert)
                    .map(|i| crate::format::header::read_le_f64(&raw, i * 8))
                    .collect();
                PointAttributeData::ScalarF64(values)
            }
        };
        Ok(Some(data))
    }

    /// Closes the adapter. Idempotent: the adapter is consumed by value, so
    /// a second call is simply unavailable at the type level.
    pub fn finalize(self) -> Result<()> {
        Ok(())
    }
}

/// A per-vertex attribute decoded by [`ReadSession::read_point_data`].
#[derive(Debug, Clone, PartialEq)]
pub enum PointAttributeData {
    Rgba(Vec<[u8; 4]>),
    ScalarF32(Vec<f32>),
    ScalarF64(Vec<f64>),
}

// ─────────────────────────────────────────────────────────────────────────
// Write side
// ─────────────────────────────────────────────────────────────────────────

/// Caller-supplied vertex coordinate buffer, tagged by component width. The
/// on-disk representation is always `float32`; wider components are
/// converted element-wise.
pub enum PointComponentBuffer<'a> {
    F32(&'a [f32]),
    F64(&'a [f64]),
}

impl PointComponentBuffer<'_> {
    /// The declared component width, used for the write-side diagnostic log.
    fn component_type(&self) -> PointComponentType {
        match self {
            PointComponentBuffer::F32(_) => PointComponentType::Float32,
            PointComponentBuffer::F64(_) => PointComponentType::Float64,
        }
    }
}

/// Caller-supplied cell buffer: for each face, a 5-tuple `(cell_tag,
/// point_count, v0, v1, v2)` of the declared integer width. Covers every
/// integer width in the host's accepted set (`SPEC_FULL.md` §6).
pub enum CellComponentBuffer<'a> {
    I8(&'a [i8]),
    U8(&'a [u8]),
    I16(&'a [i16]),
    U16(&'a [u16]),
    U32(&'a [u32]),
    I32(&'a [i32]),
    U64(&'a [u64]),
    I64(&'a [i64]),
}

/// Caller-supplied per-vertex attribute buffer.
pub enum PointDataBuffer<'a> {
    Rgba(&'a [[u8; 4]]),
    ScalarF32(&'a [f32]),
    ScalarF64(&'a [f64]),
    ScalarI8(&'a [i8]),
    ScalarU8(&'a [u8]),
    ScalarI16(&'a [i16]),
    ScalarU16(&'a [u16]),
}

impl CellComponentBuffer<'_> {
    fn len(&self) -> usize {
        match self {
            CellComponentBuffer::I8(b) => b.len(),
            CellComponentBuffer::U8(b) => b.len(),
            CellComponentBuffer::I16(b) => b.len(),
            CellComponentBuffer::U16(b) => b.len(),
            CellComponentBuffer::U32(b) => b.len(),
            CellComponentBuffer::I32(b) => b.len(),
            CellComponentBuffer::U64(b) => b.len(),
            CellComponentBuffer::I64(b) => b.len(),
        }
    }

    /// The declared integer width, used for the write-side diagnostic log.
    fn component_type(&self) -> CellComponentType {
        match self {
            CellComponentBuffer::I8(_) => CellComponentType::I8,
            CellComponentBuffer::U8(_) => CellComponentType::U8,
            CellComponentBuffer::I16(_) => CellComponentType::I16,
            CellComponentBuffer::U16(_) => CellComponentType::U16,
            CellComponentBuffer::U32(_) => CellComponentType::U32,
            CellComponentBuffer::I32(_) => CellComponentType::I32,
            CellComponentBuffer::U64(_) => CellComponentType::U64,
            CellComponentBuffer::I64(_) => CellComponentType::I64,
        }
    }

    fn face(&self, i: usize) -> (u32, u32, u32, u32, u32) {
        macro_rules! row {
            ($b:expr) => {{
                let o = i * 5;
                (
                    $b[o] as u32,
                    $b[o + 1] as u32,
                    $b[o + 2] as u32,
                    $b[o + 3] as u32,
                    $b[o + 4] as u32,
                )
            }};
        }
        match self {
            CellComponentBuffer::I8(b) => row!(b),
            CellComponentBuffer::U8(b) => row!(b),
            CellComponentBuffer::I16(b) => row!(b),
            CellComponentBuffer::U16(b) => row!(b),
            CellComponentBuffer::U32(b) => row!(b),
            CellComponentBuffer::I32(b) => row!(b),
            CellComponentBuffer::U64(b) => row!(b),
            CellComponentBuffer::I64(b) => row!(b),
        }
    }
}

/// Declares the point-pixel kind and component type the writer should
/// target for this session; drives the attribute bitmask computed by
/// `write_info`.
#[derive(Debug, Clone, Copy)]
pub enum WritePixelKind {
    Rgba,
    ScalarF32,
    ScalarF64,
    ScalarInt(crate::format::types::ScalarIntegerType),
    None,
}

pub struct WriteOptions {
    pub use_compression: bool,
    pub pixel_kind: WritePixelKind,
}

/// Entry point for writing an MZ3 stream.
pub struct Mz3Writer;

impl Mz3Writer {
    /// `true` iff `path`'s extension is `.mz3` (case-insensitive). No I/O.
    pub fn can_write(path: &Path) -> bool {
        has_mz3_extension(path)
    }

    /// Opens `path` for writing, computes the attribute bitmask from
    /// `opts.pixel_kind`, and emits the 16-byte header.
    pub fn write_info(
        path: &Path,
        n_vert: u32,
        n_face: u32,
        opts: WriteOptions,
    ) -> Result<WriteSession> {
        let mut attributes = Attributes::NONE;
        attributes.set_face(true);
        attributes.set_vert(true);
        match opts.pixel_kind {
            WritePixelKind::ScalarF32 => attributes.set_scalar(true),
            WritePixelKind::ScalarF64 => attributes.set_double(true),
            WritePixelKind::Rgba => attributes.set_rgba(true),
            WritePixelKind::ScalarInt(_) => attributes.set_scalar(true),
            WritePixelKind::None => {}
        }

        let header = Header {
            attributes,
            n_face,
            n_vert,
            skip: 0,
        };

        let mut adapter = WriteAdapter::create(path, opts.use_compression)?;
        adapter.write_all(path, &header.encode())?;

        let deferred_vertices = if opts.use_compression {
            Some(Vec::with_capacity(3 * n_vert as usize))
        } else {
            None
        };

        Ok(WriteSession {
            path: path.to_path_buf(),
            adapter: Some(adapter),
            header,
            deferred_vertices,
        })
    }
}

/// An open write session past `write_info`.
pub struct WriteSession {
    path: PathBuf,
    adapter: Option<WriteAdapter>,
    header: Header,
    /// Compressed-mode only: vertex coordinates buffered until `write_cells`
    /// emits them, since the gzip adapter cannot seek backward.
    deferred_vertices: Option<Vec<f32>>,
}

impl WriteSession {
    fn is_gzip(&self) -> bool {
        self.deferred_vertices.is_some()
    }

    fn adapter_mut(&mut self) -> &mut WriteAdapter {
        self.adapter.as_mut().expect("write session adapter taken")
    }

    /// Writes `3 * n_vert` vertex coordinates. In gzip mode these are
    /// buffered and emitted by `write_cells`; in plain mode they are seeked
    /// past the (not-yet-written) face block and written immediately.
    pub fn write_points(&mut self, buf: PointComponentBuffer) -> Result<()> {
        let n_vert = self.header.n_vert as usize;
        crate::log_at!(
            4,
            "{}: writing {} vertices as {:?}\n",
            self.path.display(),
            n_vert,
            buf.component_type()
        );
        let as_f32: Vec<f32> = match buf {
            PointComponentBuffer::F32(v) => {
                debug_assert_eq!(v.len(), 3 * n_vert);
                v.to_vec()
            }
            PointComponentBuffer::F64(v) => {
                debug_assert_eq!(v.len(), 3 * n_vert);
                v.iter().map(|&x| x as f32).collect()
            }
        };

        if let Some(deferred) = self.deferred_vertices.as_mut() {
            *deferred = as_f32;
        } else {
            let path = self.path.clone();
            let face_bytes = if self.header.attributes.is_face() {
                FACE_STRIDE * self.header.n_face as u64
            } else {
                0
            };
            let offset = HEADER_SIZE + self.header.skip as u64 + face_bytes;
            self.adapter_mut().seek_to(&path, offset)?;
            let mut raw = vec![0u8; 4 * as_f32.len()];
            for (i, v) in as_f32.iter().enumerate() {
                write_le_f32(&mut raw, i * 4, *v);
            }
            self.adapter_mut().write_all(&path, &raw)?;
        }
        Ok(())
    }

    /// Writes the face block. Fails with `NonTriangleCell` if any face
    /// declares a point count other than 3.
    pub fn write_cells(&mut self, buf: CellComponentBuffer) -> Result<()> {
        let n_face = self.header.n_face as usize;
        debug_assert_eq!(buf.len(), 5 * n_face);
        crate::log_at!(
            4,
            "{}: writing {} faces as {:?}\n",
            self.path.display(),
            n_face,
            buf.component_type()
        );

        let mut raw = vec![0u8; FACE_STRIDE as usize * n_face];
        for i in 0..n_face {
            let (_tag, point_count, v0, v1, v2) = buf.face(i);
            if point_count != 3 {
                return Err(Mz3Error::NonTriangleCell { point_count });
            }
            crate::format::header::write_le32(&mut raw, i * 12, v0);
            crate::format::header::write_le32(&mut raw, i * 12 + 4, v1);
            crate::format::header::write_le32(&mut raw, i * 12 + 8, v2);
        }

        let path = self.path.clone();
        if self.is_gzip() {
            self.adapter_mut().write_all(&path, &raw)?;
            let vertices = self.deferred_vertices.take().unwrap_or_default();
            let mut vraw = vec![0u8; 4 * vertices.len()];
            for (i, v) in vertices.iter().enumerate() {
                write_le_f32(&mut vraw, i * 4, *v);
            }
            self.adapter_mut().write_all(&path, &vraw)?;
        } else {
            let offset = HEADER_SIZE + self.header.skip as u64;
            self.adapter_mut().seek_to(&path, offset)?;
            self.adapter_mut().write_all(&path, &raw)?;
        }
        Ok(())
    }

    /// Writes the single per-vertex attribute block declared at
    /// `write_info` time, converting integer scalar buffers to `float32`.
    pub fn write_point_data(&mut self, buf: PointDataBuffer, update: bool) -> Result<()> {
        if !update {
            return Ok(());
        }
        let n_vert = self.header.n_vert as usize;
        let raw: Vec<u8> = match buf {
            PointDataBuffer::Rgba(colors) => {
                debug_assert_eq!(colors.len(), n_vert);
                colors.iter().flat_map(|c| c.iter().copied()).collect()
            }
            PointDataBuffer::ScalarF32(v) => {
                debug_assert_eq!(v.len(), n_vert);
                let mut raw = vec![0u8; 4 * n_vert];
                for (i, x) in v.iter().enumerate() {
                    write_le_f32(&mut raw, i * 4, *x);
                }
                raw
            }
            PointDataBuffer::ScalarF64(v) => {
                debug_assert_eq!(v.len(), n_vert);
                let mut raw = vec![0u8; 8 * n_vert];
                for (i, x) in v.iter().enumerate() {
                    crate::format::header::write_le_f64(&mut raw, i * 8, *x);
                }
                raw
            }
            PointDataBuffer::ScalarI8(v) => scalar_int_to_f32_bytes(v, |x| x as f32),
            PointDataBuffer::ScalarU8(v) => scalar_int_to_f32_bytes(v, |x| x as f32),
            PointDataBuffer::ScalarI16(v) => scalar_int_to_f32_bytes(v, |x| x as f32),
            PointDataBuffer::ScalarU16(v) => scalar_int_to_f32_bytes(v, |x| x as f32),
        };

        let path = self.path.clone();
        if !self.is_gzip() {
            let mut offset = HEADER_SIZE + self.header.skip as u64;
            if self.header.attributes.is_face() {
                offset += FACE_STRIDE * self.header.n_face as u64;
            }
            if self.header.attributes.is_vert() {
                offset += VERTEX_STRIDE * self.header.n_vert as u64;
            }
            self.adapter_mut().seek_to(&path, offset)?;
        }
        self.adapter_mut().write_all(&path, &raw)
    }

    /// Flushes and closes the adapter (finishing the gzip trailer if any).
    pub fn finalize(mut self) -> Result<()> {
        let path = self.path.clone();
        if let Some(adapter) = self.adapter.take() {
            adapter.finish(&path)?;
        }
        Ok(())
    }
}

fn scalar_int_to_f32_bytes<T: Copy>(v: &[T], to_f32: impl Fn(T) -> f32) -> Vec<u8> {
    let mut raw = vec![0u8; 4 * v.len()];
    for (i, x) in v.iter().enumerate() {
        write_le_f32(&mut raw, i * 4, to_f32(*x));
    }
    raw
}

impl Drop for WriteSession {
    fn drop(&mut self) {
        if let Some(adapter) = self.adapter.take() {
            let _ = adapter.finish(&self.path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::adapter::is_gzip_file;

    fn minimal_mesh_path(dir: &std::path::Path) -> PathBuf {
        dir.join("mesh.mz3")
    }

    #[test]
    fn plain_roundtrip_minimal_mesh() {
        let dir = tempfile::tempdir().unwrap();
        let path = minimal_mesh_path(dir.path());

        let mut session = Mz3Writer::write_info(
            &path,
            3,
            1,
            WriteOptions {
                use_compression: false,
                pixel_kind: WritePixelKind::None,
            },
        )
        .unwrap();
        session
            .write_points(PointComponentBuffer::F32(&[
                0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0,
            ]))
            .unwrap();
        session
            .write_cells(CellComponentBuffer::U32(&[TRIANGLE_CELL_TYPE, 3, 0, 1, 2]))
            .unwrap();
        session.finalize().unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(bytes.len(), 64);
        assert_eq!(&bytes[0..4], &[0x4D, 0x5A, 0x03, 0x00]);

        let (info, mut read) = Mz3Reader::read_info(&path).unwrap();
        assert_eq!(info.n_vert, 3);
        assert_eq!(info.n_face, 1);
        let mut pts = [0f32; 9];
        read.read_points(&mut pts).unwrap();
        assert_eq!(pts, [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
        let mut cells = [0u32; 5];
        read.read_cells(&mut cells).unwrap();
        assert_eq!(cells, [TRIANGLE_CELL_TYPE, 3, 0, 1, 2]);
        assert!(read.read_point_data().unwrap().is_none());
        read.finalize().unwrap();
    }

    #[test]
    fn gzip_roundtrip_matches_plain_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let plain_path = dir.path().join("plain.mz3");
        let gz_path = dir.path().join("gz.mz3");

        for (path, compress) in [(&plain_path, false), (&gz_path, true)] {
            let mut session = Mz3Writer::write_info(
                path,
                3,
                1,
                WriteOptions {
                    use_compression: compress,
                    pixel_kind: WritePixelKind::None,
                },
            )
            .unwrap();
            session
                .write_points(PointComponentBuffer::F32(&[
                    0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0,
                ]))
                .unwrap();
            session
                .write_cells(CellComponentBuffer::U32(&[TRIANGLE_CELL_TYPE, 3, 0, 1, 2]))
                .unwrap();
            session.finalize().unwrap();
        }

        assert!(is_gzip_file(&gz_path).unwrap());
        let mut decoder = flate2::read::GzDecoder::new(std::fs::File::open(&gz_path).unwrap());
        let mut decoded = Vec::new();
        std::io::Read::read_to_end(&mut decoder, &mut decoded).unwrap();
        let plain_bytes = std::fs::read(&plain_path).unwrap();
        assert_eq!(decoded, plain_bytes);
    }

    #[test]
    fn write_cells_rejects_nontriangle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quad.mz3");
        let mut session = Mz3Writer::write_info(
            &path,
            4,
            1,
            WriteOptions {
                use_compression: false,
                pixel_kind: WritePixelKind::None,
            },
        )
        .unwrap();
        let err = session
            .write_cells(CellComponentBuffer::U32(&[TRIANGLE_CELL_TYPE, 4, 0, 1, 2]))
            .unwrap_err();
        assert!(matches!(err, Mz3Error::NonTriangleCell { point_count: 4 }));
    }

    #[test]
    fn scalar_f32_point_data_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scalar.mz3");
        let mut session = Mz3Writer::write_info(
            &path,
            3,
            1,
            WriteOptions {
                use_compression: false,
                pixel_kind: WritePixelKind::ScalarF32,
            },
        )
        .unwrap();
        session
            .write_points(PointComponentBuffer::F32(&[0.0; 9]))
            .unwrap();
        session
            .write_cells(CellComponentBuffer::U32(&[TRIANGLE_CELL_TYPE, 3, 0, 1, 2]))
            .unwrap();
        session
            .write_point_data(PointDataBuffer::ScalarF32(&[1.0, 2.0, 3.0]), true)
            .unwrap();
        session.finalize().unwrap();

        let (info, mut read) = Mz3Reader::read_info(&path).unwrap();
        assert_eq!(info.point_pixel_type, Some(PointPixelType::ScalarF32));
        let data = read.read_point_data().unwrap().unwrap();
        assert_eq!(data, PointAttributeData::ScalarF32(vec![1.0, 2.0, 3.0]));
    }

    #[test]
    fn integer_scalar_point_data_promotes_to_float32() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scalar_int.mz3");
        let mut session = Mz3Writer::write_info(
            &path,
            3,
            1,
            WriteOptions {
                use_compression: false,
                pixel_kind: WritePixelKind::ScalarInt(crate::format::types::ScalarIntegerType::U8),
            },
        )
        .unwrap();
        session
            .write_points(PointComponentBuffer::F32(&[0.0; 9]))
            .unwrap();
        session
            .write_cells(CellComponentBuffer::U32(&[TRIANGLE_CELL_TYPE, 3, 0, 1, 2]))
            .unwrap();
        session
            .write_point_data(PointDataBuffer::ScalarU8(&[10, 20, 30]), true)
            .unwrap();
        session.finalize().unwrap();

        let (info, mut read) = Mz3Reader::read_info(&path).unwrap();
        assert_eq!(info.point_pixel_type, Some(PointPixelType::ScalarF32));
        let data = read.read_point_data().unwrap().unwrap();
        assert_eq!(data, PointAttributeData::ScalarF32(vec![10.0, 20.0, 30.0]));
    }

    #[test]
    fn cell_component_buffer_accepts_every_integer_width() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("narrow_cells.mz3");
        let mut session = Mz3Writer::write_info(
            &path,
            3,
            1,
            WriteOptions {
                use_compression: false,
                pixel_kind: WritePixelKind::None,
            },
        )
        .unwrap();
        session
            .write_points(PointComponentBuffer::F32(&[0.0; 9]))
            .unwrap();
        session
            .write_cells(CellComponentBuffer::U8(&[3, 3, 0, 1, 2]))
            .unwrap();
        session.finalize().unwrap();

        let (_, mut read) = Mz3Reader::read_info(&path).unwrap();
        let mut cells = [0u32; 5];
        read.read_cells(&mut cells).unwrap();
        assert_eq!(cells, [TRIANGLE_CELL_TYPE, 3, 0, 1, 2]);
    }

    #[test]
    fn can_read_rejects_bad_magic_and_wrong_extension() {
        let dir = tempfile::tempdir().unwrap();
        let bad_magic = dir.path().join("x.mz3");
        std::fs::write(&bad_magic, [0x00, 0x01, 0, 0]).unwrap();
        assert!(!Mz3Reader::can_read(&bad_magic));

        let wrong_ext = dir.path().join("x.nmz3");
        std::fs::write(&wrong_ext, crate::config::MZ3_MAGIC).unwrap();
        assert!(!Mz3Reader::can_read(&wrong_ext));
        assert!(!Mz3Writer::can_write(&wrong_ext));
    }
}
