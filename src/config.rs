//! Crate-wide constants for the MZ3 wire format.

/// Two-byte magic at the start of an uncompressed MZ3 stream ("MZ").
pub const MZ3_MAGIC: [u8; 2] = [0x4D, 0x5A];

/// Two-byte magic at the start of a gzip stream (RFC 1952).
pub const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];

/// Size in bytes of the fixed MZ3 header (magic, attributes, n_face, n_vert, skip).
pub const HEADER_SIZE: u64 = 16;

/// Bytes per on-disk face entry: three `uint32` vertex indices.
pub const FACE_STRIDE: u64 = 12;

/// Bytes per on-disk vertex entry: three `float32` coordinates.
pub const VERTEX_STRIDE: u64 = 12;

/// Filename extension recognized by the codec, including the leading dot.
pub const MZ3_EXTENSION: &str = ".mz3";

/// Default gzip compression level used by the CLI when compression is requested.
pub const DEFAULT_COMPRESSION_LEVEL: u32 = 6;

/// Integer tag this crate's mesh stand-in uses for a triangular cell, matching the
/// host convention of `(cell_type, point_count, v0, v1, v2)` per face in cell buffers.
pub const TRIANGLE_CELL_TYPE: u32 = 3;
