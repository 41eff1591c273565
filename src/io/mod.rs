//! Stream adapters and the MZ3 codec built on top of them.

pub mod adapter;
pub mod codec;

pub use codec::{
    CellComponentBuffer, MeshInfo, Mz3Reader, Mz3Writer, PointAttributeData, PointComponentBuffer,
    PointDataBuffer, ReadSession, WriteOptions, WritePixelKind, WriteSession,
};
