//! On-disk layout of the MZ3 format: header bytes, attribute bitmask, and
//! the small set of component/pixel types the codec understands.

pub mod header;
pub mod types;

pub use header::Header;
pub use types::{Attributes, CellComponentType, PointComponentType, PointPixelType};
