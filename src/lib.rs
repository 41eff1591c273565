//! `mz3r` — a reader and writer for the MZ3 binary triangle-mesh format.
//!
//! MZ3 is a compact little-endian format, optionally gzip-wrapped, storing a
//! 16-byte header followed by an optional face block, an optional vertex
//! block, and at most one optional per-vertex attribute block (RGBA color,
//! `float32` scalar, or `float64` scalar). See `SPEC_FULL.md` for the full
//! format and crate design.
//!
//! The codec itself ([`io::codec`]) is the core of this crate. [`mesh`] and
//! [`registry`] are a thin, crate-local stand-in for the generic mesh-I/O
//! host the codec was designed to sit behind — enough to read and write a
//! [`mesh::TriangleMesh`] end-to-end from the CLI and the test suite.

pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod io;
pub mod log;
pub mod mesh;
pub mod registry;

pub use error::{Mz3Error, Result};
pub use mesh::{PointAttribute, TriangleMesh};
