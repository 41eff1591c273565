//! Error taxonomy for the MZ3 codec.
//!
//! Every failure mode the codec can raise is represented as a variant of
//! [`Mz3Error`]. There are no retries anywhere in this crate: any I/O or
//! format error aborts the current read or write sequence and is handed
//! back to the caller.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors raised while reading or writing an MZ3 mesh stream.
#[derive(Debug)]
pub enum Mz3Error {
    /// The underlying file could not be opened for the requested mode.
    OpenFailed { path: PathBuf, source: io::Error },
    /// The decompressed stream does not begin with the MZ3 magic bytes.
    BadMagic { path: PathBuf, found: [u8; 2] },
    /// Fewer bytes were available than the format required at this point.
    ShortRead {
        path: PathBuf,
        wanted: usize,
        got: usize,
    },
    /// An I/O error occurred while emitting bytes.
    WriteFailed { path: PathBuf, source: io::Error },
    /// A cell declared a point count other than 3.
    NonTriangleCell { point_count: u32 },
}

impl fmt::Display for Mz3Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mz3Error::OpenFailed { path, source } => {
                write!(f, "{}: could not open file: {}", path.display(), source)
            }
            Mz3Error::BadMagic { path, found } => write!(
                f,
                "{}: not an MZ3 file (bad magic {:#04x} {:#04x})",
                path.display(),
                found[0],
                found[1]
            ),
            Mz3Error::ShortRead { path, wanted, got } => write!(
                f,
                "{}: short read (wanted {} bytes, got {})",
                path.display(),
                wanted,
                got
            ),
            Mz3Error::WriteFailed { path, source } => {
                write!(f, "{}: write failed: {}", path.display(), source)
            }
            Mz3Error::NonTriangleCell { point_count } => write!(
                f,
                "cell has {} points; only triangular cells (3 points) are supported",
                point_count
            ),
        }
    }
}

impl std::error::Error for Mz3Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Mz3Error::OpenFailed { source, .. } => Some(source),
            Mz3Error::WriteFailed { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Mz3Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_magic_display_shows_bytes() {
        let err = Mz3Error::BadMagic {
            path: PathBuf::from("mesh.mz3"),
            found: [0x00, 0x01],
        };
        let msg = err.to_string();
        assert!(msg.contains("0x00"));
        assert!(msg.contains("0x01"));
        assert!(msg.contains("mesh.mz3"));
    }

    #[test]
    fn non_triangle_cell_display() {
        let err = Mz3Error::NonTriangleCell { point_count: 4 };
        assert!(err.to_string().contains('4'));
    }

    #[test]
    fn open_failed_has_source() {
        use std::error::Error;
        let io_err = io::Error::new(io::ErrorKind::NotFound, "nope");
        let err = Mz3Error::OpenFailed {
            path: PathBuf::from("x.mz3"),
            source: io_err,
        };
        assert!(err.source().is_some());
    }

    #[test]
    fn short_read_display_has_counts() {
        let err = Mz3Error::ShortRead {
            path: PathBuf::from("a.mz3"),
            wanted: 16,
            got: 4,
        };
        let msg = err.to_string();
        assert!(msg.contains("16"));
        assert!(msg.contains('4'));
    }
}
