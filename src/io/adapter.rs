//! Stream adapters: a uniform byte-sequential read/write/seek surface over
//! either a plain file or a gzip-wrapped file.
//!
//! The plain adapter supports arbitrary absolute seeks in both directions on
//! both read and write (backed directly by [`File::seek`]). The gzip adapter
//! is asymmetric: reads support backward seeks by reopening the file and
//! re-decoding from the start (the same strategy a real gzip-file reader
//! uses internally, since DEFLATE offers no cheap random access), while
//! writes never seek at all — the MZ3 codec is responsible for ordering its
//! writes so that a forward-only pass suffices (see the deferred vertex
//! buffer in [`crate::io::codec`]).

use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::error::{Mz3Error, Result};

fn open_failed(path: &Path, source: std::io::Error) -> Mz3Error {
    Mz3Error::OpenFailed {
        path: path.to_path_buf(),
        source,
    }
}

fn write_failed(path: &Path, source: std::io::Error) -> Mz3Error {
    Mz3Error::WriteFailed {
        path: path.to_path_buf(),
        source,
    }
}

// ─────────────────────────────────────────────────────────────────────────
// Read side
// ─────────────────────────────────────────────────────────────────────────

/// A byte-sequential, seekable read source over a plain or gzip-wrapped file.
pub enum ReadAdapter {
    Plain(File),
    Gzip(GzReader),
}

/// Backs the gzip read adapter. Because `GzDecoder<File>` has no `Seek`, a
/// backward seek is serviced by reopening the file and decoding forward
/// from the start, discarding bytes up to the target offset.
pub struct GzReader {
    path: PathBuf,
    decoder: GzDecoder<File>,
    pos: u64,
}

impl GzReader {
    fn open(path: &Path) -> Result<GzReader> {
        let file = File::open(path).map_err(|e| open_failed(path, e))?;
        Ok(GzReader {
            path: path.to_path_buf(),
            decoder: GzDecoder::new(file),
            pos: 0,
        })
    }

    fn reopen(&mut self) -> Result<()> {
        let file = File::open(&self.path).map_err(|e| open_failed(&self.path, e))?;
        self.decoder = GzDecoder::new(file);
        self.pos = 0;
        Ok(())
    }

    fn skip_forward(&mut self, n: u64) -> Result<()> {
        let mut remaining = n;
        let mut scratch = [0u8; 4096];
        while remaining > 0 {
            let chunk = remaining.min(scratch.len() as u64) as usize;
            let got = self
                .decoder
                .read(&mut scratch[..chunk])
                .map_err(|e| open_failed(&self.path, e))?;
            if got == 0 {
                break;
            }
            remaining -= got as u64;
            self.pos += got as u64;
        }
        Ok(())
    }
}

impl ReadAdapter {
    /// Opens `path` for reading, choosing plain or gzip by sniffing the
    /// first two bytes of the file on a fresh handle.
    pub fn open(path: &Path) -> Result<ReadAdapter> {
        if is_gzip_file(path)? {
            Ok(ReadAdapter::Gzip(GzReader::open(path)?))
        } else {
            let file = File::open(path).map_err(|e| open_failed(path, e))?;
            Ok(ReadAdapter::Plain(file))
        }
    }

    /// Reads exactly `buf.len()` bytes, failing with `ShortRead` otherwise.
    pub fn read_exact(&mut self, path: &Path, buf: &mut [u8]) -> Result<()> {
        let wanted = buf.len();
        let got = match self {
            ReadAdapter::Plain(f) => read_fully(f, buf),
            ReadAdapter::Gzip(g) => {
                let got = read_fully(&mut g.decoder, buf);
                g.pos += got as u64;
                got
            }
        };
        if got != wanted {
            return Err(Mz3Error::ShortRead {
                path: path.to_path_buf(),
                wanted,
                got,
            });
        }
        Ok(())
    }

    /// Seeks to an absolute byte offset from the start of the decompressed
    /// stream (plain) or logical stream (gzip).
    pub fn seek_to(&mut self, path: &Path, offset: u64) -> Result<()> {
        match self {
            ReadAdapter::Plain(f) => {
                f.seek(SeekFrom::Start(offset))
                    .map_err(|e| open_failed(path, e))?;
            }
            ReadAdapter::Gzip(g) => {
                if offset < g.pos {
                    g.reopen()?;
                }
                let forward = offset - g.pos;
                if forward > 0 {
                    g.skip_forward(forward)?;
                }
            }
        }
        Ok(())
    }
}

fn read_fully<R: Read>(r: &mut R, buf: &mut [u8]) -> usize {
    let mut total = 0;
    while total < buf.len() {
        match r.read(&mut buf[total..]) {
            Ok(0) => break,
            Ok(n) => total += n,
            Err(_) => break,
        }
    }
    total
}

/// Sniffs the first two bytes of `path` to decide whether it is a gzip
/// stream. Any I/O error surfaces as `OpenFailed`.
pub fn is_gzip_file(path: &Path) -> Result<bool> {
    let mut file = File::open(path).map_err(|e| open_failed(path, e))?;
    let mut magic = [0u8; 2];
    let got = read_fully(&mut file, &mut magic);
    Ok(got == 2 && magic == crate::config::GZIP_MAGIC)
}

// ─────────────────────────────────────────────────────────────────────────
// Write side
// ─────────────────────────────────────────────────────────────────────────

/// A byte-sequential write destination over a plain or gzip-wrapped file.
pub enum WriteAdapter {
    Plain(File),
    Gzip(GzEncoder<File>),
}

impl WriteAdapter {
    /// Creates (truncating) `path` for writing, gzip-wrapped when `compress`.
    pub fn create(path: &Path, compress: bool) -> Result<WriteAdapter> {
        let file = File::create(path).map_err(|e| open_failed(path, e))?;
        if compress {
            Ok(WriteAdapter::Gzip(GzEncoder::new(
                file,
                Compression::new(crate::config::DEFAULT_COMPRESSION_LEVEL),
            )))
        } else {
            Ok(WriteAdapter::Plain(file))
        }
    }

    pub fn write_all(&mut self, path: &Path, buf: &[u8]) -> Result<()> {
        let result = match self {
            WriteAdapter::Plain(f) => f.write_all(buf),
            WriteAdapter::Gzip(g) => g.write_all(buf),
        };
        result.map_err(|e| write_failed(path, e))
    }

    /// Seeks to an absolute offset. Only valid on the plain adapter; the
    /// gzip write path must never be asked to seek (see module docs).
    pub fn seek_to(&mut self, path: &Path, offset: u64) -> Result<()> {
        match self {
            WriteAdapter::Plain(f) => {
                f.seek(SeekFrom::Start(offset))
                    .map_err(|e| write_failed(path, e))?;
                Ok(())
            }
            WriteAdapter::Gzip(_) => unreachable!("gzip write adapter never seeks"),
        }
    }

    /// Flushes and closes the adapter, finishing the gzip trailer if needed.
    pub fn finish(self, path: &Path) -> Result<()> {
        match self {
            WriteAdapter::Plain(mut f) => f.flush().map_err(|e| write_failed(path, e)),
            WriteAdapter::Gzip(g) => g.finish().map(|_| ()).map_err(|e| write_failed(path, e)),
        }
    }
}
