//! A process-wide, once-initialized table mapping file extensions to mesh
//! constructors, standing in for "the host's I/O-dispatch registry"
//! (`SPEC_FULL.md` §6, §9). Populated once, lazily, and never torn down.

use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

use crate::config::MZ3_EXTENSION;
use crate::error::Result;
use crate::mesh::TriangleMesh;

/// A registered codec: capability predicates plus read/write entry points,
/// keyed by lowercase file extension (without the leading dot).
pub struct CodecEntry {
    pub can_read: fn(&Path) -> bool,
    pub can_write: fn(&Path) -> bool,
    pub read: fn(&Path) -> Result<TriangleMesh>,
    pub write: fn(&TriangleMesh, &Path, bool) -> Result<()>,
}

fn registry() -> &'static HashMap<&'static str, CodecEntry> {
    static REGISTRY: OnceLock<HashMap<&'static str, CodecEntry>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let mut map = HashMap::new();
        map.insert(
            &MZ3_EXTENSION[1..],
            CodecEntry {
                can_read: crate::io::codec::Mz3Reader::can_read,
                can_write: crate::io::codec::Mz3Writer::can_write,
                read: TriangleMesh::read_mz3,
                write: TriangleMesh::write_mz3,
            },
        );
        map
    })
}

/// Looks up the codec registered for `path`'s extension (case-insensitive).
pub fn lookup(path: &Path) -> Option<&'static CodecEntry> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    registry().get(ext.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mz3_extension_is_registered() {
        let entry = lookup(Path::new("mesh.mz3")).expect("mz3 codec registered");
        assert!(!(entry.can_read)(Path::new("mesh.mz3")));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x.MZ3");
        std::fs::write(&path, crate::config::MZ3_MAGIC).unwrap();
        let entry = lookup(&path).expect("case-insensitive lookup");
        assert!((entry.can_write)(&path));
    }

    #[test]
    fn unknown_extension_is_not_registered() {
        assert!(lookup(Path::new("mesh.obj")).is_none());
    }
}
