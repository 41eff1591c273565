// Library-level end-to-end tests covering the testable properties in
// SPEC_FULL.md §8: round-trip identity, encoding equivalence, header
// determinism, block order, can_read/can_write soundness, and non-triangle
// rejection.

use mz3r::error::Mz3Error;
use mz3r::mesh::{PointAttribute, TriangleMesh};
use mz3r::registry;

fn triangle() -> TriangleMesh {
    TriangleMesh {
        vertices: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
        faces: vec![[0, 1, 2]],
        point_attribute: None,
    }
}

#[test]
fn plain_roundtrip_is_bit_exact() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("m.mz3");
    let mesh = triangle();
    mesh.write_mz3(&path, false).unwrap();
    let decoded = TriangleMesh::read_mz3(&path).unwrap();
    assert_eq!(mesh, decoded);
}

#[test]
fn gzip_roundtrip_is_bit_exact() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("m.mz3");
    let mesh = triangle();
    mesh.write_mz3(&path, true).unwrap();
    let decoded = TriangleMesh::read_mz3(&path).unwrap();
    assert_eq!(mesh, decoded);
}

#[test]
fn gzip_and_plain_encodings_agree_byte_for_byte() {
    let dir = tempfile::tempdir().unwrap();
    let plain_path = dir.path().join("plain.mz3");
    let gz_path = dir.path().join("gz.mz3");
    let mesh = triangle();
    mesh.write_mz3(&plain_path, false).unwrap();
    mesh.write_mz3(&gz_path, true).unwrap();

    let plain_bytes = std::fs::read(&plain_path).unwrap();
    let mut decoder = flate2::read::GzDecoder::new(std::fs::File::open(&gz_path).unwrap());
    let mut decoded = Vec::new();
    std::io::Read::read_to_end(&mut decoder, &mut decoded).unwrap();
    assert_eq!(decoded, plain_bytes);
}

#[test]
fn header_is_deterministic_for_a_bare_mesh() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("m.mz3");
    triangle().write_mz3(&path, false).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[0..2], &[0x4D, 0x5A]);
    assert_eq!(u16::from_le_bytes([bytes[2], bytes[3]]), 3);
    assert_eq!(
        u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
        1
    );
    assert_eq!(
        u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]),
        3
    );
    assert_eq!(
        u32::from_le_bytes([bytes[12], bytes[13], bytes[14], bytes[15]]),
        0
    );
}

#[test]
fn scalar_attribute_block_follows_faces_and_vertices() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("m.mz3");
    let mut mesh = triangle();
    mesh.point_attribute = Some(PointAttribute::ScalarF32(vec![1.0, 2.0, 3.0]));
    mesh.write_mz3(&path, false).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    // header(16) + faces(12) + vertices(36) + scalar(12) = 76
    assert_eq!(bytes.len(), 76);
    let tail = &bytes[64..];
    assert_eq!(f32::from_le_bytes(tail[0..4].try_into().unwrap()), 1.0);
    assert_eq!(f32::from_le_bytes(tail[4..8].try_into().unwrap()), 2.0);
    assert_eq!(f32::from_le_bytes(tail[8..12].try_into().unwrap()), 3.0);
}

#[test]
fn can_read_soundness() {
    let dir = tempfile::tempdir().unwrap();

    let bad_magic = dir.path().join("x.mz3");
    std::fs::write(&bad_magic, [0x00, 0x01, 0, 0]).unwrap();
    assert!(!mz3r::io::codec::Mz3Reader::can_read(&bad_magic));

    let wrong_ext = dir.path().join("x.nmz3");
    std::fs::write(&wrong_ext, mz3r::config::MZ3_MAGIC).unwrap();
    assert!(!mz3r::io::codec::Mz3Reader::can_read(&wrong_ext));
    assert!(!mz3r::io::codec::Mz3Writer::can_write(&wrong_ext));
}

#[test]
fn read_info_reports_bad_magic_error() {
    let dir = tempfile::tempdir().unwrap();
    let bad_magic = dir.path().join("x.mz3");
    std::fs::write(
        &bad_magic,
        [0x00, 0x01, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    )
    .unwrap();
    match mz3r::io::codec::Mz3Reader::read_info(&bad_magic) {
        Err(Mz3Error::BadMagic { .. }) => {}
        other => panic!("expected BadMagic, got {}", other.is_ok()),
    }
}

#[test]
fn nontriangle_face_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("m.mz3");
    let mut session = mz3r::io::codec::Mz3Writer::write_info(
        &path,
        4,
        1,
        mz3r::io::codec::WriteOptions {
            use_compression: false,
            pixel_kind: mz3r::io::codec::WritePixelKind::None,
        },
    )
    .unwrap();
    let err = session
        .write_cells(mz3r::io::codec::CellComponentBuffer::U32(&[3, 4, 0, 1, 2]))
        .unwrap_err();
    assert!(matches!(err, Mz3Error::NonTriangleCell { point_count: 4 }));
}

#[test]
fn registry_round_trips_rgba_attributes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rgba.mz3");
    let mut mesh = triangle();
    mesh.point_attribute = Some(PointAttribute::Rgba(vec![
        [1, 2, 3, 255],
        [4, 5, 6, 255],
        [7, 8, 9, 255],
    ]));

    let entry = registry::lookup(&path).expect("mz3 registered");
    (entry.write)(&mesh, &path, false).unwrap();
    let decoded = (entry.read)(&path).unwrap();
    assert_eq!(mesh, decoded);

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(u16::from_le_bytes([bytes[2], bytes[3]]), 3 | 4);
}
