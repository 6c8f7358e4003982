use glam::Vec3;

use crate::geometry::mesh::TriangleMesh;
use crate::geometry::normals::average_face_normals;

const BASE_CORNERS: [Vec3; 4] = [
    Vec3::new(-0.5, 0.0, -0.5),
    Vec3::new(0.5, 0.0, -0.5),
    Vec3::new(0.5, 0.0, 0.5),
    Vec3::new(-0.5, 0.0, 0.5),
];

const APEX: Vec3 = Vec3::new(0.0, 1.0, 0.0);

#[rustfmt::skip]
const INDICES: [u32; 18] = [
    0, 1, 4, // sides
    1, 2, 4,
    2, 3, 4,
    3, 0, 4,
    0, 1, 2, // base
    2, 3, 0,
];

/// Unit square pyramid: base of side 1 on the Y=0 plane, apex at (0, 1, 0).
///
/// Vertex normals are averaged face normals, so the apex is smooth and the
/// base corners blend their side and base faces.
pub fn pyramid() -> TriangleMesh {
    let mut mesh = TriangleMesh::with_capacity(BASE_CORNERS.len() + 1, INDICES.len());

    for corner in BASE_CORNERS {
        mesh.push_vertex(corner, Vec3::ZERO);
    }
    mesh.push_vertex(APEX, Vec3::ZERO);
    mesh.indices.extend_from_slice(&INDICES);

    average_face_normals(&mut mesh);

    log::debug!(
        "pyramid: {} vertices, {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    );

    mesh
}
