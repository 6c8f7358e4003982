use glam::Vec3;

use crate::geometry::mesh::TriangleMesh;

/// Replaces every vertex normal with the averaged face normal of the
/// triangles that reference it.
///
/// Face normals are `normalize((v1 - v0) x (v2 - v0))`. Each vertex sums the
/// face normals of its triangles, divides by the reference count and is then
/// normalized again. Vertices no triangle touches end up with a zero normal.
/// Degenerate triangles are not guarded against.
pub fn average_face_normals(mesh: &mut TriangleMesh) {
    let vertex_count = mesh.vertex_count();
    let mut sums = vec![Vec3::ZERO; vertex_count];
    let mut counts = vec![0u32; vertex_count];

    for triangle in mesh.triangles() {
        let face = mesh.face_cross(triangle).normalize();
        for &i in &triangle {
            sums[i as usize] += face;
            counts[i as usize] += 1;
        }
    }

    for (i, (sum, count)) in sums.into_iter().zip(counts).enumerate() {
        let normal = if count == 0 {
            Vec3::ZERO
        } else {
            (sum / count as f32).normalize()
        };
        mesh.set_normal(i, normal);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_triangle_gets_its_face_normal() {
        let mut mesh = TriangleMesh::default();
        mesh.push_vertex(Vec3::ZERO, Vec3::ZERO);
        mesh.push_vertex(Vec3::new(2.0, 0.0, 0.0), Vec3::ZERO);
        mesh.push_vertex(Vec3::new(0.0, 2.0, 0.0), Vec3::ZERO);
        mesh.push_triangle(0, 1, 2);

        average_face_normals(&mut mesh);

        for i in 0..3 {
            assert!(mesh.normal(i).abs_diff_eq(Vec3::Z, 1e-6));
        }
    }

    #[test]
    fn shared_edge_averages_both_faces() {
        // Two faces folded 90 degrees along the X axis.
        let mut mesh = TriangleMesh::default();
        mesh.push_vertex(Vec3::ZERO, Vec3::ZERO);
        mesh.push_vertex(Vec3::X, Vec3::ZERO);
        mesh.push_vertex(Vec3::Y, Vec3::ZERO);
        mesh.push_vertex(Vec3::NEG_Z, Vec3::ZERO);
        mesh.push_triangle(0, 1, 2);
        mesh.push_triangle(0, 1, 3);

        average_face_normals(&mut mesh);

        let diagonal = Vec3::new(0.0, 1.0, 1.0).normalize();
        assert!(mesh.normal(0).abs_diff_eq(diagonal, 1e-6));
        assert!(mesh.normal(1).abs_diff_eq(diagonal, 1e-6));
        assert!(mesh.normal(2).abs_diff_eq(Vec3::Z, 1e-6));
        assert!(mesh.normal(3).abs_diff_eq(Vec3::Y, 1e-6));
    }

    #[test]
    fn unreferenced_vertex_gets_zero_normal() {
        let mut mesh = TriangleMesh::default();
        mesh.push_vertex(Vec3::ZERO, Vec3::ONE);
        mesh.push_vertex(Vec3::X, Vec3::ONE);
        mesh.push_vertex(Vec3::Y, Vec3::ONE);
        mesh.push_vertex(Vec3::splat(5.0), Vec3::ONE);
        mesh.push_triangle(0, 1, 2);

        average_face_normals(&mut mesh);

        assert_eq!(mesh.normal(3), Vec3::ZERO);
    }
}
