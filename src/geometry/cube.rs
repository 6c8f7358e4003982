use glam::Vec3;

use crate::geometry::mesh::TriangleMesh;

// (normal, u, v) with u x v == normal, so corners walked as
// (-u,-v) (+u,-v) (+u,+v) (-u,+v) go counter-clockwise around the normal.
const FACES: [(Vec3, Vec3, Vec3); 6] = [
    (Vec3::X, Vec3::Y, Vec3::Z),
    (Vec3::NEG_X, Vec3::Z, Vec3::Y),
    (Vec3::Y, Vec3::Z, Vec3::X),
    (Vec3::NEG_Y, Vec3::X, Vec3::Z),
    (Vec3::Z, Vec3::X, Vec3::Y),
    (Vec3::NEG_Z, Vec3::Y, Vec3::X),
];

const CORNERS: [(f32, f32); 4] = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];

/// Unit cube (side 1) centred on the origin with flat per-face normals.
pub fn cube() -> TriangleMesh {
    let mut mesh = TriangleMesh::with_capacity(24, 36);

    for (normal, u, v) in FACES {
        let base = mesh.vertex_count() as u32;
        for (su, sv) in CORNERS {
            let position = (normal + u * su + v * sv) * 0.5;
            mesh.push_vertex(position, normal);
        }
        // Reverse of the corner walk: clockwise seen from outside.
        mesh.push_triangle(base, base + 2, base + 1);
        mesh.push_triangle(base, base + 3, base + 2);
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts() {
        let mesh = cube();
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.triangle_count(), 12);
        assert!(mesh.indices_in_range());
    }

    #[test]
    fn corners_are_half_unit_from_origin() {
        let mesh = cube();
        for i in 0..mesh.vertex_count() {
            let p = mesh.position(i);
            assert_eq!(p.abs(), Vec3::splat(0.5), "vertex {i}");
        }
    }

    #[test]
    fn normals_point_out_of_their_face() {
        let mesh = cube();
        for i in 0..mesh.vertex_count() {
            let normal = mesh.normal(i);
            assert_eq!(normal.length(), 1.0);
            assert_eq!(mesh.position(i).dot(normal), 0.5);
        }
    }

    #[test]
    fn triangles_wind_clockwise_from_outside() {
        let mesh = cube();
        for triangle in mesh.triangles() {
            let normal = mesh.normal(triangle[0] as usize);
            assert!(mesh.face_cross(triangle).dot(normal) < 0.0);
        }
    }
}
