use std::f32::consts::TAU;

use glam::Vec3;

use crate::geometry::mesh::TriangleMesh;

pub const DEFAULT_SEGMENTS: u32 = 20;

/// Segment range accepted from the command line and the UI slider.
pub const MIN_SEGMENTS: u32 = 3;
pub const MAX_SEGMENTS: u32 = 128;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CylinderParams {
    pub segments: u32,
    pub height: f32,
    pub radius: f32,
}

impl Default for CylinderParams {
    fn default() -> Self {
        Self {
            segments: DEFAULT_SEGMENTS,
            height: 1.0,
            radius: 0.5,
        }
    }
}

/// Unit cylinder (height 1, radius 0.5) with `segments` sides.
pub fn cylinder(segments: u32) -> TriangleMesh {
    cylinder_with(CylinderParams {
        segments,
        ..Default::default()
    })
}

/// Capped cylinder centred on the origin, axis along Y.
///
/// Ring vertices are interleaved: `2i` is on the top ring, `2i + 1` on the
/// bottom ring, both carrying the raw radial vector `(x, 0, z)` as normal.
/// Its length is the radius, not 1. The bottom and top cap centres follow at
/// `2N` and `2N + 1` with flat normals. No averaging pass is run.
pub fn cylinder_with(params: CylinderParams) -> TriangleMesh {
    let CylinderParams {
        segments,
        height,
        radius,
    } = params;

    if segments < 3 {
        log::warn!("cylinder: {segments} segments produces a degenerate mesh");
    }

    let n = segments as usize;
    let half_height = height / 2.0;
    let mut mesh = TriangleMesh::with_capacity(2 * n + 2, 12 * n);

    for i in 0..segments {
        let theta = TAU * i as f32 / segments as f32;
        let x = radius * theta.cos();
        let z = radius * theta.sin();
        let side = Vec3::new(x, 0.0, z);

        mesh.push_vertex(Vec3::new(x, half_height, z), side);
        mesh.push_vertex(Vec3::new(x, -half_height, z), side);
    }

    let bottom_center = mesh.push_vertex(Vec3::new(0.0, -half_height, 0.0), Vec3::NEG_Y);
    let top_center = mesh.push_vertex(Vec3::new(0.0, half_height, 0.0), Vec3::Y);

    let top = |i: u32| 2 * i;
    let bottom = |i: u32| 2 * i + 1;

    for i in 0..segments {
        let next = (i + 1) % segments;
        mesh.push_triangle(bottom_center, bottom(next), bottom(i));
        mesh.push_triangle(top_center, top(i), top(next));
    }

    for i in 0..segments {
        let next = (i + 1) % segments;
        mesh.push_triangle(bottom(i), bottom(next), top(i));
        mesh.push_triangle(top(i), bottom(next), top(next));
    }

    debug_assert!(mesh.indices_in_range());
    log::debug!(
        "cylinder: {segments} segments, {} vertices, {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    );

    mesh
}
