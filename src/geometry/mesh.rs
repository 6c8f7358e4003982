use glam::Vec3;

/// Indexed triangle list with separate position and normal streams.
///
/// Both streams are flat `xyz` triples so they can be handed to the GPU as-is.
/// Front faces are wound clockwise when seen from outside the shape.
#[derive(Clone, Debug, Default)]
pub struct TriangleMesh {
    pub vertices: Vec<f32>,
    pub normals: Vec<f32>,
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    pub fn with_capacity(vertex_count: usize, index_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count * 3),
            normals: Vec::with_capacity(vertex_count * 3),
            indices: Vec::with_capacity(index_count),
        }
    }

    /// Appends a vertex and returns its index.
    pub fn push_vertex(&mut self, position: Vec3, normal: Vec3) -> u32 {
        let index = self.vertex_count() as u32;
        self.vertices.extend_from_slice(&position.to_array());
        self.normals.extend_from_slice(&normal.to_array());
        index
    }

    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn position(&self, index: usize) -> Vec3 {
        Vec3::from_slice(&self.vertices[index * 3..index * 3 + 3])
    }

    #[cfg(test)]
    pub fn normal(&self, index: usize) -> Vec3 {
        Vec3::from_slice(&self.normals[index * 3..index * 3 + 3])
    }

    pub fn set_normal(&mut self, index: usize, normal: Vec3) {
        self.normals[index * 3..index * 3 + 3].copy_from_slice(&normal.to_array());
    }

    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Unnormalized `(v1 - v0) x (v2 - v0)` for a triangle.
    pub fn face_cross(&self, triangle: [u32; 3]) -> Vec3 {
        let v0 = self.position(triangle[0] as usize);
        let v1 = self.position(triangle[1] as usize);
        let v2 = self.position(triangle[2] as usize);
        (v1 - v0).cross(v2 - v0)
    }

    pub fn indices_in_range(&self) -> bool {
        let count = self.vertex_count() as u32;
        self.indices.iter().all(|&i| i < count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_vertex_returns_sequential_indices() {
        let mut mesh = TriangleMesh::default();
        assert_eq!(mesh.push_vertex(Vec3::ZERO, Vec3::Y), 0);
        assert_eq!(mesh.push_vertex(Vec3::X, Vec3::Y), 1);
        assert_eq!(mesh.push_vertex(Vec3::Z, Vec3::Y), 2);
        mesh.push_triangle(0, 1, 2);

        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.vertices.len(), mesh.normals.len());
        assert_eq!(mesh.position(1), Vec3::X);
        assert!(mesh.indices_in_range());
    }

    #[test]
    fn out_of_range_index_is_detected() {
        let mut mesh = TriangleMesh::default();
        mesh.push_vertex(Vec3::ZERO, Vec3::Y);
        mesh.push_triangle(0, 0, 1);
        assert!(!mesh.indices_in_range());
    }

    #[test]
    fn face_cross_follows_edge_order() {
        let mut mesh = TriangleMesh::default();
        mesh.push_vertex(Vec3::ZERO, Vec3::ZERO);
        mesh.push_vertex(Vec3::X, Vec3::ZERO);
        mesh.push_vertex(Vec3::Z, Vec3::ZERO);
        assert_eq!(mesh.face_cross([0, 1, 2]), Vec3::NEG_Y);
        assert_eq!(mesh.face_cross([0, 2, 1]), Vec3::Y);
    }
}
