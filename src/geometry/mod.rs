pub mod cube;
pub mod cylinder;
pub mod mesh;
pub mod normals;
pub mod pyramid;

pub use cube::cube;
pub use cylinder::{DEFAULT_SEGMENTS, MAX_SEGMENTS, MIN_SEGMENTS, cylinder};
pub use mesh::TriangleMesh;
pub use pyramid::pyramid;
