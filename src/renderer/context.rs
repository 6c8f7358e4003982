use glam::{Mat4, Vec3};
use thiserror::Error;

use crate::geometry::TriangleMesh;

/// The two uniform layouts the demo shaders understand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShaderVariant {
    /// `pvmr_matrix` + `color`, unlit.
    Flat,
    /// Separate `P`/`V`/`M` matrices with a fixed Phong material set.
    Phong,
}

impl ShaderVariant {
    pub const ALL: [ShaderVariant; 2] = [ShaderVariant::Flat, ShaderVariant::Phong];

    pub fn uniform_names(self) -> &'static [&'static str] {
        match self {
            ShaderVariant::Flat => &["pvmr_matrix", "color"],
            ShaderVariant::Phong => &[
                "P",
                "V",
                "M",
                "material_ambient",
                "material_diffuse",
                "material_shininess",
                "camera_position",
            ],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RasterState {
    pub depth_test: bool,
    pub cull_face: bool,
}

impl RasterState {
    pub const DEPTH_ONLY: Self = Self {
        depth_test: true,
        cull_face: false,
    };

    pub const DEPTH_AND_CULL: Self = Self {
        depth_test: true,
        cull_face: true,
    };
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UniformValue {
    Mat4(Mat4),
    Vec3(Vec3),
    Float(f32),
}

impl UniformValue {
    pub fn kind(&self) -> UniformKind {
        match self {
            UniformValue::Mat4(_) => UniformKind::Mat4,
            UniformValue::Vec3(_) => UniformKind::Vec3,
            UniformValue::Float(_) => UniformKind::Float,
        }
    }
}

impl From<Mat4> for UniformValue {
    fn from(value: Mat4) -> Self {
        UniformValue::Mat4(value)
    }
}

impl From<Vec3> for UniformValue {
    fn from(value: Vec3) -> Self {
        UniformValue::Vec3(value)
    }
}

impl From<f32> for UniformValue {
    fn from(value: f32) -> Self {
        UniformValue::Float(value)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UniformKind {
    Mat4,
    Vec3,
    Float,
}

/// Type of a named uniform in the shared uniform block, if it exists.
pub fn uniform_kind(name: &str) -> Option<UniformKind> {
    match name {
        "P" | "V" | "M" | "pvmr_matrix" => Some(UniformKind::Mat4),
        "camera_position" | "material_ambient" | "material_diffuse" | "color" => {
            Some(UniformKind::Vec3)
        }
        "material_shininess" => Some(UniformKind::Float),
        _ => None,
    }
}

/// Checks that `shader` declares `name` and that `value` has its type.
pub fn check_uniform(
    shader: ShaderVariant,
    name: &str,
    value: &UniformValue,
) -> Result<(), RenderError> {
    let expected = uniform_kind(name)
        .filter(|_| shader.uniform_names().iter().any(|n| *n == name))
        .ok_or_else(|| RenderError::UnknownUniform {
            shader,
            name: name.to_string(),
        })?;
    if expected != value.kind() {
        return Err(RenderError::UniformType {
            name: name.to_string(),
            expected,
            found: value.kind(),
        });
    }
    Ok(())
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("{shader:?} shader has no uniform named `{name}`")]
    UnknownUniform { shader: ShaderVariant, name: String },
    #[error("uniform `{name}` expects {expected:?}, got {found:?}")]
    UniformType {
        name: String,
        expected: UniformKind,
        found: UniformKind,
    },
}

/// Everything a demo needs from the graphics backend.
///
/// Uniform writes stick until overwritten, including across `use_program`;
/// each `draw_indexed` uses whatever values are current at the time of the
/// call.
pub trait RenderContext {
    type Mesh: Clone;

    fn upload_mesh(&mut self, label: &str, mesh: &TriangleMesh) -> Self::Mesh;

    fn clear(&mut self, color: [f32; 4]);

    fn set_raster_state(&mut self, state: RasterState);

    fn use_program(&mut self, shader: ShaderVariant);

    fn write_uniform(&mut self, name: &str, value: UniformValue) -> Result<(), RenderError>;

    fn draw_indexed(&mut self, mesh: &Self::Mesh);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_name_is_known() {
        for shader in ShaderVariant::ALL {
            for name in shader.uniform_names() {
                assert!(uniform_kind(name).is_some(), "{name}");
            }
        }
    }

    #[test]
    fn unknown_uniform_is_rejected() {
        let err = check_uniform(ShaderVariant::Phong, "light_position", &Vec3::ONE.into())
            .unwrap_err();
        assert!(matches!(err, RenderError::UnknownUniform { name, .. } if name == "light_position"));
    }

    #[test]
    fn uniform_from_the_other_variant_is_rejected() {
        let err = check_uniform(ShaderVariant::Flat, "P", &Mat4::IDENTITY.into()).unwrap_err();
        assert!(matches!(
            err,
            RenderError::UnknownUniform {
                shader: ShaderVariant::Flat,
                ..
            }
        ));
        assert!(check_uniform(ShaderVariant::Phong, "P", &Mat4::IDENTITY.into()).is_ok());
    }

    #[test]
    fn mismatched_type_is_rejected() {
        let err = check_uniform(ShaderVariant::Phong, "material_shininess", &Vec3::ONE.into()).unwrap_err();
        assert!(matches!(
            err,
            RenderError::UniformType {
                expected: UniformKind::Float,
                found: UniformKind::Vec3,
                ..
            }
        ));
        assert!(check_uniform(ShaderVariant::Phong, "material_shininess", &32.0_f32.into()).is_ok());
        assert!(check_uniform(ShaderVariant::Phong, "M", &Mat4::IDENTITY.into()).is_ok());
    }
}
