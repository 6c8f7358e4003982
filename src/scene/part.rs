use glam::{Mat4, Vec3};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeshKind {
    Cube,
    Pyramid,
    Cylinder,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Rotation {
    None,
    /// Fixed tilt about Z.
    Z { degrees: f32 },
    /// Continuous spin about Y, `rate` radians per second.
    SpinY { rate: f32 },
}

impl Rotation {
    pub fn matrix(&self, time: f32) -> Mat4 {
        match *self {
            Rotation::None => Mat4::IDENTITY,
            Rotation::Z { degrees } => Mat4::from_rotation_z(degrees.to_radians()),
            Rotation::SpinY { rate } => Mat4::from_rotation_y(rate * time),
        }
    }
}

/// Order of the model matrix factors, left to right.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransformOrder {
    /// translation * rotation * scale
    Trs,
    /// translation * scale * rotation
    Tsr,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Material {
    Flat {
        color: Vec3,
    },
    Phong {
        ambient: Vec3,
        diffuse: Vec3,
        shininess: f32,
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Part {
    pub name: &'static str,
    pub mesh: MeshKind,
    pub translation: Vec3,
    pub scale: Vec3,
    pub rotation: Rotation,
    pub order: TransformOrder,
    pub material: Material,
}

impl Part {
    pub fn model_matrix(&self, time: f32) -> Mat4 {
        let t = Mat4::from_translation(self.translation);
        let r = self.rotation.matrix(time);
        let s = Mat4::from_scale(self.scale);
        match self.order {
            TransformOrder::Trs => t * r * s,
            TransformOrder::Tsr => t * s * r,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arm(order: TransformOrder) -> Part {
        Part {
            name: "arm",
            mesh: MeshKind::Cube,
            translation: Vec3::new(2.5, 4.0, 0.0),
            scale: Vec3::new(0.75, 2.5, 0.75),
            rotation: Rotation::Z { degrees: 90.0 },
            order,
            material: Material::Flat { color: Vec3::ONE },
        }
    }

    #[test]
    fn trs_scales_before_rotating() {
        // Local +Y is stretched to 2.5, then tipped onto -X.
        let m = arm(TransformOrder::Trs).model_matrix(0.0);
        let tip = m.transform_point3(Vec3::Y);
        assert!(tip.abs_diff_eq(Vec3::new(0.0, 4.0, 0.0), 1e-5));
    }

    #[test]
    fn tsr_rotates_before_scaling() {
        // Local +Y is tipped onto -X first, then picks up the 0.75 X scale.
        let m = arm(TransformOrder::Tsr).model_matrix(0.0);
        let tip = m.transform_point3(Vec3::Y);
        assert!(tip.abs_diff_eq(Vec3::new(1.75, 4.0, 0.0), 1e-5));
    }

    #[test]
    fn orders_agree_without_rotation() {
        let mut part = arm(TransformOrder::Trs);
        part.rotation = Rotation::None;
        let trs = part.model_matrix(0.0);
        part.order = TransformOrder::Tsr;
        assert_eq!(trs, part.model_matrix(0.0));
    }

    #[test]
    fn spin_follows_time() {
        let spin = Rotation::SpinY { rate: 0.2 };
        assert_eq!(spin.matrix(0.0), Mat4::IDENTITY);
        let m = spin.matrix(5.0);
        assert!(m.abs_diff_eq(Mat4::from_rotation_y(1.0), 1e-6));
    }
}
