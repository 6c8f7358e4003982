use glam::Vec3;

use crate::renderer::{Camera, RasterState, ShaderVariant};
use crate::scene::part::{Material, MeshKind, Part, Rotation, TransformOrder};

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum DemoKind {
    Robot,
    Phong,
    Shapes,
}

pub struct Demo {
    pub kind: DemoKind,
    pub name: &'static str,
    pub description: &'static str,
    pub shader: ShaderVariant,
    pub raster: RasterState,
    pub clear_color: [f32; 4],
    pub eye: Vec3,
    pub target: Vec3,
    pub parts: &'static [Part],
}

impl Demo {
    pub fn camera(&self, aspect: f32) -> Camera {
        Camera {
            aspect,
            ..Camera::looking_at(self.eye, self.target)
        }
    }

    pub fn uses(&self, mesh: MeshKind) -> bool {
        self.parts.iter().any(|p| p.mesh == mesh)
    }
}

pub fn demo(kind: DemoKind) -> &'static Demo {
    match kind {
        DemoKind::Robot => &ROBOT,
        DemoKind::Phong => &PHONG,
        DemoKind::Shapes => &SHAPES,
    }
}

pub const DEMOS: &[&Demo] = &[&ROBOT, &PHONG, &SHAPES];

const CLEAR_COLOR: [f32; 4] = [0.8, 0.8, 0.8, 0.0];

const fn flat(r: f32, g: f32, b: f32) -> Material {
    Material::Flat {
        color: Vec3::new(r, g, b),
    }
}

const ORANGE: Material = flat(1.0, 0.5, 0.0);
const CYAN: Material = flat(0.0, 1.0, 1.0);
const PURPLE: Material = flat(0.5, 0.0, 1.0);
const PINK: Material = flat(1.0, 0.0, 0.5);

const ORANGE_PHONG: Material = Material::Phong {
    ambient: Vec3::new(0.2, 0.1, 0.0),
    diffuse: Vec3::new(1.0, 0.5, 0.0),
    shininess: 32.0,
};

const fn cube(
    name: &'static str,
    translation: [f32; 3],
    scale: [f32; 3],
    rotation: Rotation,
    order: TransformOrder,
    material: Material,
) -> Part {
    Part {
        name,
        mesh: MeshKind::Cube,
        translation: Vec3::from_array(translation),
        scale: Vec3::from_array(scale),
        rotation,
        order,
        material,
    }
}

pub const ROBOT: Demo = Demo {
    kind: DemoKind::Robot,
    name: "Robot",
    description: "Flat-colored figure, one combined matrix per part",
    shader: ShaderVariant::Flat,
    raster: RasterState::DEPTH_AND_CULL,
    clear_color: CLEAR_COLOR,
    eye: Vec3::new(-5.0, 5.0, -10.0),
    target: Vec3::new(0.0, 3.0, 0.0),
    parts: &[
        cube("head", [0.0, 5.0, 0.0], [1.5, 1.5, 1.5], Rotation::None, TransformOrder::Trs, ORANGE),
        cube("body", [0.0, 2.0, 0.0], [2.0, 4.0, 2.0], Rotation::None, TransformOrder::Trs, CYAN),
        cube(
            "left arm",
            [-2.5, 4.0, 0.0],
            [0.75, 2.5, 0.75],
            Rotation::Z { degrees: -45.0 },
            TransformOrder::Trs,
            PURPLE,
        ),
        cube(
            "right arm",
            [2.5, 4.0, 0.0],
            [0.75, 2.5, 0.75],
            Rotation::Z { degrees: 45.0 },
            TransformOrder::Trs,
            PURPLE,
        ),
        cube(
            "left leg",
            [-2.0, -2.0, 0.0],
            [1.0, 3.0, 1.0],
            Rotation::Z { degrees: 30.0 },
            TransformOrder::Trs,
            PINK,
        ),
        cube(
            "right leg",
            [2.0, -2.0, 0.0],
            [1.0, 3.0, 1.0],
            Rotation::Z { degrees: -30.0 },
            TransformOrder::Trs,
            PINK,
        ),
    ],
};

pub const PHONG: Demo = Demo {
    kind: DemoKind::Phong,
    name: "Phong",
    description: "Same figure with a fixed Phong material",
    shader: ShaderVariant::Phong,
    raster: RasterState::DEPTH_AND_CULL,
    clear_color: CLEAR_COLOR,
    eye: Vec3::new(-30.0, 5.0, -30.0),
    target: Vec3::new(0.0, 3.0, 0.0),
    parts: &[
        cube("head", [0.0, 4.0, 0.0], [1.5, 1.5, 1.5], Rotation::None, TransformOrder::Tsr, ORANGE_PHONG),
        cube("body", [0.0, 0.5, 0.0], [2.0, 4.0, 2.0], Rotation::None, TransformOrder::Tsr, ORANGE_PHONG),
        cube(
            "left arm",
            [-2.5, 4.0, 0.0],
            [0.75, 2.5, 0.75],
            Rotation::Z { degrees: -45.0 },
            TransformOrder::Tsr,
            ORANGE_PHONG,
        ),
        cube(
            "right arm",
            [2.5, 4.0, 0.0],
            [0.75, 2.5, 0.75],
            Rotation::Z { degrees: 45.0 },
            TransformOrder::Tsr,
            ORANGE_PHONG,
        ),
        cube(
            "left leg",
            [-2.0, -2.0, 0.0],
            [1.0, 3.0, 1.0],
            Rotation::Z { degrees: 30.0 },
            TransformOrder::Tsr,
            ORANGE_PHONG,
        ),
        cube(
            "right leg",
            [2.0, -2.0, 0.0],
            [1.0, 3.0, 1.0],
            Rotation::Z { degrees: -30.0 },
            TransformOrder::Tsr,
            ORANGE_PHONG,
        ),
    ],
};

const SPIN: Rotation = Rotation::SpinY { rate: 0.2 };

pub const SHAPES: Demo = Demo {
    kind: DemoKind::Shapes,
    name: "Shapes",
    description: "Spinning pyramid head on a procedural cylinder",
    shader: ShaderVariant::Phong,
    raster: RasterState::DEPTH_ONLY,
    clear_color: CLEAR_COLOR,
    eye: Vec3::new(-10.0, -2.0, -10.0),
    target: Vec3::new(0.0, 5.0, 0.0),
    parts: &[
        Part {
            name: "head",
            mesh: MeshKind::Pyramid,
            translation: Vec3::new(0.0, 5.0, 0.0),
            scale: Vec3::new(1.5, 1.5, 1.5),
            rotation: SPIN,
            order: TransformOrder::Trs,
            material: Material::Phong {
                ambient: Vec3::new(0.2, 2.0, 0.0),
                diffuse: Vec3::new(1.0, 0.5, 0.0),
                shininess: 32.0,
            },
        },
        Part {
            name: "body",
            mesh: MeshKind::Cylinder,
            translation: Vec3::new(0.0, 1.2, 0.0),
            scale: Vec3::new(2.0, 4.0, 2.0),
            rotation: SPIN,
            order: TransformOrder::Tsr,
            material: Material::Phong {
                ambient: Vec3::new(2.0, 0.2, 0.0),
                diffuse: Vec3::new(2.0, 1.0, 1.0),
                shininess: 32.0,
            },
        },
    ],
};
