use crate::geometry::{self, TriangleMesh};
use crate::renderer::{RenderContext, RenderError, ShaderVariant};
use crate::scene::demos::Demo;
use crate::scene::part::{Material, MeshKind};

pub struct LoadedMesh<M> {
    pub handle: M,
    pub triangles: usize,
}

impl<M> LoadedMesh<M> {
    fn upload<C>(ctx: &mut C, label: &str, mesh: &TriangleMesh) -> Self
    where
        C: RenderContext<Mesh = M>,
    {
        Self {
            handle: ctx.upload_mesh(label, mesh),
            triangles: mesh.triangle_count(),
        }
    }
}

/// GPU copies of every mesh the demos draw.
pub struct MeshSet<M> {
    pub cube: LoadedMesh<M>,
    pub pyramid: LoadedMesh<M>,
    pub cylinder: LoadedMesh<M>,
    pub cylinder_segments: u32,
}

impl<M> MeshSet<M> {
    pub fn upload<C>(ctx: &mut C, cylinder_segments: u32) -> Self
    where
        C: RenderContext<Mesh = M>,
    {
        Self {
            cube: LoadedMesh::upload(ctx, "Cube", &geometry::cube()),
            pyramid: LoadedMesh::upload(ctx, "Pyramid", &geometry::pyramid()),
            cylinder: LoadedMesh::upload(ctx, "Cylinder", &geometry::cylinder(cylinder_segments)),
            cylinder_segments,
        }
    }

    /// Swaps in a freshly generated cylinder; the old handle is dropped.
    pub fn rebuild_cylinder<C>(&mut self, ctx: &mut C, segments: u32)
    where
        C: RenderContext<Mesh = M>,
    {
        if segments == self.cylinder_segments {
            return;
        }
        log::info!("rebuilding cylinder with {segments} segments");
        self.cylinder = LoadedMesh::upload(ctx, "Cylinder", &geometry::cylinder(segments));
        self.cylinder_segments = segments;
    }

    pub fn get(&self, kind: MeshKind) -> &LoadedMesh<M> {
        match kind {
            MeshKind::Cube => &self.cube,
            MeshKind::Pyramid => &self.pyramid,
            MeshKind::Cylinder => &self.cylinder,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub draw_calls: usize,
    pub triangles: usize,
}

/// Issues one frame of `demo` against `ctx`.
pub fn draw_frame<C: RenderContext>(
    ctx: &mut C,
    demo: &Demo,
    meshes: &MeshSet<C::Mesh>,
    aspect: f32,
    time: f32,
) -> Result<FrameStats, RenderError> {
    ctx.clear(demo.clear_color);
    ctx.set_raster_state(demo.raster);
    ctx.use_program(demo.shader);

    let camera = demo.camera(aspect);
    let projection = camera.projection_matrix();
    let view = camera.view_matrix();
    let pv = camera.view_projection_matrix();

    if demo.shader == ShaderVariant::Phong {
        ctx.write_uniform("P", projection.into())?;
        ctx.write_uniform("V", view.into())?;
        ctx.write_uniform("camera_position", camera.position.into())?;
    }

    let mut stats = FrameStats::default();

    for part in demo.parts {
        let model = part.model_matrix(time);

        match part.material {
            Material::Flat { color } => {
                ctx.write_uniform("pvmr_matrix", (pv * model).into())?;
                ctx.write_uniform("color", color.into())?;
            }
            Material::Phong {
                ambient,
                diffuse,
                shininess,
            } => {
                ctx.write_uniform("M", model.into())?;
                ctx.write_uniform("material_ambient", ambient.into())?;
                ctx.write_uniform("material_diffuse", diffuse.into())?;
                ctx.write_uniform("material_shininess", shininess.into())?;
            }
        }

        let mesh = meshes.get(part.mesh);
        log::trace!("{}: {} ({} triangles)", demo.name, part.name, mesh.triangles);
        ctx.draw_indexed(&mesh.handle);
        stats.draw_calls += 1;
        stats.triangles += mesh.triangles;
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use glam::{Mat4, Vec3};

    use super::*;
    use crate::renderer::recorder::RecordedDraw;
    use crate::renderer::context::UniformValue;
    use crate::renderer::{FrameRecorder, RasterState};
    use crate::scene::demos::{DEMOS, PHONG, ROBOT, SHAPES};

    const ASPECT: f32 = 16.0 / 9.0;

    fn record(demo: &Demo, time: f32) -> FrameRecorder {
        let mut recorder = FrameRecorder::new();
        let meshes = MeshSet::upload(&mut recorder, 20);
        draw_frame(&mut recorder, demo, &meshes, ASPECT, time).unwrap();
        recorder
    }

    fn mat(draw: &RecordedDraw, name: &str) -> Mat4 {
        match draw.uniform(name) {
            Some(UniformValue::Mat4(m)) => m,
            other => panic!("{name}: {other:?}"),
        }
    }

    fn vec(draw: &RecordedDraw, name: &str) -> Vec3 {
        match draw.uniform(name) {
            Some(UniformValue::Vec3(v)) => v,
            other => panic!("{name}: {other:?}"),
        }
    }

    #[test]
    fn one_draw_per_part() {
        for demo in DEMOS {
            let recorder = record(demo, 0.0);
            assert_eq!(recorder.draws.len(), demo.parts.len(), "{}", demo.name);
            assert_eq!(recorder.clear_color, Some([0.8, 0.8, 0.8, 0.0]));
            assert_eq!(recorder.raster, Some(demo.raster));
        }
    }

    #[test]
    fn draws_only_use_their_variant_uniforms() {
        for demo in DEMOS {
            let recorder = record(demo, 1.0);
            let allowed = demo.shader.uniform_names();
            for draw in &recorder.draws {
                assert_eq!(draw.shader, Some(demo.shader));
                let names: Vec<&str> = draw.uniforms.keys().map(String::as_str).collect();
                let mut expected = allowed.to_vec();
                expected.sort_unstable();
                assert_eq!(names, expected, "{}", demo.name);
            }
        }
    }

    #[test]
    fn robot_sends_combined_matrix_and_color() {
        let recorder = record(&ROBOT, 0.0);
        let camera = ROBOT.camera(ASPECT);
        let pv = camera.projection_matrix() * camera.view_matrix();

        for (draw, part) in recorder.draws.iter().zip(ROBOT.parts) {
            let expected = pv * part.model_matrix(0.0);
            assert!(mat(draw, "pvmr_matrix").abs_diff_eq(expected, 1e-5), "{}", part.name);
            assert_eq!(draw.mesh.label, "Cube");
            assert_eq!(draw.raster, Some(RasterState::DEPTH_AND_CULL));
        }

        assert_eq!(vec(&recorder.draws[0], "color"), Vec3::new(1.0, 0.5, 0.0));
        assert_eq!(vec(&recorder.draws[1], "color"), Vec3::new(0.0, 1.0, 1.0));
        assert_eq!(vec(&recorder.draws[2], "color"), Vec3::new(0.5, 0.0, 1.0));
        assert_eq!(vec(&recorder.draws[5], "color"), Vec3::new(1.0, 0.0, 0.5));
    }

    #[test]
    fn robot_left_arm_is_translate_rotate_scale() {
        let recorder = record(&ROBOT, 0.0);
        let camera = ROBOT.camera(ASPECT);
        let pv = camera.projection_matrix() * camera.view_matrix();

        let model = Mat4::from_translation(Vec3::new(-2.5, 4.0, 0.0))
            * Mat4::from_rotation_z((-45.0_f32).to_radians())
            * Mat4::from_scale(Vec3::new(0.75, 2.5, 0.75));
        assert!(mat(&recorder.draws[2], "pvmr_matrix").abs_diff_eq(pv * model, 1e-5));
    }

    #[test]
    fn phong_sends_separate_matrices() {
        let recorder = record(&PHONG, 0.0);
        let camera = PHONG.camera(ASPECT);

        for draw in &recorder.draws {
            assert_eq!(mat(draw, "P"), camera.projection_matrix());
            assert_eq!(mat(draw, "V"), camera.view_matrix());
            assert_eq!(vec(draw, "camera_position"), Vec3::new(-30.0, 5.0, -30.0));
            assert_eq!(vec(draw, "material_ambient"), Vec3::new(0.2, 0.1, 0.0));
            assert_eq!(vec(draw, "material_diffuse"), Vec3::new(1.0, 0.5, 0.0));
            assert_eq!(draw.uniform("material_shininess"), Some(UniformValue::Float(32.0)));
        }

        let right_leg = Mat4::from_translation(Vec3::new(2.0, -2.0, 0.0))
            * Mat4::from_scale(Vec3::new(1.0, 3.0, 1.0))
            * Mat4::from_rotation_z((-30.0_f32).to_radians());
        assert!(mat(&recorder.draws[5], "M").abs_diff_eq(right_leg, 1e-6));
    }

    #[test]
    fn shapes_spin_with_time() {
        let time = 7.5;
        let recorder = record(&SHAPES, time);
        let angle = 0.2 * time;

        let head = &recorder.draws[0];
        let body = &recorder.draws[1];
        assert_eq!(head.mesh.label, "Pyramid");
        assert_eq!(body.mesh.label, "Cylinder");
        assert_eq!(head.raster, Some(RasterState::DEPTH_ONLY));

        let head_model = Mat4::from_translation(Vec3::new(0.0, 5.0, 0.0))
            * Mat4::from_rotation_y(angle)
            * Mat4::from_scale(Vec3::splat(1.5));
        let body_model = Mat4::from_translation(Vec3::new(0.0, 1.2, 0.0))
            * Mat4::from_scale(Vec3::new(2.0, 4.0, 2.0))
            * Mat4::from_rotation_y(angle);
        assert!(mat(head, "M").abs_diff_eq(head_model, 1e-5));
        assert!(mat(body, "M").abs_diff_eq(body_model, 1e-5));

        assert_eq!(vec(head, "material_ambient"), Vec3::new(0.2, 2.0, 0.0));
        assert_eq!(vec(body, "material_diffuse"), Vec3::new(2.0, 1.0, 1.0));
    }

    #[test]
    fn stats_count_draws_and_triangles() {
        let mut recorder = FrameRecorder::new();
        let meshes = MeshSet::upload(&mut recorder, 20);

        let stats = draw_frame(&mut recorder, &SHAPES, &meshes, ASPECT, 0.0).unwrap();
        assert_eq!(stats, FrameStats { draw_calls: 2, triangles: 6 + 80 });

        let stats = draw_frame(&mut recorder, &ROBOT, &meshes, ASPECT, 0.0).unwrap();
        assert_eq!(stats, FrameStats { draw_calls: 6, triangles: 6 * 12 });
    }

    #[test]
    fn rebuilding_cylinder_replaces_the_mesh() {
        let mut recorder = FrameRecorder::new();
        let mut meshes = MeshSet::upload(&mut recorder, 20);
        assert_eq!(recorder.meshes.len(), 3);

        meshes.rebuild_cylinder(&mut recorder, 20);
        assert_eq!(recorder.meshes.len(), 3);

        meshes.rebuild_cylinder(&mut recorder, 8);
        assert_eq!(recorder.meshes.len(), 4);
        assert_eq!(meshes.cylinder.triangles, 32);
        assert_eq!(meshes.cylinder.handle.index_count, 96);
    }
}
