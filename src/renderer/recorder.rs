use std::collections::BTreeMap;

use crate::geometry::TriangleMesh;
use crate::renderer::context::{
    RasterState, RenderContext, RenderError, ShaderVariant, UniformValue, check_uniform,
};

#[derive(Clone, Debug, PartialEq)]
pub struct RecordedMesh {
    pub label: String,
    pub vertex_count: usize,
    pub index_count: usize,
}

#[derive(Clone, Debug)]
pub struct RecordedDraw {
    pub mesh: RecordedMesh,
    pub shader: Option<ShaderVariant>,
    pub raster: Option<RasterState>,
    pub uniforms: BTreeMap<String, UniformValue>,
}

impl RecordedDraw {
    pub fn uniform(&self, name: &str) -> Option<UniformValue> {
        self.uniforms.get(name).copied()
    }
}

/// In-memory [`RenderContext`] that keeps every draw with a snapshot of the
/// uniforms current at that point.
#[derive(Default)]
pub struct FrameRecorder {
    pub meshes: Vec<RecordedMesh>,
    pub clear_color: Option<[f32; 4]>,
    pub raster: Option<RasterState>,
    pub shader: Option<ShaderVariant>,
    pub uniforms: BTreeMap<String, UniformValue>,
    pub draws: Vec<RecordedDraw>,
}

impl FrameRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log_frame(&self) {
        log::info!(
            "frame: clear {:?}, raster {:?}, program {:?}, {} draws",
            self.clear_color,
            self.raster,
            self.shader,
            self.draws.len()
        );
        for (i, draw) in self.draws.iter().enumerate() {
            log::info!(
                "  draw {i}: {} ({} indices) {:?} {:?}",
                draw.mesh.label,
                draw.mesh.index_count,
                draw.shader,
                draw.raster
            );
            // Values left over from another program stay bound but are not
            // read by this one.
            match draw.shader {
                Some(shader) => {
                    for name in shader.uniform_names() {
                        if let Some(value) = draw.uniform(name) {
                            log::info!("    {name} = {value:?}");
                        }
                    }
                }
                None => {
                    for (name, value) in &draw.uniforms {
                        log::info!("    {name} = {value:?}");
                    }
                }
            }
        }
    }
}

impl RenderContext for FrameRecorder {
    type Mesh = RecordedMesh;

    fn upload_mesh(&mut self, label: &str, mesh: &TriangleMesh) -> RecordedMesh {
        let recorded = RecordedMesh {
            label: label.to_string(),
            vertex_count: mesh.vertex_count(),
            index_count: mesh.indices.len(),
        };
        log::trace!("upload {label}: {} vertices", recorded.vertex_count);
        self.meshes.push(recorded.clone());
        recorded
    }

    fn clear(&mut self, color: [f32; 4]) {
        log::trace!("clear {color:?}");
        self.clear_color = Some(color);
    }

    fn set_raster_state(&mut self, state: RasterState) {
        log::trace!("raster {state:?}");
        self.raster = Some(state);
    }

    fn use_program(&mut self, shader: ShaderVariant) {
        log::trace!("program {shader:?}");
        self.shader = Some(shader);
    }

    fn write_uniform(&mut self, name: &str, value: UniformValue) -> Result<(), RenderError> {
        // Without a bound program nothing can be checked; a missing
        // `use_program` shows up as `shader: None` in the draw instead.
        if let Some(shader) = self.shader {
            check_uniform(shader, name, &value)?;
        }
        log::trace!("uniform {name} = {value:?}");
        self.uniforms.insert(name.to_string(), value);
        Ok(())
    }

    fn draw_indexed(&mut self, mesh: &RecordedMesh) {
        log::trace!("draw {}", mesh.label);
        self.draws.push(RecordedDraw {
            mesh: mesh.clone(),
            shader: self.shader,
            raster: self.raster,
            uniforms: self.uniforms.clone(),
        });
    }
}
