pub mod camera;
pub mod context;
pub mod gpu;
pub mod recorder;

pub use camera::Camera;
pub use context::{RasterState, RenderContext, RenderError, ShaderVariant};
pub use gpu::GpuState;
pub use recorder::FrameRecorder;
