pub mod demos;
pub mod frame;
pub mod part;

pub use demos::{DEMOS, DemoKind, demo};
pub use frame::{FrameStats, MeshSet, draw_frame};
pub use part::MeshKind;
