use crate::config::AppConfig;
use crate::scene::DemoKind;

pub struct UiState {
    pub demo: DemoKind,
    pub segments: u32,
    pub paused: bool,
    pub vsync_enabled: bool,
    pub show_stats: bool,
}

impl From<&AppConfig> for UiState {
    fn from(config: &AppConfig) -> Self {
        Self {
            demo: config.demo,
            segments: config.segments,
            paused: false,
            vsync_enabled: config.vsync,
            show_stats: true,
        }
    }
}
