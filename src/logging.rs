use std::sync::Once;

/// `filter` uses `env_logger` syntax, e.g. `"debug"` or `"shapes3d=debug,wgpu=warn"`.
#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    pub filter: Option<String>,
}

static INIT: Once = Once::new();

/// Installs the global logger. Later calls do nothing.
///
/// Filter precedence: `config.filter`, then `RUST_LOG`, then `info` with wgpu
/// quieted to `warn`.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = config.filter {
            builder.parse_filters(&filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder
                .filter_level(log::LevelFilter::Info)
                .filter_module("wgpu_core", log::LevelFilter::Warn)
                .filter_module("wgpu_hal", log::LevelFilter::Warn)
                .filter_module("naga", log::LevelFilter::Warn);
        }

        builder.init();
        log::debug!("logging initialized");
    });
}
