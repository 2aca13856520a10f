use crate::config::Config;
use log::LevelFilter;
use simplelog::{self, ColorChoice, ConfigBuilder, TerminalMode};

/// Modules to filter out from logging when not in Trace mode.
/// The HTTP stack logs every connection and frame at DEBUG, which buries the
/// per-value lines the sequence producers write.
const FILTERED_MODULES: &[&str] = &["tower", "tower_http", "hyper", "hyper_util", "h2", "axum"];

/// Everything the terminal logger is built from, derived from `Config`.
#[derive(Debug, Clone, PartialEq)]
pub struct LogSettings {
    pub level: LevelFilter,
    pub filter_dependencies: bool,
    pub color: bool,
}

impl LogSettings {
    /// Trace shows dependency logs too; production output goes to a log
    /// collector, so it is never colored.
    pub fn from_config(config: &Config) -> Self {
        Self {
            level: config.log_level_filter,
            filter_dependencies: config.log_level_filter != LevelFilter::Trace,
            color: !config.is_production(),
        }
    }

    fn color_choice(&self) -> ColorChoice {
        if self.color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        }
    }

    fn simplelog_level(&self) -> simplelog::LevelFilter {
        match self.level {
            LevelFilter::Off => simplelog::LevelFilter::Off,
            LevelFilter::Error => simplelog::LevelFilter::Error,
            LevelFilter::Warn => simplelog::LevelFilter::Warn,
            LevelFilter::Info => simplelog::LevelFilter::Info,
            LevelFilter::Debug => simplelog::LevelFilter::Debug,
            LevelFilter::Trace => simplelog::LevelFilter::Trace,
        }
    }

    fn simplelog_config(&self) -> simplelog::Config {
        let mut builder = ConfigBuilder::new();
        builder.set_time_format_rfc3339();

        if self.filter_dependencies {
            for module in FILTERED_MODULES {
                builder.add_filter_ignore_str(module);
            }
        }

        builder.build()
    }
}

pub struct Logger {}

impl Logger {
    /// Initializes the global terminal logger. Panics if a logger is already set.
    pub fn init_logger(config: &Config) {
        let settings = LogSettings::from_config(config);

        simplelog::TermLogger::init(
            settings.simplelog_level(),
            settings.simplelog_config(),
            TerminalMode::Mixed,
            settings.color_choice(),
        )
        .expect("Failed to start simplelog");
    }
}
