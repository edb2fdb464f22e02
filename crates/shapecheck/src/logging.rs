use clap::ValueEnum;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

/// Crates whose events reach stderr. Everything else stays silent.
const LOG_TARGETS: [&str; 3] = ["shapecheck", "shapecheck_pattern", "shapecheck_value"];

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_filter(self) -> LevelFilter {
        match self {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

fn targets(level: LogLevel) -> Targets {
    LOG_TARGETS
        .iter()
        .fold(Targets::new(), |targets, target| {
            targets.with_target(*target, level.as_filter())
        })
}

/// Install the stderr subscriber. Matcher dispatch is only visible at `trace`.
pub fn init_logging(format: LogFormat, level: LogLevel) {
    let show_target = level.as_filter() >= LevelFilter::DEBUG;
    let layer = match format {
        LogFormat::Text => tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .with_target(show_target)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(show_target)
            .boxed(),
    };

    let _ = tracing_subscriber::registry()
        .with(layer.with_filter(targets(level)))
        .try_init();
}

#[cfg(test)]
mod tests {
    use tracing::Level;

    use super::*;

    #[test]
    fn targets_scope_to_workspace_crates() {
        let filter = targets(LogLevel::Debug);
        assert!(filter.would_enable("shapecheck_pattern::registry", &Level::DEBUG));
        assert!(!filter.would_enable("shapecheck_pattern::matcher", &Level::TRACE));
        assert!(!filter.would_enable("regex::compile", &Level::ERROR));
    }

    #[test]
    fn off_disables_everything() {
        let filter = targets(LogLevel::Off);
        assert!(!filter.would_enable("shapecheck", &Level::ERROR));
    }
}
