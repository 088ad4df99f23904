use std::str::FromStr;

use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;

use crate::types::config::{colors_enabled, config};

/// Install the global logger. Info lines are printed bare since they carry
/// the command output; other levels are prefixed with their level.
pub fn init_logging() {
    let level = LevelFilter::from_str(config().log().level()).unwrap_or(LevelFilter::Info);
    let use_color = colors_enabled();
    let colors = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .debug(Color::Cyan)
        .trace(Color::BrightBlack);

    let result = fern::Dispatch::new()
        .format(move |out, message, record| {
            if record.level() == log::Level::Info {
                out.finish(format_args!("{message}"))
            } else if use_color {
                out.finish(format_args!("[{}] {message}", colors.color(record.level())))
            } else {
                out.finish(format_args!("[{}] {message}", record.level()))
            }
        })
        .level(level)
        .chain(std::io::stderr())
        .apply();

    if let Err(e) = result {
        eprintln!("Failed to initialize logging: {e}");
    }
}
