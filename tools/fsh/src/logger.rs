use std::fmt::Display;
use std::io::Write;

use log::{Level, LevelFilter, Log};
use owo_colors::OwoColorize;

struct ShellLogger;

static LOGGER: ShellLogger = ShellLogger;

enum Color {
    BrightRed,
    BrightYellow,
    BrightBlue,
    BrightCyan,
    BrightMagenta,
}

fn paint(color: Color, text: impl Display) -> String {
    match color {
        Color::BrightRed => text.bright_red().to_string(),
        Color::BrightYellow => text.bright_yellow().to_string(),
        Color::BrightBlue => text.bright_blue().to_string(),
        Color::BrightCyan => text.bright_cyan().to_string(),
        Color::BrightMagenta => text.bright_magenta().to_string(),
    }
}

impl Log for ShellLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) { return; }
        let level = record.level();
        let prefix = paint(
            match level {
                Level::Error => Color::BrightRed,
                Level::Warn => Color::BrightYellow,
                Level::Info => Color::BrightBlue,
                Level::Debug => Color::BrightCyan,
                Level::Trace => Color::BrightMagenta,
            },
            format_args!("{level:5}"),
        );
        // A closed stderr only loses the log line.
        let _ = writeln!(std::io::stderr().lock(), "{prefix} {}", record.args());
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

pub fn init(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    log::set_max_level(level);
    log::set_logger(&LOGGER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_prefix_is_coloured() {
        let error = paint(Color::BrightRed, format_args!("{:5}", Level::Error));
        assert!(error.starts_with("\x1b[91m"), "{error:?}");
        assert!(error.contains("ERROR"));
        let info = paint(Color::BrightBlue, format_args!("{:5}", Level::Info));
        assert!(info.contains("INFO "), "{info:?}");
    }
}
