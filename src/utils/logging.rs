// Mon Jan 19 2026 - Alex

use colored::*;
use log::{Level, LevelFilter};
use std::io::Write;

pub struct LoggingUtils;

impl LoggingUtils {
    /// Installs an `env_logger` that writes colored level tags to stderr.
    /// `RUST_LOG` still refines the filter.
    pub fn init_logger(level: LevelFilter, use_color: bool) {
        env_logger::Builder::new()
            .filter_level(level)
            .parse_default_env()
            .format(move |buf, record| {
                let tag = if use_color {
                    format_level(record.level()).to_string()
                } else {
                    format!("{:5}", record.level())
                };
                let target = if use_color {
                    format!("[{}]", record.target()).dimmed().to_string()
                } else {
                    format!("[{}]", record.target())
                };
                writeln!(buf, "{} {} {}", tag, target, record.args())
            })
            .try_init()
            .ok();
    }

    pub fn level_from_str(s: &str) -> LevelFilter {
        match s.to_lowercase().as_str() {
            "error" => LevelFilter::Error,
            "warn" | "warning" => LevelFilter::Warn,
            "info" => LevelFilter::Info,
            "debug" => LevelFilter::Debug,
            "trace" => LevelFilter::Trace,
            "off" => LevelFilter::Off,
            _ => LevelFilter::Info,
        }
    }

    /// `-v` steps up from the configured level, one level per flag.
    pub fn level_from_verbosity(base: LevelFilter, verbosity: usize) -> LevelFilter {
        let levels = [
            LevelFilter::Off,
            LevelFilter::Error,
            LevelFilter::Warn,
            LevelFilter::Info,
            LevelFilter::Debug,
            LevelFilter::Trace,
        ];
        let start = levels.iter().position(|l| *l == base).unwrap_or(2);
        levels[(start + verbosity).min(levels.len() - 1)]
    }
}

fn format_level(level: Level) -> ColoredString {
    match level {
        Level::Error => "ERROR".red().bold(),
        Level::Warn => "WARN ".yellow().bold(),
        Level::Info => "INFO ".green().bold(),
        Level::Debug => "DEBUG".blue().bold(),
        Level::Trace => "TRACE".magenta().bold(),
    }
}

pub struct ScopedTimer {
    name: String,
    start: std::time::Instant,
}

impl ScopedTimer {
    pub fn new(name: &str) -> Self {
        log::debug!("[TIMER] {} started", name);
        Self {
            name: name.to_string(),
            start: std::time::Instant::now(),
        }
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        log::debug!("[TIMER] {} took {:.2}ms", self.name, elapsed.as_secs_f64() * 1000.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_str() {
        assert_eq!(LoggingUtils::level_from_str("WARNING"), LevelFilter::Warn);
        assert_eq!(LoggingUtils::level_from_str("trace"), LevelFilter::Trace);
        assert_eq!(LoggingUtils::level_from_str("bogus"), LevelFilter::Info);
    }

    #[test]
    fn test_level_from_verbosity() {
        assert_eq!(LoggingUtils::level_from_verbosity(LevelFilter::Warn, 0), LevelFilter::Warn);
        assert_eq!(LoggingUtils::level_from_verbosity(LevelFilter::Warn, 2), LevelFilter::Debug);
        assert_eq!(LoggingUtils::level_from_verbosity(LevelFilter::Info, 9), LevelFilter::Trace);
    }
}
