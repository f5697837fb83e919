use crate::FailResult;
use crate::env;

use std::fmt;
use std::path::{Path, PathBuf};
use log::{Level, LevelFilter};

/// Builder-style setup for logging
#[derive(Debug, Clone, Default)]
pub struct GlobalLogger {
    path: Option<PathBuf>,
    verbosity: Verbosity,
}

impl GlobalLogger {
    /// Also append log output to a file.
    pub fn path<P: AsRef<Path>>(&mut self, path: P) -> &mut Self
    { self.path = Some(path.as_ref().to_owned()); self }

    /// Any integer will be accepted; the level will be truncated
    /// to the most extreme value supported.
    pub fn verbosity(&mut self, level: i32) -> &mut Self
    {
        self.verbosity = match level {
            l if l <= 0 => Verbosity::Default,
            1 => Verbosity::Loud,
            _ => Verbosity::Louder,
        };
        self
    }

    /// Install the logger. Fails if a logger was already installed.
    pub fn apply(&mut self) -> FailResult<()>
    {Ok({
        use std::time::Instant;

        let start = Instant::now();
        let show_target = env::log_mod()?;
        let (default_level, crate_levels) = self.verbosity.levels();
        let mut fern = fern::Dispatch::new();
        fern = fern.format(move |out, message, record| {
                let t = start.elapsed();
                let target = match show_target {
                    true => format!("[{}]", record.target()),
                    false => String::new(),
                };
                out.finish(format_args!("[{:>4}.{:03}s]{}[{}] {}",
                    t.as_secs(),
                    t.subsec_millis(),
                    target,
                    ColorizedLevel(record.level()),
                    message))
            })
            .level(default_level)
            .chain(std::io::stderr());
        for &(module, level) in &crate_levels {
            fern = fern.level_for(module, level);
        }

        if let Some(path) = self.path.as_ref() {
            fern = fern.chain(fern::log_file(path)?);
        }

        fern.apply()?;
    })}
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Verbosity { Default, Loud, Louder }

impl Default for Verbosity {
    fn default() -> Self { Verbosity::Default }
}

impl Verbosity {
    /// The level for other crates, then levels for our own.
    fn levels(self) -> (LevelFilter, [(&'static str, LevelFilter); 2]) {
        let (other, tasks, linalg) = match self {
            Verbosity::Default => (LevelFilter::Info, LevelFilter::Debug, LevelFilter::Info),
            Verbosity::Loud => (LevelFilter::Info, LevelFilter::Trace, LevelFilter::Debug),
            Verbosity::Louder => (LevelFilter::Debug, LevelFilter::Trace, LevelFilter::Trace),
        };
        (other, [("matops_tasks", tasks), ("matops_linalg", linalg)])
    }
}

#[derive(Debug, Copy, Clone)]
pub struct ColorizedLevel(pub Level);
impl fmt::Display for ColorizedLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let style = match self.0 {
            Level::Error => ansi_term::Colour::Red.bold(),
            Level::Warn  => ansi_term::Colour::Red.normal(),
            Level::Info  => ansi_term::Colour::Cyan.bold(),
            Level::Debug => ansi_term::Colour::Yellow.dimmed(),
            Level::Trace => ansi_term::Colour::Cyan.normal(),
        };
        write!(f, "{}", style.paint(self.0.to_string()))
    }
}
