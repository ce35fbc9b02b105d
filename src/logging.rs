use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Where log output goes for this run.
pub(crate) enum LogTarget<'a> {
    /// One-shot CLI commands.
    Stderr,
    /// The TUI owns the terminal, so logs go to a file (or nowhere).
    File(Option<&'a Path>),
}

pub(crate) fn init(target: LogTarget<'_>) {
    let filter = |default: &str| {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
    };

    let result = match target {
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_env_filter(filter("warn"))
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init(),
        LogTarget::File(Some(path)) => {
            if let Some(dir) = path.parent() {
                let _ = std::fs::create_dir_all(dir);
            }
            match OpenOptions::new().create(true).append(true).open(path) {
                Ok(file) => tracing_subscriber::fmt()
                    .with_env_filter(filter("info"))
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .try_init(),
                Err(_) => return,
            }
        }
        LogTarget::File(None) => return,
    };

    if let Err(e) = result {
        eprintln!("Warning: logging disabled: {e}");
    }
}
