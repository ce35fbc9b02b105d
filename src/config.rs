use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub(crate) const DATA_FILE: &str = "processed_data.csv";
pub(crate) const DEFAULT_ALERT_DAYS: u64 = 30;

const ENV_DATA: &str = "EMPENHOS_DATA";
const ENV_EXPORT_DIR: &str = "EMPENHOS_EXPORT_DIR";
const ENV_ALERT_DAYS: &str = "EMPENHOS_ALERT_DAYS";

/// Flags accepted by every command, consumed before dispatch.
const GLOBAL_FLAGS: &[&str] = &["--data"];

/// Startup settings, resolved once from flags, environment and defaults.
#[derive(Debug, Clone)]
pub(crate) struct Config {
    pub(crate) data_path: PathBuf,
    pub(crate) export_dir: PathBuf,
    pub(crate) log_path: Option<PathBuf>,
    pub(crate) alert_days: u64,
}

impl Config {
    pub(crate) fn resolve(args: &[String]) -> Result<Self> {
        let data_dir = data_dir();
        let env = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());

        let data_path = flag_value(args, "--data")
            .map(PathBuf::from)
            .or_else(|| env(ENV_DATA).map(PathBuf::from))
            .unwrap_or_else(|| default_data_path(Path::new("."), data_dir.as_deref()));

        let export_dir = env(ENV_EXPORT_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        let alert_days = match env(ENV_ALERT_DAYS) {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("{ENV_ALERT_DAYS} must be a whole number of days, got '{raw}'"))?,
            None => DEFAULT_ALERT_DAYS,
        };

        Ok(Self {
            data_path,
            export_dir,
            log_path: data_dir.map(|d| d.join("empenhos.log")),
            alert_days,
        })
    }
}

/// `./processed_data.csv` if present, else the copy in the per-user data
/// directory if present, else the working-directory path (so the load error
/// names the expected location).
fn default_data_path(cwd: &Path, data_dir: Option<&Path>) -> PathBuf {
    let local = cwd.join(DATA_FILE);
    if local.exists() {
        return local;
    }
    data_dir
        .map(|d| d.join(DATA_FILE))
        .filter(|p| p.exists())
        .unwrap_or(local)
}

fn data_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("br", "empenhos", "Empenhos").map(|p| p.data_dir().to_path_buf())
}

/// Value following `name` in `args`, e.g. `--sector TI`.
pub(crate) fn flag_value<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == name)
        .map(|w| w[1].as_str())
}

/// `args` without the global flags and their values.
pub(crate) fn strip_global_flags(args: &[String]) -> Vec<String> {
    let mut out = Vec::with_capacity(args.len());
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if GLOBAL_FLAGS.contains(&arg.as_str()) {
            iter.next();
        } else {
            out.push(arg.clone());
        }
    }
    out
}
