mod cli;
mod tui;

pub(crate) use cli::as_cli;
pub(crate) use tui::as_tui;

use anyhow::Result;

use crate::config::Config;
use crate::models::Table;

/// Load the dataset named by `config`. An empty file is as fatal as a
/// missing one: there is nothing to report on.
pub(crate) fn load_table(config: &Config) -> Result<Table> {
    let table = crate::import::load(&config.data_path)?;
    if table.is_empty() {
        anyhow::bail!("No records in {}", config.data_path.display());
    }
    Ok(table)
}

/// Expand a leading `~/` to the user's home directory.
pub(crate) fn shellexpand(path: &str) -> String {
    match path.strip_prefix("~/") {
        Some(rest) => directories::UserDirs::new()
            .map(|d| d.home_dir().join(rest).display().to_string())
            .unwrap_or_else(|| path.to_string()),
        None => path.to_string(),
    }
}
