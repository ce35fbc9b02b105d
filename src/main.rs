mod config;
mod export;
mod filter;
mod import;
mod logging;
mod metrics;
mod models;
mod present;
mod run;
mod ui;

use anyhow::Result;

use config::Config;
use logging::LogTarget;

fn main() -> Result<()> {
    let raw: Vec<String> = std::env::args().collect();
    let config = Config::resolve(&raw)?;
    let args = config::strip_global_flags(&raw);

    match args.len() {
        1 => {
            logging::init(LogTarget::File(config.log_path.as_deref()));
            let table = run::load_table(&config)?;
            run::as_tui(table, &config)
        }
        2.. => {
            logging::init(LogTarget::Stderr);
            run::as_cli(&args, &config)
        }
        _ => {
            eprintln!("Usage: empenhos [command]");
            Ok(())
        }
    }
}
