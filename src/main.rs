mod advice;
mod analytics;
mod config;
mod db;
mod export;
mod logging;
mod models;
mod persist;
mod run;
mod store;
mod ui;

use anyhow::{Context, Result};
use tracing::info;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    let paths = config::AppPaths::discover()?;
    paths.ensure_data_dir()?;
    let config = config::AppConfig::load(&paths.config_path())?.from_process_env();

    logging::init_file_logging(&paths.log_path(), &config.log_filter);
    info!(version = env!("CARGO_PKG_VERSION"), "fintrack starting");

    let mut state = persist::open_state(&paths.db_path());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    let gateway = advice::AdviceGateway::from_config(&config.ai);

    match args.len() {
        1 => {
            let insights = advice::InsightDispatcher::new(gateway, runtime.handle().clone());
            run::as_tui(&mut state, insights)
        }
        2.. => run::as_cli(&args, &mut state, &gateway, runtime.handle()),
        _ => {
            eprintln!("Usage: fintrack [command]");
            Ok(())
        }
    }
}
