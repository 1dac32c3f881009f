use std::path::PathBuf;
use tracing::{error, info};

use littlewins_infrastructure::logging::{init_console_logger, init_logger, LoggerOptions};
use littlewins_lib::application::config::AppConfig;
use littlewins_lib::presentation::bootstrap::{build_app_state, Storage};
use littlewins_lib::presentation::cli::Cli;
use littlewins_lib::presentation::commands;

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();

    let config_path = cli.config.clone().unwrap_or_else(AppConfig::default_path);
    let loaded = match AppConfig::load(&config_path) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("❌ Failed to read config {:?}: {}", config_path, e);
            std::process::exit(1);
        }
    };
    let mut config = loaded.config.clone();
    if let Some(user) = &cli.user {
        config.user_id = Some(user.clone());
    }
    if let Some(db) = &cli.db {
        config.database_path = Some(db.clone());
    }

    let level = if cli.verbose {
        "debug"
    } else {
        config.log_level.as_str()
    };
    init_logging(AppConfig::log_dir(), level, cli.verbose);
    info!(config = %config_path.display(), "Little Wins starting");
    loaded.log(&config_path);

    let storage = if cli.memory {
        Storage::InMemory
    } else {
        Storage::Sqlite
    };

    let mut state = match build_app_state(config, storage).await {
        Ok(state) => state,
        Err(e) => {
            error!("Failed to initialize: {}", e);
            eprintln!("❌ Failed to initialize: {}", e);
            std::process::exit(1);
        }
    };

    let mut stdout = std::io::stdout();
    if commands::execute(cli.command, &mut state, &mut stdout)
        .await
        .is_err()
    {
        std::process::exit(1);
    }
}

fn init_logging(log_dir: PathBuf, level: &str, console: bool) {
    let options = LoggerOptions {
        log_dir,
        level: level.to_string(),
        console,
    };
    if let Err(e) = init_logger(options) {
        eprintln!("Failed to initialize logger: {}", e);
        init_console_logger(level);
    }
}
