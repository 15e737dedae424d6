use std::process::ExitCode;

use tracing::{error, info};

use boards::{AppState, Config, Database, WebServer};

#[tokio::main]
async fn main() -> ExitCode {
    // Load configuration
    let config = match Config::load_with_env("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            let mut config = Config::default();
            config.apply_env_overrides();
            config
        }
    };

    // Initialize logging
    if let Err(e) = boards::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        boards::logging::init_console_only(&config.logging.level);
    }

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> boards::Result<()> {
    config.validate()?;

    info!("Boards - {}", config.site.name);

    let db = Database::open(&config.database.path).await?;
    info!("Database opened at {}", config.database.path);

    let state = AppState::from_config(&config, db)?;
    let server = WebServer::new(&config.server, state)?;

    server.run().await?;
    Ok(())
}
