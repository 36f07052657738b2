use std::sync::Arc;

use tokio::signal;
use tracing::{error, info};

use pop_server::adapter::http::{serve, AppState};
use pop_server::adapter::sqlite::{create_pool, run_migrations, SqlitePostStore};
use pop_server::config::Config;
use pop_server::service::{PostAnalyzer, ProviderSet};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let config = match Config::load("config.toml") {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            std::process::exit(1);
        }
    };

    config.init_logging();
    info!("pop-server starting");

    let pool = create_pool(&config.database.url)?;
    run_migrations(&pool)?;

    let state = AppState {
        analyzer: Arc::new(PostAnalyzer::new(ProviderSet::from_env(&config.llm))),
        store: Arc::new(SqlitePostStore::new(pool)),
    };

    tokio::select! {
        result = serve(&config.server.bind_addr, state) => {
            if let Err(e) = result {
                error!(error = %e, "Fatal error");
                std::process::exit(1);
            }
        }
        _ = signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }

    info!("pop-server stopped");
    Ok(())
}
