use tracing::{error, info, Level};

use crypto_track::{
    cache::Cache,
    configuration::{get_configuration, set_configuration, AppState, Config, State},
    error::Error,
    handler::crypto_refresh,
    provider::{DatabasePool, MarketProvider},
    server,
};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let result = app_main().await;

    if let Err(err) = &result {
        error!("{}", err);
    }

    result
}

async fn app_main() -> Result<(), Error> {
    let subscriber = tracing_subscriber::fmt()
        .compact()
        .with_level(true)
        .with_max_level({
            #[cfg(debug_assertions)]
            {
                Level::DEBUG
            }

            #[cfg(not(debug_assertions))]
            {
                Level::INFO
            }
        })
        .with_file(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting CryptoTracker API Server");

    let (config, database) = match init().await {
        Ok((config, database)) => (config, database),
        Err(e) => return Err(Error::ConfigurationError(e.to_string())),
    };

    let cache = Cache::connect(&config).await;
    let provider = MarketProvider::new(config.clone())?;
    provider.test_connection().await;

    let state = State::new(config, database, cache, provider);
    let app_state = AppState::new(state);

    info!("Fetching initial cryptocurrency data");
    if let Err(e) = crypto_refresh::update_crypto_data(&app_state).await {
        error!("Initial cryptocurrency update failed: {}", e);
    }

    info!(
        "Cryptocurrency data ready (cache: {})",
        if app_state.cache.is_enabled() {
            "enabled"
        } else {
            "disabled"
        }
    );

    tokio::select! {
        result = run(app_state.clone()) => result?,
        result = shutdown_signal() => {
            result?;
            info!("Shutdown signal received, shutting down");
        },
    }

    app_state.cache.close().await;
    app_state.database.close().await;

    Ok(())
}

async fn run(app_state: AppState<State>) -> Result<(), Error> {
    let (_, _) = tokio::try_join!(
        server::server_task(&app_state),
        crypto_refresh::crypto_refresh_task(app_state.clone()),
    )?;

    Ok(())
}

/// Loads configuration and verifies the database. Any failure here is the
/// only fatal condition at boot.
async fn init() -> Result<(Config, DatabasePool), Error> {
    set_configuration()?;
    let config = get_configuration()?;
    let database = DatabasePool::new(&config).await?;
    database.ping().await?;
    database.init_migrations().await?;

    let stored = database.cryptocurrency.count().await?;
    info!("Database holds {} cryptocurrencies", stored);

    Ok((config, database))
}

async fn shutdown_signal() -> Result<(), Error> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut terminate = signal(SignalKind::terminate())?;
        tokio::select! {
            result = tokio::signal::ctrl_c() => result?,
            _ = terminate.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await?;
    }

    Ok(())
}
