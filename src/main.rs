use hikelog::config::AppConfig;
use hikelog::error::AppError;
use hikelog::routes::create_router;
use hikelog::state::AppState;
use hikelog::store;
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_logging();

    let config = AppConfig::from_env()?;
    info!(
        store = %config.redacted_database_url(),
        timeout = ?config.store_timeout,
        "connecting document store"
    );
    let store = match store::connect(&config).await {
        Ok(store) => store,
        Err(err) => {
            error!("document store unavailable: {err}");
            return Err(err.into());
        }
    };

    let state = AppState::new(config.clone(), store);
    let app = create_router(state);

    let listener = TcpListener::bind(config.listen_addr).await?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);
    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,hikelog=debug,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
