use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tourbook::cache::{start_cache_warmer, AppCache};
use tourbook::config::Config;
use tourbook::{build_router_with_cors, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("tourbook=info,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("loading configuration")?;

    let db = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .context("connecting to database")?;

    if config.run_migrations {
        sqlx::migrate!("./migrations")
            .run(&db)
            .await
            .context("running migrations")?;
        info!("Migrations applied");
    }

    let cache = AppCache::new(config.catalog_refresh * 2);
    tokio::spawn(start_cache_warmer(
        cache.clone(),
        db.clone(),
        config.catalog_refresh,
    ));

    let state = AppState { db, cache };
    let app = build_router_with_cors(state, config.cors_allowed_origin.as_deref());

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;
    info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
