use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use itinerary_api::{
    config::Config,
    db::{create_redis_client, Cache, MemorySessionStore, RedisSessionStore, SessionStore},
    routes::{create_router, AppState},
    services::{
        identity::GoogleIdentityVerifier, providers::GooglePlacesProvider, AuthService,
        FlowOrchestrator, FlowSettings,
    },
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("itinerary_api=debug,tower_http=debug"))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = Config::from_env()?;

    let provider = Arc::new(GooglePlacesProvider::new(
        config.google_maps_api_key.clone(),
        config.google_maps_api_url.clone(),
        config.provider_timeout(),
    )?);
    let verifier = Arc::new(GoogleIdentityVerifier::new(
        config.tokeninfo_url.clone(),
        config.google_client_id.clone(),
        config.provider_timeout(),
    )?);

    let store: Arc<dyn SessionStore> = match &config.redis_url {
        Some(url) => {
            tracing::info!("Using Redis session cache");
            Arc::new(RedisSessionStore::new(Cache::new(create_redis_client(url)?)))
        }
        None => {
            tracing::info!("REDIS_URL not set, keeping the session in memory");
            Arc::new(MemorySessionStore::new())
        }
    };

    let auth = AuthService::restore(verifier, store, config.session_ttl()).await?;
    let flow = FlowOrchestrator::new(
        provider,
        FlowSettings {
            search_radius_meters: config.search_radius_meters,
            processing_delay: config.processing_delay(),
        },
    );

    let app = create_router(Arc::new(AppState {
        flow,
        auth: Arc::new(auth),
    }));

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
