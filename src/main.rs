use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cinemood_api::{
    api::{create_router, AppState},
    catalog::Catalog,
    config::Config,
    services::{RecommendationSession, RemoteRecommender, Scorer},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("cinemood_api=info,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let catalog = match &config.catalog_path {
        Some(path) => Catalog::from_path(path)?,
        None => Catalog::builtin(),
    };

    for (movie_id, missing) in catalog.gaps() {
        tracing::warn!(
            movie_id = movie_id,
            missing = ?missing,
            "Catalog entry lacks affinities, they will score as zero"
        );
    }

    let scorer = Scorer::with_ceiling(config.normalization_ceiling)?;
    let provider = Arc::new(RemoteRecommender::new(config.recommender_url.clone()));
    let session = Arc::new(RecommendationSession::new(
        provider,
        Arc::new(catalog),
        scorer,
    ));

    if config.probe_on_startup {
        tracing::info!(
            recommender_url = %config.recommender_url,
            "Probing recommendation service in the background"
        );
        session.spawn_probe();
    }

    let app = create_router(AppState::new(session, config.default_limit));

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!(addr = %config.bind_addr(), "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
