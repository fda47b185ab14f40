mod application;
mod config;
mod domain;
mod infrastructure;
mod presentation;

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use application::{AlbumUseCase, CreateProfileUseCase, GalleryStatsUseCase, ListTravellersUseCase, ViewRegistry};
use config::Config;
use infrastructure::{build_client, HttpPhotoSource, PlaceholderDirectory, SignedSessionStore};
use presentation::{app_router, AppState};

use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::load();

    // Initialize Infrastructure
    let http = build_client(config.http_timeout);
    let photo_source = Arc::new(HttpPhotoSource::new(http.clone(), config.photos_url.clone()));
    let directory = Arc::new(PlaceholderDirectory::new(http, config.placeholder_api_url.clone()));
    let sessions = Arc::new(SignedSessionStore::new());
    let views = Arc::new(ViewRegistry::new(sessions.clone()));

    info!("Photo listing at {}", config.photos_url);
    info!("Placeholder directory at {}", config.placeholder_api_url);

    // Initialize Use Cases
    let state = AppState {
        album_use_case: Arc::new(AlbumUseCase::new(photo_source, views)),
        travellers_use_case: Arc::new(ListTravellersUseCase::new(directory.clone())),
        stats_use_case: Arc::new(GalleryStatsUseCase::new(directory.clone())),
        profile_use_case: Arc::new(CreateProfileUseCase::new(directory)),
        sessions,
    };

    // Anything outside /api falls through to the single-page frontend
    let serve_frontend = ServeDir::new(&config.frontend_dir)
        .not_found_service(ServeFile::new(format!("{}/index.html", config.frontend_dir)));

    let app = Router::new()
        .nest("/api", app_router(state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .fallback_service(serve_frontend);

    let listener = TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;

    info!("Server running on http://0.0.0.0:{}", config.port);
    axum::serve(listener, app).await?;

    Ok(())
}
