mod config;
mod db;
mod entities;
mod enrich;
mod error;
mod models;
mod omdb;
mod routes;
mod store;

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    routing::{delete, get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{config::Config, omdb::OmdbClient, store::Store};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Store,
    pub omdb: Arc<OmdbClient>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,cinelist=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Arc::new(Config::from_env()?);

    let http = reqwest::Client::builder()
        .user_agent("cinelist/0.1")
        .timeout(Duration::from_secs(30))
        .build()?;

    let db = db::connect_and_migrate(&config.database_url).await?;
    let store = Store::new(db);

    let omdb = OmdbClient::new(http, config.omdb_api_key.clone(), config.omdb_base_url.clone());

    let state = Arc::new(AppState { config: config.clone(), store, omdb: Arc::new(omdb) });

    let app = Router::new()
        .route("/api/message", get(routes::message))
        .route("/api/greet/{name}", get(routes::greet))
        .route("/api/users", get(routes::list_users).post(routes::create_user))
        .route("/api/users/{user_id}", delete(routes::delete_user))
        .route("/api/users/{user_id}/movies", get(routes::user_movies))
        .route("/api/users/{user_id}/add-movies", post(routes::add_favorites))
        .route("/api/users/{user_id}/remove-movies", post(routes::remove_favorites))
        .with_state(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
