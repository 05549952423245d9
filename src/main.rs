//! Server bootstrap: required env, database setup, router, serve.

use axum::Router;
use pricebook::{api_routes, common_routes_with_ready, AppState};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("pricebook=info".parse()?))
        .init();

    // Startup guard: refuse to run half-configured.
    let port = match std::env::var("PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
        Some(port) => port,
        None => {
            tracing::error!("PORT must be set to a port number");
            std::process::exit(1);
        }
    };
    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            tracing::error!("DATABASE_URL must be set");
            std::process::exit(1);
        }
    };

    pricebook::ensure_database_exists(&database_url).await?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;
    pricebook::ensure_tables(&pool).await?;

    let state = AppState { pool };
    let app = Router::new()
        .merge(common_routes_with_ready(state.clone()))
        .nest("/api", api_routes(state))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
