mod db;
mod handlers;
mod models;
mod schema;
mod seed;

use axum::{routing::get, Router};
use clap::Parser;
use crate::db::DbPool;
use shared::api::endpoints;
use std::{env, path::Path, sync::Arc};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug, Clone)]
#[command(name = "lmp-studio-backend")]
#[command(about = "LMP Studio backend server")]
struct Args {
    /// Enable development mode (seeds demo programs into an empty store)
    #[arg(long)]
    dev_mode: bool,

    /// Path to frontend dist directory to serve
    #[arg(long, default_value = "frontend/dist")]
    frontend_dist: String,
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: DbPool,
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(endpoints::HEALTH, get(handlers::health::health))
        .route(endpoints::LMPS, get(handlers::lmps::list_lmps))
        .route("/api/lmps/:name", get(handlers::lmps::get_lmp))
        .route(endpoints::TRACES, get(handlers::traces::list_traces))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if args.dev_mode {
        tracing::warn!("🚧 DEV MODE ENABLED - demo programs will be seeded into an empty store");
    }

    // Load environment variables
    dotenvy::dotenv().ok();

    // Create database pool and bring the schema up to date
    let pool = db::create_pool()?;
    let applied = db::run_migrations(&pool)?;
    for migration in &applied {
        tracing::info!("Applied migration {}", migration);
    }

    if args.dev_mode {
        let mut conn = pool.get()?;
        seed::seed_demo_data(&mut conn)?;
    }

    let app_state = Arc::new(AppState { db_pool: pool });

    // Setup CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut app = api_routes().with_state(app_state);

    // Serve the frontend bundle, falling back to index.html for client-side routes
    if Path::new(&args.frontend_dist).exists() {
        tracing::info!("Serving frontend from: {}", args.frontend_dist);
        let index = Path::new(&args.frontend_dist).join("index.html");
        app = app.fallback_service(
            ServeDir::new(&args.frontend_dist).not_found_service(ServeFile::new(index)),
        );
    } else {
        tracing::warn!("Frontend dist not found at: {}", args.frontend_dist);
    }

    let app = app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors),
    );

    // Run the server
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("{}:{}", host, port);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
