use axum::{routing::get, Router};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use driftnotes_api_rust::database::DatabaseManager;
use driftnotes_api_rust::{config, handlers, middleware};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    init_logging();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();
    tracing::info!("Starting Drift Notes API in {:?} mode", config.environment);

    let pool = DatabaseManager::pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let app = app();

    // Allow tests or deployments to override port via env
    let port = std::env::var("DRIFT_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(8000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!("Drift Notes API listening on http://{}", bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_logging() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
}

fn app() -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Token acquisition
        .merge(auth_routes())
        // Resources (reads open, writes gated per resource)
        .merge(user_routes())
        .merge(category_routes())
        .merge(trip_routes())
        .merge(usertrip_routes())
        .merge(day_routes())
        .merge(event_routes())
        // Global middleware; bearer auth runs innermost so every handler
        // sees a CurrentUser extension
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(axum::middleware::from_fn(middleware::bearer_auth_middleware)),
        )
}

fn auth_routes() -> Router {
    use axum::routing::post;
    use handlers::auth;

    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
}

fn user_routes() -> Router {
    use handlers::users;

    Router::new()
        .route("/users", get(users::user_list))
        .route("/users/:id", get(users::user_show).put(users::user_update))
}

fn category_routes() -> Router {
    use handlers::categories;

    Router::new()
        .route(
            "/categories",
            get(categories::category_list).post(categories::category_create),
        )
        .route(
            "/categories/:id",
            get(categories::category_show)
                .put(categories::category_update)
                .delete(categories::category_delete),
        )
}

fn trip_routes() -> Router {
    use handlers::trips;

    Router::new()
        .route("/trips", get(trips::trip_list).post(trips::trip_create))
        .route(
            "/trips/:id",
            get(trips::trip_show)
                .put(trips::trip_update)
                .delete(trips::trip_delete),
        )
}

fn usertrip_routes() -> Router {
    use axum::routing::delete;
    use handlers::usertrips;

    Router::new()
        .route(
            "/usertrips",
            get(usertrips::usertrip_list).post(usertrips::usertrip_create),
        )
        .route("/usertrips/:id", delete(usertrips::usertrip_delete))
}

fn day_routes() -> Router {
    use handlers::days;

    Router::new()
        .route("/days", get(days::day_list).post(days::day_create))
        .route("/days/:id", get(days::day_show).delete(days::day_delete))
}

fn event_routes() -> Router {
    use handlers::events;

    Router::new()
        .route("/events", get(events::event_list).post(events::event_create))
        .route(
            "/events/:id",
            get(events::event_show)
                .put(events::event_update)
                .delete(events::event_delete),
        )
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Drift Notes API (Rust)",
            "version": version,
            "description": "Collaborative trip itinerary planner built with Rust (Axum)",
            "endpoints": {
                "home": "/ (public)",
                "auth": "/register, /login (public - token acquisition)",
                "users": "/users[/:id]",
                "categories": "/categories[/:id]",
                "trips": "/trips[/:id]",
                "usertrips": "/usertrips[/:id]",
                "days": "/days[/:id]",
                "events": "/events[/:id]",
            }
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
