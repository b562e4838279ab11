use axum::{
    extract::State,
    middleware,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::api::handlers::indicators::{
    indicator_handler, indicators_handler, panel_indicator_count_handler,
    panel_indicators_handler, search_indicators_handler,
};
use crate::api::handlers::rankings::{
    award_points_handler, champion_ranking_handler, leaderboard_handler, ranking_stats_handler,
    sectors_handler,
};
use crate::api::handlers::reviews::{
    create_submission_handler, get_submission_handler, refresh_status_handler,
    submit_reviews_handler,
};
use crate::api::error::ApiError;
use crate::auth::require_api_key;
use crate::config::Config;
use crate::db::create_pool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub api_key: String,
}

pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn,hyper=warn,tower=warn")),
        )
        .init();
}

pub fn create_app(state: AppState) -> Router {
    // Mutating routes sit behind the API-key guard
    let protected = Router::new()
        .route("/champions/:id/award", post(award_points_handler))
        .route("/submissions", post(create_submission_handler))
        .route("/submissions/:id/reviews", post(submit_reviews_handler))
        .route("/submissions/:id/status", post(refresh_status_handler))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_api_key,
        ));

    Router::new()
        .route("/health", get(health_handler))
        .route("/health/db", get(db_health_handler))
        .route("/leaderboard", get(leaderboard_handler))
        .route("/leaderboard/stats", get(ranking_stats_handler))
        .route("/leaderboard/sectors", get(sectors_handler))
        .route("/champions/:id/ranking", get(champion_ranking_handler))
        .route("/panels/:panel_id/indicators", get(panel_indicators_handler))
        .route(
            "/panels/:panel_id/indicators/count",
            get(panel_indicator_count_handler),
        )
        .route("/indicators", get(indicators_handler))
        .route("/indicators/search", get(search_indicators_handler))
        .route("/indicators/:id", get(indicator_handler))
        .route("/submissions/:id", get(get_submission_handler))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_handler() -> &'static str {
    "OK"
}

async fn db_health_handler(State(state): State<AppState>) -> Result<&'static str, ApiError> {
    crate::db::health_check(&state.pool)
        .await
        .map_err(|e| ApiError::Database(e.to_string()))?;
    Ok("OK")
}

pub async fn run_server() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    init_tracing();

    let config = Config::from_env()?;
    let pool = create_pool(&config.database_url).await?;

    let state = AppState {
        pool,
        api_key: config.api_key.clone(),
    };
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("Listening on {}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
