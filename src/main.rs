use axum::{
    routing::{delete, get, post},
    Router,
};
use interview_backend::{
    config::{get_config, init_config},
    database::pool::{create_pool, run_migrations},
    routes, AppState,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let pool = create_pool().await?;
    run_migrations(&pool).await?;

    let app_state = AppState::new(pool);

    let public_api = Router::new()
        .route("/health", get(routes::health::health))
        .route("/api/auth/register", post(routes::auth::register))
        .route("/api/auth/login", post(routes::auth::login))
        .route("/api/auth/logout", post(routes::auth::logout))
        .route("/api/directions", get(routes::taxonomy::list_directions))
        .route("/api/languages", get(routes::taxonomy::list_languages));

    let protected_api = Router::new()
        .route("/api/auth/me", get(routes::auth::me))
        .route("/api/directions", post(routes::taxonomy::create_direction))
        .route(
            "/api/directions/:id",
            delete(routes::taxonomy::delete_direction),
        )
        .route("/api/languages", post(routes::taxonomy::create_language))
        .route(
            "/api/languages/:id",
            delete(routes::taxonomy::delete_language),
        )
        .route("/api/questions", get(routes::questions::list_questions))
        .route(
            "/api/interview/start",
            post(routes::interview::start_interview),
        )
        .route(
            "/api/interview/question",
            get(routes::interview::get_question),
        )
        .route(
            "/api/interview/answer",
            post(routes::interview::submit_answer),
        )
        .route("/api/interview/status", get(routes::interview::get_status))
        .route(
            "/api/interview/finish",
            post(routes::interview::finish_interview),
        )
        .route("/api/history", get(routes::history::get_history))
        .route("/api/history/:id", get(routes::history::get_history_detail))
        .route(
            "/api/statistics/interviews",
            get(routes::statistics::interview_statistics),
        )
        .route(
            "/api/statistics/questions",
            get(routes::statistics::questions_statistics),
        )
        .route(
            "/api/statistics/questions/top-successful",
            get(routes::statistics::top_successful_questions),
        )
        .route(
            "/api/statistics/questions/top-unsuccessful",
            get(routes::statistics::top_unsuccessful_questions),
        )
        .layer(axum::middleware::from_fn(
            interview_backend::middleware::auth::require_bearer_auth,
        ));

    let app = public_api
        .merge(protected_api)
        .with_state(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
