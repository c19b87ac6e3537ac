pub use crate::configuration;
use crate::configuration::{DatabaseSettings, get_configuration};
use crate::routes::user::{create_user_handler, lookup_user_handler, update_user_handler};
use crate::services::user::UserService;
use crate::store::Storage;
use crate::store::user::UserRepository;

use axum::{
    Router,
    http::{Method, header},
    routing::post,
};
use tower_http::LatencyUnit;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::Level;

#[derive(Clone, Debug)]
pub struct AppState {
    pub user_service: UserService,
}

/// The full application: user routes plus the cross-cutting layers every
/// response gets (permissive CORS, request logging with latency).
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/users", post(create_user_handler))
        .route("/users/update", post(update_user_handler))
        .route("/users/lookup", post(lookup_user_handler))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http().on_response(
                DefaultOnResponse::new()
                    .level(Level::INFO)
                    .latency_unit(LatencyUnit::Millis),
            ),
        )
        .with_state(state)
}

/// Connect-and-bootstrap step that gates serving: the listener is only ever
/// bound after this returns Ok.
async fn initialize_storage(settings: &DatabaseSettings) -> Result<Storage, sqlx::Error> {
    let storage = Storage::connect(settings)?;
    storage.init().await?;
    Ok(storage)
}

pub async fn run() {
    let cfg = get_configuration().expect("could not get config");

    let db_settings = DatabaseSettings::from_env();
    if db_settings.connection_uri.is_none() {
        tracing::warn!(
            "POSTGRES_CONNECTION_URI not set. DB connections will fail until it is provided."
        );
    }

    let storage = match initialize_storage(&db_settings).await {
        Ok(storage) => storage,
        Err(err) => {
            tracing::error!(error = ?err, "COULD NOT CONNECT TO POSTGRES!");
            // no retry and no exit: the process stays in its initializing
            // state and never starts listening
            return std::future::pending::<()>().await;
        }
    };

    let user_repo = UserRepository::new(storage.pool());
    let user_service = UserService::new(user_repo);
    let app = build_router(AppState { user_service });

    tracing::info!(
        "Connected to Postgres, starting server on port {}",
        cfg.application.port
    );
    let listener =
        tokio::net::TcpListener::bind((cfg.application.host.as_str(), cfg.application.port))
            .await
            .unwrap();
    axum::serve(listener, app)
        .await
        .expect("could not start server");
}
