use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::LocalcastError;
use crate::composer::{ComposeRequest, ResponseComposer};
use crate::config::ServerConfig;

#[derive(Serialize)]
struct FailureBody {
    message: &'static str,
}

pub fn router(composer: Arc<ResponseComposer>, config: &ServerConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/get_weather_and_places", get(get_weather_and_places))
        .with_state(composer)
        .fallback_service(ServeDir::new(&config.static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout_seconds),
        ))
        .layer(cors)
}

async fn get_weather_and_places(
    State(composer): State<Arc<ResponseComposer>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Response {
    // An undecodable query string carries no usable location
    let request = match query {
        Ok(Query(pairs)) => ComposeRequest::from_pairs(pairs),
        Err(rejection) => {
            tracing::debug!(%rejection, "query string rejected");
            ComposeRequest::default()
        }
    };

    match composer.handle(&request).await {
        Ok(response) => Json(response).into_response(),
        Err(error) => {
            let language = request.language();
            tracing::warn!(%error, lang = %language, "request failed");
            let body = FailureBody {
                message: composer.failure_message(&language, error),
            };
            (StatusCode::BAD_REQUEST, Json(body)).into_response()
        }
    }
}

pub async fn run(config: &ServerConfig, composer: Arc<ResponseComposer>) -> Result<(), LocalcastError> {
    let app = router(composer, config);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Web server running at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
