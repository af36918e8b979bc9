//! Axum app: state, router, and request handlers.
//!
//! Two routes: `GET /hello` as a liveness probe and `GET /weather/:city`,
//! which fans the lookup out through the shared [`MultiProvider`].

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use tokio::net::TcpListener;
use tracing::info;

use weather_core::MultiProvider;

/// Shared state, injected into the router and cloned per request via `Arc`.
pub(crate) struct AppState {
    pub(crate) multi: MultiProvider,
}

/// Wire shape of a successful `/weather/:city` response.
#[derive(Debug, Serialize)]
struct WeatherBody {
    city: String,
    temp: f64,
    took: String,
}

pub(crate) fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/hello", get(hello))
        .route("/weather/:city", get(weather))
        .with_state(state)
}

async fn hello() -> &'static str {
    "Hello world!"
}

async fn weather(State(state): State<Arc<AppState>>, Path(city): Path<String>) -> Response {
    match state.multi.temperature(&city).await {
        Ok(result) => Json(WeatherBody {
            city: result.city,
            temp: result.average.0,
            took: format!("{:?}", result.elapsed),
        })
        .into_response(),
        // The first provider error, rendered verbatim as the body.
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response(),
    }
}

/// Serves the app on an existing listener. Tests bind `127.0.0.1:0` and pass
/// the listener in.
pub(crate) async fn serve(listener: TcpListener, state: Arc<AppState>) -> anyhow::Result<()> {
    info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(state)).await?;
    Ok(())
}
