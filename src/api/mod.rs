// src/api/mod.rs — HTTP form surface for the toolkit

pub mod auth;
pub mod handlers;
pub mod types;

use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::core::session::SessionStore;
use crate::core::toolkit::Toolkit;
use crate::infra::config::ServerConfig;

/// Shared state for API handlers.
#[derive(Clone)]
pub struct ApiState {
    pub store: SessionStore,
    pub toolkit: Arc<Toolkit>,
    pub token: Option<String>,
}

/// Build the axum router with all API routes.
pub fn build_router(state: ApiState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin([
            HeaderValue::from_static("http://localhost:3000"),
            HeaderValue::from_static("http://localhost:5173"),
            HeaderValue::from_static("http://127.0.0.1:3000"),
            HeaderValue::from_static("http://127.0.0.1:5173"),
        ])
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any);

    Router::new()
        .route("/api/v1/health", get(handlers::health))
        .route("/api/v1/roi", post(handlers::calculate_roi))
        .route("/api/v1/sessions", post(handlers::create_session))
        .route(
            "/api/v1/sessions/{id}",
            axum::routing::delete(handlers::end_session),
        )
        .route("/api/v1/sessions/{id}/idea", post(handlers::evaluate_idea))
        .route("/api/v1/sessions/{id}/meeting", post(handlers::check_meeting))
        .route(
            "/api/v1/sessions/{id}/automation",
            post(handlers::analyze_workload),
        )
        .route("/api/v1/sessions/{id}/history", get(handlers::get_history))
        .route(
            "/api/v1/sessions/{id}/dashboard",
            get(handlers::get_dashboard),
        )
        .route(
            "/api/v1/sessions/{id}/reports/{kind}",
            get(handlers::download_report),
        )
        .layer(cors)
        .with_state(state)
}

/// Serve the API until Ctrl-C.
pub async fn start_server(config: &ServerConfig, state: ApiState) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);

    let router = build_router(state);

    tracing::info!("API server listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_err() {
                std::future::pending::<()>().await;
            }
            tracing::info!("shutting down API server");
        })
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::config::ModelConfig;
    use crate::provider::openai::OpenAIProvider;
    use crate::provider::CompletionSettings;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn test_state(token: Option<&str>) -> ApiState {
        let provider = Arc::new(OpenAIProvider::with_base_url(
            "unused".into(),
            "http://127.0.0.1:9".into(),
        ));
        ApiState {
            store: SessionStore::new(5),
            toolkit: Arc::new(Toolkit::new(
                provider,
                CompletionSettings::from(&ModelConfig::default()),
            )),
            token: token.map(String::from),
        }
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = build_router(test_state(None));
        let req = Request::builder()
            .uri("/api/v1/health")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_token_required_when_configured() {
        let app = build_router(test_state(Some("s3cret")));
        let req = Request::builder()
            .method("POST")
            .uri("/api/v1/sessions")
            .body(Body::empty())
            .unwrap();
        let resp = app.clone().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let req = Request::builder()
            .method("POST")
            .uri("/api/v1/sessions")
            .header("authorization", "Bearer s3cret")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
    }
}
