use crate::cli::Args;
use crate::config::lang::{ texts, Language, Texts };
use crate::models::snapshot::BusinessSnapshot;
use crate::AppContext;
use super::tls_paths;
use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;
use axum::{
    routing::get,
    Router,
    extract::{ State, Query },
    response::{ IntoResponse, Response },
    http::StatusCode,
    Json,
};
use serde::{ Deserialize, Serialize };
use tower_http::cors::{ Any, CorsLayer };
use log::{ info, error };

#[derive(Deserialize)]
pub struct DashboardQuery {
    pub lang: Option<String>,
}

#[derive(Serialize)]
struct DashboardResponse {
    lang: Language,
    texts: &'static Texts,
    inactive_employees: u32,
    snapshot: BusinessSnapshot,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn router(ctx: Arc<AppContext>) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/dashboard", get(dashboard_handler))
        .layer(cors)
        .with_state(ctx)
}

pub async fn start_http_server(
    http_port: u16,
    ctx: Arc<AppContext>,
    args: Args
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let addr = format!("0.0.0.0:{}", http_port).parse::<SocketAddr>()?;
    info!("Starting HTTP API server on: http://{}", addr);

    let app = router(ctx);

    if let Some((cert_path, key_path)) = tls_paths(&args)? {
        let tls_config = axum_server::tls_rustls::RustlsConfig::from_config(
            super::load_tls_config(&cert_path, &key_path)?
        );

        tokio::spawn(async move {
            let result = axum_server::bind_rustls(addr, tls_config).serve(app.into_make_service()).await;

            if let Err(e) = result {
                error!("HTTPS server error: {}", e);
            }
        });

        info!("HTTPS server started with TLS enabled");
    } else {
        tokio::spawn(async move {
            match tokio::net::TcpListener::bind(addr).await {
                Ok(listener) => {
                    if let Err(e) = axum::serve(listener, app.into_make_service()).await {
                        error!("HTTP server error: {}", e);
                    }
                }
                Err(e) => {
                    error!("Failed to bind HTTP server to {}: {}. Try a different port.", addr, e);
                }
            }
        });

        info!("HTTP server started");
    }

    Ok(())
}

async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn dashboard_handler(
    State(ctx): State<Arc<AppContext>>,
    Query(query): Query<DashboardQuery>
) -> Response {
    let lang = match query.lang.as_deref() {
        None => ctx.default_lang,
        Some(raw) =>
            match raw.parse::<Language>() {
                Ok(lang) => lang,
                Err(e) => {
                    return (
                        StatusCode::BAD_REQUEST,
                        Json(ErrorResponse { error: e.to_string() }),
                    ).into_response();
                }
            }
    };

    match ctx.data.snapshot() {
        Ok(snapshot) =>
            Json(DashboardResponse {
                lang,
                texts: texts(lang),
                inactive_employees: snapshot.employees.inactive_employees(),
                snapshot,
            }).into_response(),
        Err(e) => {
            error!("Dashboard data unavailable: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse { error: e.to_string() }),
            ).into_response()
        }
    }
}
