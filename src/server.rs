//! HTTP API for the game client
//!
//! Routes:
//! - `GET  /`                    API information
//! - `GET  /api/health`          liveness probe
//! - `GET  /api/languages`       languages with a catalog
//! - `GET  /api/cards?language=` shuffled deck (`en`, `pt` or `both`, default `both`)
//! - `POST /api/report-problem`  flag a card, always answers success
//!
//! Error bodies are `{"detail": "<message>"}`, which is what the client reads.

use crate::config::ServerConfig;
use crate::core::{Language, LanguageFilter};
use crate::deck::CardService;
use crate::loader::CatalogStore;
use crate::report::ProblemReporter;
use crate::{Result, TabooError};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

/// Shared state for all handlers
#[derive(Clone)]
pub struct AppState {
    pub cards: CardService,
    pub reporter: ProblemReporter,
}

impl AppState {
    pub fn new(cards: CardService, reporter: ProblemReporter) -> Self {
        AppState { cards, reporter }
    }

    /// State wired from a config: a fresh catalog cache and reporter
    pub fn from_config(config: &ServerConfig) -> Self {
        let store = CatalogStore::new(config.data_dir.clone());
        AppState::new(
            CardService::new(store),
            ProblemReporter::new(config.report_log.clone()),
        )
    }
}

/// Query parameters for `/api/cards`
#[derive(Debug, Deserialize)]
pub struct CardsQuery {
    #[serde(default)]
    pub language: LanguageFilter,
}

/// Body of `/api/report-problem`
#[derive(Debug, Deserialize)]
pub struct ReportRequest {
    pub word: String,
}

impl IntoResponse for TabooError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            log::error!("Request failed: {self}");
        }
        detail(status, self.to_string())
    }
}

fn detail(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "detail": message.into() }))).into_response()
}

async fn root() -> impl IntoResponse {
    Json(json!({
        "message": "Taboo Store API",
        "docs": "/docs",
        "health": "/api/health",
    }))
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "healthy" }))
}

async fn languages() -> impl IntoResponse {
    let languages: Vec<_> = Language::ALL
        .iter()
        .map(|language| json!({ "code": language.code(), "name": language.name() }))
        .collect();
    Json(json!({ "languages": languages }))
}

async fn get_cards(
    State(state): State<AppState>,
    query: std::result::Result<Query<CardsQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => {
            return detail(StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text());
        }
    };

    match state.cards.get_cards(query.language).await {
        Ok(deck) => Json(deck).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn report_problem(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ReportRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            return detail(StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text());
        }
    };

    let outcome = state.reporter.report(&request.word).await;
    Json(json!({ "status": "success", "message": outcome.message() })).into_response()
}

/// CORS policy: the listed origins, any method and header, with credentials
pub fn cors_layer(allowed_origins: &[String]) -> Result<CorsLayer> {
    let origins = allowed_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin)
                .map_err(|_| TabooError::Config(format!("invalid CORS origin '{origin}'")))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

/// Build the application router
pub fn router(state: AppState, allowed_origins: &[String]) -> Result<Router> {
    let api = Router::new()
        .route("/health", get(health))
        .route("/languages", get(languages))
        .route("/cards", get(get_cards))
        .route("/report-problem", post(report_problem));

    Ok(Router::new()
        .route("/", get(root))
        .nest("/api", api)
        .layer(cors_layer(allowed_origins)?)
        .with_state(state))
}

/// Run the server until Ctrl-C
pub async fn serve(config: ServerConfig) -> Result<()> {
    let state = AppState::from_config(&config);

    let store = state.cards.store();
    let warmed = store.preload().await;
    log::info!(
        "Preloaded {warmed}/{} catalogs from {}",
        Language::ALL.len(),
        store.data_dir().display()
    );
    log::info!(
        "Problem reports go to {}",
        state.reporter.log_path().display()
    );

    let app = router(state, &config.allowed_origins)?;
    let listener = TcpListener::bind(config.bind).await?;
    log::info!("Taboo Store API listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            log::info!("Taboo Store API shutting down");
        })
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_layer_rejects_bad_origin() {
        assert!(cors_layer(&["http://localhost:5173".to_string()]).is_ok());
        assert!(matches!(
            cors_layer(&["bad\norigin".to_string()]),
            Err(TabooError::Config(_))
        ));
    }

    #[test]
    fn test_cards_query_defaults_to_both() {
        let query: CardsQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.language, LanguageFilter::Both);
    }
}
