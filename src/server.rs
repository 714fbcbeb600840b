//! HTTP API.

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::{info, warn};

use crate::query::{parse_sources, DEFAULT_PER_PAGE};
use crate::{Config, ImageQuery, OrderBy, Search, SearchError, SearchResponse, SourceListing};

/// Raw `/api/search` parameters, parsed by hand so every violation gets a
/// readable message.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
    pub page: Option<String>,
    pub per_page: Option<String>,
    pub sources: Option<String>,
    pub order_by: Option<String>,
}

impl SearchParams {
    /// Converts the raw parameters into a query, applying defaults.
    pub fn into_query(self) -> Result<ImageQuery, SearchError> {
        let text = self
            .query
            .ok_or_else(|| SearchError::InvalidQuery("query is required".into()))?;

        let page = parse_number("page", self.page.as_deref(), 1)?;
        let per_page = parse_number("per_page", self.per_page.as_deref(), DEFAULT_PER_PAGE)?;

        let order_by = match self.order_by.as_deref() {
            None | Some("") => OrderBy::Relevant,
            Some(raw) => raw.parse()?,
        };

        let mut query = ImageQuery::new(text)
            .with_page(page)
            .with_per_page(per_page)
            .with_order(order_by);

        if let Some(raw) = self.sources.as_deref() {
            // An explicit but blank list is not the same as no list.
            query.sources = parse_sources(raw);
            if query.sources.is_empty() {
                return Err(SearchError::NoSources);
            }
        }

        Ok(query)
    }
}

fn parse_number(name: &str, raw: Option<&str>, default: u32) -> Result<u32, SearchError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| SearchError::InvalidQuery(format!("{} must be a positive integer", name))),
    }
}

/// Error returned by API handlers.
#[derive(Debug)]
pub struct ApiError(SearchError);

impl From<SearchError> for ApiError {
    fn from(err: SearchError) -> Self {
        Self(err)
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self(SearchError::InvalidQuery(rejection.body_text()))
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self.0 {
            SearchError::InvalidQuery(_) => StatusCode::UNPROCESSABLE_ENTITY,
            SearchError::NoSources => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match &self.0 {
            SearchError::InvalidQuery(msg) => msg.clone(),
            other => other.to_string(),
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy" }))
}

async fn sources(State(search): State<Arc<Search>>) -> Json<SourceListing> {
    Json(search.registry().list_sources())
}

async fn search_images(
    State(search): State<Arc<Search>>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let Query(params) = params?;
    let query = params.into_query()?;
    let response = search.search(query).await?;
    Ok(Json(response))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.is_empty() || origins.iter().any(|o| o == "*") {
        AllowOrigin::from(Any)
    } else {
        let values: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!("Ignoring invalid CORS origin '{}'", origin);
                    None
                }
            })
            .collect();
        AllowOrigin::list(values)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Builds the API router.
pub fn create_router(search: Arc<Search>, config: &Config) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/sources", get(sources))
        .route("/api/search", get(search_images))
        .with_state(search)
        .layer(cors_layer(&config.cors_origins))
}

/// Binds the configured address and serves the API until the process exits.
pub async fn serve(search: Arc<Search>, config: &Config) -> std::io::Result<()> {
    let app = create_router(search, config);
    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await
}
