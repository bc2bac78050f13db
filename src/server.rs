//! HTTP surface for rank checks.
//!
//! ## Endpoints
//!
//! - `GET /api/getSEOResult`: run a rank check described by the request
//!   headers `searchString`, `targetUrl`, `resultsCount` and `engineTypeId`
//! - `GET /api/engines`: list configured engines for client drop-downs
//!
//! The rank endpoint always answers `200 OK` with a JSON rank report;
//! failures are reported through its `success` and `errorMessage` fields.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Json;
use axum::routing::get;
use seorank_search::query::{
    ENGINE_TYPE_FIELD, RESULTS_COUNT_FIELD, SEARCH_STRING_FIELD, TARGET_URL_FIELD,
};
use seorank_search::{PageFetcher, RankChecker, RankReport, RawRankRequest};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::info;

use crate::config::ServerConfig;
use crate::error::{AppError, Result};

/// Route serving rank checks.
pub const RANK_ROUTE: &str = "/api/getSEOResult";

/// Route listing configured engines.
pub const ENGINES_ROUTE: &str = "/api/engines";

/// One entry of the engine list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineSummary {
    pub engine_type_id: u32,
    pub engine_name: String,
}

/// Build the router around a shared rank checker.
pub fn router<F>(checker: Arc<RankChecker<F>>) -> Router
where
    F: PageFetcher + 'static,
{
    Router::new()
        .route(RANK_ROUTE, get(handle_rank::<F>))
        .route(ENGINES_ROUTE, get(handle_engines::<F>))
        .with_state(checker)
}

/// Rank-check HTTP server running on a background task.
pub struct RankServer {
    /// The address the server is listening on.
    addr: SocketAddr,
    /// Handle to the background server task.
    handle: JoinHandle<()>,
}

impl RankServer {
    /// Start serving.
    ///
    /// Binds to `{config.host}:{config.port}` (use port `0` for auto-assign)
    /// and begins serving in a background tokio task.
    ///
    /// # Errors
    ///
    /// Returns an error if the TCP listener cannot bind.
    pub async fn start<F>(checker: Arc<RankChecker<F>>, config: &ServerConfig) -> Result<Self>
    where
        F: PageFetcher + 'static,
    {
        let app = router(checker);

        let bind_addr = format!("{}:{}", config.host, config.port);
        let listener = TcpListener::bind(&bind_addr)
            .await
            .map_err(|e| AppError::Server(format!("bind to {bind_addr} failed: {e}")))?;

        let addr = listener
            .local_addr()
            .map_err(|e| AppError::Server(format!("failed to get local addr: {e}")))?;

        info!("rank server listening on http://{addr}{RANK_ROUTE}");

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("rank server error: {e}");
            }
        });

        Ok(Self { addr, handle })
    }

    /// Returns the address the server is listening on.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Returns the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Abort the server task.
    pub fn shutdown(&self) {
        self.handle.abort();
    }
}

impl Drop for RankServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Collect the four rank-check fields from request headers.
pub fn raw_request_from_headers(headers: &HeaderMap) -> RawRankRequest {
    let field = |name: &str| {
        headers
            .get(name)
            .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
    };
    RawRankRequest {
        search_string: field(SEARCH_STRING_FIELD),
        target_url: field(TARGET_URL_FIELD),
        results_count: field(RESULTS_COUNT_FIELD),
        engine_type_id: field(ENGINE_TYPE_FIELD),
    }
}

/// `GET /api/getSEOResult`
async fn handle_rank<F: PageFetcher + 'static>(
    State(checker): State<Arc<RankChecker<F>>>,
    headers: HeaderMap,
) -> Json<RankReport> {
    let raw = raw_request_from_headers(&headers);
    let result = checker.check_request(&raw).await;
    info!(
        engine = %result.engine_name,
        success = result.success,
        matches = result.match_count,
        "rank check served"
    );
    Json(result.to_report())
}

/// `GET /api/engines`
async fn handle_engines<F: PageFetcher + 'static>(
    State(checker): State<Arc<RankChecker<F>>>,
) -> Json<Vec<EngineSummary>> {
    Json(
        checker
            .registry()
            .engines()
            .map(|mapping| EngineSummary {
                engine_type_id: mapping.id,
                engine_name: mapping.name.clone(),
            })
            .collect(),
    )
}
