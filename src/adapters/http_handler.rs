use std::{net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    body::Bytes,
    extract::{ConnectInfo, Query, Request, State, rejection::QueryRejection},
    http::{HeaderMap, header},
    middleware,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;

use crate::{
    adapters::{
        FileSystemAdapter, cors_middleware, request_id_middleware, request_timing_middleware,
    },
    config::models::ServerConfig,
    core::{
        Dispatched, dispatcher,
        models::{
            CommentSubmissionRequest, PersonRegistrationRequest, VehicleRegistrationRequest,
            parse_lenient,
        },
    },
    ports::{file_system::FileSystem, http_server::HandlerError},
};

type QueryParams = Result<Query<Vec<(String, String)>>, QueryRejection>;

impl IntoResponse for Dispatched {
    fn into_response(self) -> Response {
        (self.status, Json(self.envelope)).into_response()
    }
}

/// Shared, read-only request context
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub file_system: Arc<FileSystemAdapter>,
}

/// HTTP handler for the WAF fixture: owns the route table
pub struct HttpHandler {
    state: AppState,
}

impl HttpHandler {
    pub fn new(config: Arc<ServerConfig>, file_system: Arc<FileSystemAdapter>) -> Self {
        Self {
            state: AppState {
                config,
                file_system,
            },
        }
    }

    /// Build the axum router with every endpoint and middleware attached
    pub fn router(&self) -> Router {
        let config = &self.state.config;

        let router = Router::new()
            .route("/", get(index))
            .route("/health", get(health))
            .route("/api/waftest", get(list_endpoints))
            .route("/api/waftest/safe", get(safe))
            .route("/api/waftest/sql-injection", get(sql_injection))
            .route("/api/waftest/xss", get(xss))
            .route("/api/waftest/path-traversal", get(path_traversal))
            .route("/api/waftest/malicious-payload", post(malicious_payload))
            .route("/api/waftest/bot-simulation", get(bot_simulation))
            .route("/api/waftest/large-request", get(large_request))
            .route("/api/waftest/protocol-attack", get(protocol_attack))
            .route("/api/waftest/command-injection", get(command_injection))
            .route("/api/waftest/person-registration", post(person_registration))
            .route("/api/waftest/vehicle-registration", post(vehicle_registration))
            .route("/api/waftest/comment-submission", post(comment_submission))
            .fallback_service(FileSystemAdapter::static_service(
                &config.static_files.root,
            ))
            .layer(middleware::from_fn(request_timing_middleware))
            .layer(middleware::from_fn(request_id_middleware))
            .layer(TraceLayer::new_for_http());

        let router = if config.cors.enabled {
            router.layer(middleware::from_fn(cors_middleware))
        } else {
            router
        };

        router.with_state(self.state.clone())
    }
}

impl Clone for HttpHandler {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

/// Query pairs in arrival order; an unparsable query string reads as empty.
fn query_pairs(params: QueryParams) -> Vec<(String, String)> {
    match params {
        Ok(Query(pairs)) => pairs,
        Err(e) => {
            tracing::debug!("Treating malformed query string as empty: {}", e);
            Vec::new()
        }
    }
}

async fn index(State(state): State<AppState>) -> Result<Html<String>, HandlerError> {
    let path = state.config.index_path();
    let content = state.file_system.read_text(&path).await?;
    Ok(Html(content))
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "Healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn list_endpoints() -> Json<Value> {
    Json(dispatcher::list_endpoints())
}

async fn safe() -> Dispatched {
    dispatcher::safe()
}

async fn sql_injection(params: QueryParams) -> Dispatched {
    let params = query_pairs(params);
    dispatcher::sql_injection(dispatcher::query_value(&params, "userId"))
}

async fn xss(params: QueryParams) -> Dispatched {
    let params = query_pairs(params);
    dispatcher::xss(dispatcher::query_value(&params, "comment"))
}

async fn path_traversal(params: QueryParams) -> Dispatched {
    let params = query_pairs(params);
    dispatcher::path_traversal(dispatcher::query_value(&params, "filePath"))
}

async fn command_injection(params: QueryParams) -> Dispatched {
    let params = query_pairs(params);
    dispatcher::command_injection(dispatcher::query_value(&params, "command"))
}

async fn large_request(params: QueryParams) -> Dispatched {
    let params = query_pairs(params);
    dispatcher::large_request(dispatcher::query_value(&params, "data"))
}

async fn malicious_payload(body: Bytes) -> Dispatched {
    let payload: Value = parse_lenient(&body);
    dispatcher::malicious_payload(&String::from_utf8_lossy(&body), &payload)
}

async fn bot_simulation(req: Request) -> Dispatched {
    let user_agent = req
        .headers()
        .get(header::USER_AGENT)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        .unwrap_or_default();
    // Present only when served with connect info
    let client_ip = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());

    dispatcher::bot_simulation(&user_agent, client_ip)
}

async fn protocol_attack(headers: HeaderMap) -> Dispatched {
    dispatcher::protocol_attack(&headers)
}

async fn person_registration(body: Bytes) -> Dispatched {
    let request: PersonRegistrationRequest = parse_lenient(&body);
    dispatcher::person_registration(&request)
}

async fn vehicle_registration(body: Bytes) -> Dispatched {
    let request: VehicleRegistrationRequest = parse_lenient(&body);
    dispatcher::vehicle_registration(&request)
}

async fn comment_submission(body: Bytes) -> Dispatched {
    let request: CommentSubmissionRequest = parse_lenient(&body);
    dispatcher::comment_submission(&request)
}
