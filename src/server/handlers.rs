use super::{
    error::IntakeError,
    types::{Acknowledgment, ApiInfo, ErrorResponse, HealthResponse, InboundMessage, now_rfc3339},
};
use axum::{
    Extension,
    extract::{ConnectInfo, rejection::JsonRejection},
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Json, Response},
};
use std::{any::Any, net::SocketAddr};
use tower_http::request_id::RequestId;
use tracing::{info, warn};

type Payload = Result<Json<InboundMessage>, JsonRejection>;

pub async fn receive_message(
    client: Option<ConnectInfo<SocketAddr>>,
    request_id: Option<Extension<RequestId>>,
    payload: Payload,
) -> Result<Json<Acknowledgment>, IntakeError> {
    intake("/message", client, request_id, payload)
}

pub async fn receive_data(
    client: Option<ConnectInfo<SocketAddr>>,
    request_id: Option<Extension<RequestId>>,
    payload: Payload,
) -> Result<Json<Acknowledgment>, IntakeError> {
    intake("/data", client, request_id, payload)
}

/// Validates, logs and acknowledges one inbound message. Emits exactly one
/// log record whether the payload is accepted or rejected.
fn intake(
    route: &'static str,
    client: Option<ConnectInfo<SocketAddr>>,
    request_id: Option<Extension<RequestId>>,
    payload: Payload,
) -> Result<Json<Acknowledgment>, IntakeError> {
    let client = client
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let req_id = request_id
        .as_ref()
        .and_then(|Extension(id)| id.header_value().to_str().ok())
        .unwrap_or("-")
        .to_string();

    let Json(message) = payload.map_err(|rejection| {
        let err = IntakeError::from(rejection);
        warn!(
            route,
            client = %client,
            req_id = %req_id,
            status = err.status().as_u16(),
            "Rejected inbound message: {}",
            err
        );
        err
    })?;

    let body = serde_json::to_string(&message).map_err(IntakeError::internal)?;
    info!(
        route,
        client = %client,
        req_id = %req_id,
        message_type = message.kind(),
        payload = %body,
        "Received inbound message"
    );

    Ok(Json(Acknowledgment::received(&message)))
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: now_rfc3339(),
    })
}

pub async fn root() -> Json<ApiInfo> {
    Json(ApiInfo::current())
}

pub async fn not_found(uri: Uri) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: format!("Not found: {}", uri.path()),
        }),
    )
}

pub async fn method_not_allowed(method: Method, uri: Uri) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorResponse {
            error: format!("Method not allowed: {} {}", method, uri.path()),
        }),
    )
}

/// Renders a handler panic as the regular internal-fault JSON body.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    IntakeError::internal(format!("handler panicked: {}", detail)).into_response()
}
