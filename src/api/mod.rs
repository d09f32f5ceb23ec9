mod error;
mod params;
mod payloads;

use axum::{
    Router,
    extract::{
        Json, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{info, warn};

pub use error::ValidationError;
pub use params::{CliSystem, CliTiming, FireArgs, GrowthArgs, LoanArgs, RetirementArgs};
pub use payloads::{FirePayload, GrowthPayload, LoanPayload, RetirementPayload};

use crate::core::{
    build_amortization_schedule, plan_retirement, project_fire, simulate_compound_growth,
};
use payloads::{
    fire_inputs_from_payload, growth_inputs_from_payload, loan_inputs_from_payload,
    retirement_inputs_from_payload,
};

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

pub fn router() -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/api/growth",
            get(growth_get_handler).post(growth_post_handler),
        )
        .route("/api/loan", get(loan_get_handler).post(loan_post_handler))
        .route(
            "/api/retirement",
            get(retirement_get_handler).post(retirement_post_handler),
        )
        .route("/api/fire", get(fire_get_handler).post(fire_post_handler))
        .fallback(not_found_handler)
}

pub async fn run_http_server(addr: SocketAddr) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("finplan HTTP API listening on http://{addr}");
    info!("Local access: http://127.0.0.1:{}/health", addr.port());

    axum::serve(listener, router()).await
}

async fn health_handler() -> Response {
    json_response(
        StatusCode::OK,
        HealthResponse {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
        },
    )
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn growth_get_handler(payload: Result<Query<GrowthPayload>, QueryRejection>) -> Response {
    respond(
        "growth",
        from_query(payload)
            .and_then(growth_inputs_from_payload)
            .map(|inputs| simulate_compound_growth(&inputs)),
    )
}

async fn growth_post_handler(payload: Result<Json<GrowthPayload>, JsonRejection>) -> Response {
    respond(
        "growth",
        from_json(payload)
            .and_then(growth_inputs_from_payload)
            .map(|inputs| simulate_compound_growth(&inputs)),
    )
}

async fn loan_get_handler(payload: Result<Query<LoanPayload>, QueryRejection>) -> Response {
    respond(
        "loan",
        from_query(payload)
            .and_then(loan_inputs_from_payload)
            .map(|inputs| build_amortization_schedule(&inputs)),
    )
}

async fn loan_post_handler(payload: Result<Json<LoanPayload>, JsonRejection>) -> Response {
    respond(
        "loan",
        from_json(payload)
            .and_then(loan_inputs_from_payload)
            .map(|inputs| build_amortization_schedule(&inputs)),
    )
}

async fn retirement_get_handler(
    payload: Result<Query<RetirementPayload>, QueryRejection>,
) -> Response {
    respond(
        "retirement",
        from_query(payload)
            .and_then(retirement_inputs_from_payload)
            .map(|inputs| plan_retirement(&inputs)),
    )
}

async fn retirement_post_handler(
    payload: Result<Json<RetirementPayload>, JsonRejection>,
) -> Response {
    respond(
        "retirement",
        from_json(payload)
            .and_then(retirement_inputs_from_payload)
            .map(|inputs| plan_retirement(&inputs)),
    )
}

async fn fire_get_handler(payload: Result<Query<FirePayload>, QueryRejection>) -> Response {
    respond(
        "fire",
        from_query(payload)
            .and_then(fire_inputs_from_payload)
            .map(|inputs| project_fire(&inputs)),
    )
}

async fn fire_post_handler(payload: Result<Json<FirePayload>, JsonRejection>) -> Response {
    respond(
        "fire",
        from_json(payload)
            .and_then(fire_inputs_from_payload)
            .map(|inputs| project_fire(&inputs)),
    )
}

fn from_query<T>(payload: Result<Query<T>, QueryRejection>) -> Result<T, ValidationError> {
    payload
        .map(|Query(inner)| inner)
        .map_err(|rejection| ValidationError::InvalidPayload(rejection.body_text()))
}

fn from_json<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ValidationError> {
    payload
        .map(|Json(inner)| inner)
        .map_err(|rejection| ValidationError::InvalidPayload(rejection.body_text()))
}

fn respond<T: Serialize>(calculator: &'static str, result: Result<T, ValidationError>) -> Response {
    match result {
        Ok(body) => {
            info!(calculator, "calculation served");
            json_response(StatusCode::OK, body)
        }
        Err(err) => {
            warn!(calculator, error = %err, "rejected request");
            error_response(StatusCode::BAD_REQUEST, &err.to_string())
        }
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}
