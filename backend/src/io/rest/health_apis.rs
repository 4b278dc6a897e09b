//! REST API for the device health-sample mirror.
//!
//! Mirroring is best-effort: failures are logged by the service and the
//! caller always gets an accepted response. There is no retry.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use log::info;

use crate::domain::models::HealthSample;
use crate::io::rest::mappers;
use crate::AppState;
use shared::MirrorHealthSampleRequest;

pub async fn mirror_health_sample(
    State(state): State<AppState>,
    Json(request): Json<MirrorHealthSampleRequest>,
) -> impl IntoResponse {
    info!("POST /api/health-samples - sample {}", request.id);

    let timestamp = match mappers::parse_timestamp(Some(request.timestamp)) {
        Ok(timestamp) => timestamp,
        Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    };

    state
        .health_mirror_service
        .mirror_sample(HealthSample {
            id: request.id,
            kind: request.kind,
            value: request.value,
            timestamp,
        })
        .await;

    StatusCode::ACCEPTED.into_response()
}

pub async fn remove_health_sample(
    State(state): State<AppState>,
    Path(sample_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/health-samples/{}", sample_id);

    state.health_mirror_service.remove_sample(&sample_id).await;
    StatusCode::ACCEPTED.into_response()
}
