//! REST API for the aggregated chart views.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use log::{error, info};

use crate::domain::chart_service::local_today;
use crate::domain::commands::babies::GetBabyCommand;
use crate::domain::models::Baby;
use crate::io::rest::error_status;
use crate::AppState;

async fn hydrated_baby(state: &AppState, baby_id: String) -> Result<Baby, Response> {
    match state.baby_service.get_baby(GetBabyCommand { baby_id }).await {
        Ok(result) => match result.baby {
            Some(baby) => Ok(baby),
            None => Err((StatusCode::NOT_FOUND, "Baby not found").into_response()),
        },
        Err(e) => {
            error!("Failed to get baby for chart: {}", e);
            Err((error_status(&e, StatusCode::INTERNAL_SERVER_ERROR), e.to_string())
                .into_response())
        }
    }
}

pub async fn feed_chart(
    State(state): State<AppState>,
    Path(baby_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/babies/{}/charts/feeds", baby_id);

    match hydrated_baby(&state, baby_id).await {
        Ok(baby) => {
            let chart = state.chart_service.feed_chart(&baby.feed_entries, local_today());
            (StatusCode::OK, Json(chart)).into_response()
        }
        Err(response) => response,
    }
}

pub async fn stool_chart(
    State(state): State<AppState>,
    Path(baby_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/babies/{}/charts/stools", baby_id);

    match hydrated_baby(&state, baby_id).await {
        Ok(baby) => {
            let chart = state
                .chart_service
                .stool_chart(&baby.stool_entries, local_today());
            (StatusCode::OK, Json(chart)).into_response()
        }
        Err(response) => response,
    }
}

pub async fn wet_diaper_chart(
    State(state): State<AppState>,
    Path(baby_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/babies/{}/charts/wet-diapers", baby_id);

    match hydrated_baby(&state, baby_id).await {
        Ok(baby) => {
            let chart = state
                .chart_service
                .wet_diaper_chart(&baby.wet_diaper_entries, local_today());
            (StatusCode::OK, Json(chart)).into_response()
        }
        Err(response) => response,
    }
}

/// Daily averages in the user's preferred display unit.
pub async fn weight_chart(
    State(state): State<AppState>,
    Path(baby_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/babies/{}/charts/weight", baby_id);

    let unit = match state.settings_service.get_settings().await {
        Ok(result) => result.settings.weight_unit,
        Err(e) => {
            error!("Failed to load settings: {}", e);
            return (error_status(&e, StatusCode::INTERNAL_SERVER_ERROR), e.to_string())
                .into_response();
        }
    };

    match hydrated_baby(&state, baby_id).await {
        Ok(baby) => {
            let chart = state
                .chart_service
                .weight_chart(&baby.weight_entries, unit, local_today());
            (StatusCode::OK, Json(chart)).into_response()
        }
        Err(response) => response,
    }
}

pub async fn dehydration_grid(
    State(state): State<AppState>,
    Path(baby_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/babies/{}/charts/dehydration", baby_id);

    match hydrated_baby(&state, baby_id).await {
        Ok(baby) => {
            let grid = state
                .chart_service
                .dehydration_grid(&baby.dehydration_checks, local_today());
            (StatusCode::OK, Json(grid)).into_response()
        }
        Err(response) => response,
    }
}
