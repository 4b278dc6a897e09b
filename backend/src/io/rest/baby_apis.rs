//! REST API for baby management.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::{error, info};

use crate::domain::commands::babies::{
    AddBabiesCommand, DeleteBabyCommand, GetBabyCommand, NewBaby,
};
use crate::io::rest::{error_status, mappers};
use crate::AppState;
use shared::{CreateBabiesRequest, CreateBabiesResponse, DeleteBabyResponse, ListBabiesResponse};

/// Register a batch of babies. Writes apply sequentially and stop at the
/// first failure, so a failed request may leave earlier babies persisted.
pub async fn create_babies(
    State(state): State<AppState>,
    Json(request): Json<CreateBabiesRequest>,
) -> impl IntoResponse {
    info!("POST /api/babies - {} babies", request.babies.len());

    let mut babies = Vec::with_capacity(request.babies.len());
    for baby in request.babies {
        let date_of_birth = match mappers::parse_date_of_birth(&baby.date_of_birth) {
            Ok(dob) => dob,
            Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
        };
        babies.push(NewBaby {
            name: baby.name,
            date_of_birth,
        });
    }

    match state.baby_service.add_babies(AddBabiesCommand { babies }).await {
        Ok(result) => {
            let response = CreateBabiesResponse {
                babies: result.babies.into_iter().map(mappers::summary_to_dto).collect(),
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to create babies: {}", e);
            (error_status(&e, StatusCode::BAD_REQUEST), e.to_string()).into_response()
        }
    }
}

/// List all babies as summaries, without sub-collections.
pub async fn list_babies(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/babies");

    match state.baby_service.list_babies().await {
        Ok(result) => {
            let response = ListBabiesResponse {
                babies: result.babies.into_iter().map(mappers::summary_to_dto).collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to list babies: {}", e);
            (error_status(&e, StatusCode::INTERNAL_SERVER_ERROR), e.to_string()).into_response()
        }
    }
}

/// Fetch one baby with all sub-collections hydrated.
pub async fn get_baby(
    State(state): State<AppState>,
    Path(baby_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/babies/{}", baby_id);

    let unit = match state.settings_service.get_settings().await {
        Ok(result) => result.settings.weight_unit,
        Err(e) => {
            error!("Failed to load settings: {}", e);
            return (error_status(&e, StatusCode::INTERNAL_SERVER_ERROR), e.to_string())
                .into_response();
        }
    };

    match state.baby_service.get_baby(GetBabyCommand { baby_id }).await {
        Ok(result) => match result.baby {
            Some(baby) => {
                (StatusCode::OK, Json(mappers::baby_to_detail(baby, unit))).into_response()
            }
            None => (StatusCode::NOT_FOUND, "Baby not found").into_response(),
        },
        Err(e) => {
            error!("Failed to get baby: {}", e);
            (error_status(&e, StatusCode::INTERNAL_SERVER_ERROR), e.to_string()).into_response()
        }
    }
}

/// Delete a baby together with everything in its sub-collections.
pub async fn delete_baby(
    State(state): State<AppState>,
    Path(baby_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/babies/{}", baby_id);

    match state
        .baby_service
        .delete_baby(DeleteBabyCommand { baby_id })
        .await
    {
        Ok(result) => {
            let response = DeleteBabyResponse {
                success_message: result.success_message,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to delete baby: {}", e);
            (error_status(&e, StatusCode::INTERNAL_SERVER_ERROR), e.to_string()).into_response()
        }
    }
}

/// The continuously synced snapshot of the currently watched baby.
pub async fn get_live_baby(State(state): State<AppState>) -> impl IntoResponse {
    let unit = match state.settings_service.get_settings().await {
        Ok(result) => result.settings.weight_unit,
        Err(e) => {
            error!("Failed to load settings: {}", e);
            return (error_status(&e, StatusCode::INTERNAL_SERVER_ERROR), e.to_string())
                .into_response();
        }
    };

    match state.live_sync.current() {
        Some(baby) => {
            (StatusCode::OK, Json(mappers::baby_to_detail(baby, unit))).into_response()
        }
        None => (StatusCode::NOT_FOUND, "No live baby snapshot").into_response(),
    }
}
