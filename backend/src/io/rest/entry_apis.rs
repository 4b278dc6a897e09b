//! REST API for recording and removing entries.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::{error, info};

use crate::domain::commands::entries::{
    AddDehydrationCheckCommand, AddFeedEntryCommand, AddStoolEntryCommand,
    AddWeightEntryCommand, AddWetDiaperEntryCommand, DeleteEntryCommand,
};
use crate::io::rest::{error_status, mappers};
use crate::AppState;
use shared::{
    CreateDehydrationCheckRequest, CreateFeedEntryRequest, CreateStoolEntryRequest,
    CreateWeightEntryRequest, CreateWetDiaperEntryRequest, DeleteEntryResponse,
};

pub async fn create_feed_entry(
    State(state): State<AppState>,
    Path(baby_id): Path<String>,
    Json(request): Json<CreateFeedEntryRequest>,
) -> impl IntoResponse {
    info!("POST /api/babies/{}/feed-entries", baby_id);

    let timestamp = match mappers::parse_timestamp(request.timestamp) {
        Ok(timestamp) => timestamp,
        Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    };

    let command = AddFeedEntryCommand {
        baby_id,
        timestamp,
        method: mappers::feeding_method_from_dto(request.method),
    };
    match state.entry_service.add_feed_entry(command).await {
        Ok(result) => {
            (StatusCode::CREATED, Json(mappers::feed_entry_to_dto(result.entry))).into_response()
        }
        Err(e) => {
            error!("Failed to create feed entry: {}", e);
            (error_status(&e, StatusCode::BAD_REQUEST), e.to_string()).into_response()
        }
    }
}

pub async fn create_weight_entry(
    State(state): State<AppState>,
    Path(baby_id): Path<String>,
    Json(request): Json<CreateWeightEntryRequest>,
) -> impl IntoResponse {
    info!("POST /api/babies/{}/weight-entries", baby_id);

    let timestamp = match mappers::parse_timestamp(request.timestamp) {
        Ok(timestamp) => timestamp,
        Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    };

    let command = AddWeightEntryCommand {
        baby_id,
        timestamp,
        measurement: mappers::measurement_from_dto(request.measurement),
    };
    match state.entry_service.add_weight_entry(command).await {
        Ok(result) => {
            (StatusCode::CREATED, Json(mappers::weight_entry_to_dto(result.entry)))
                .into_response()
        }
        Err(e) => {
            error!("Failed to create weight entry: {}", e);
            (error_status(&e, StatusCode::BAD_REQUEST), e.to_string()).into_response()
        }
    }
}

pub async fn create_stool_entry(
    State(state): State<AppState>,
    Path(baby_id): Path<String>,
    Json(request): Json<CreateStoolEntryRequest>,
) -> impl IntoResponse {
    info!("POST /api/babies/{}/stool-entries", baby_id);

    let timestamp = match mappers::parse_timestamp(request.timestamp) {
        Ok(timestamp) => timestamp,
        Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    };

    let command = AddStoolEntryCommand {
        baby_id,
        timestamp,
        volume: mappers::volume_from_dto(request.volume),
        color: mappers::stool_color_from_dto(request.color),
    };
    match state.entry_service.add_stool_entry(command).await {
        Ok(result) => {
            (StatusCode::CREATED, Json(mappers::stool_entry_to_dto(result.entry)))
                .into_response()
        }
        Err(e) => {
            error!("Failed to create stool entry: {}", e);
            (error_status(&e, StatusCode::BAD_REQUEST), e.to_string()).into_response()
        }
    }
}

pub async fn create_wet_diaper_entry(
    State(state): State<AppState>,
    Path(baby_id): Path<String>,
    Json(request): Json<CreateWetDiaperEntryRequest>,
) -> impl IntoResponse {
    info!("POST /api/babies/{}/wet-diaper-entries", baby_id);

    let timestamp = match mappers::parse_timestamp(request.timestamp) {
        Ok(timestamp) => timestamp,
        Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    };

    let command = AddWetDiaperEntryCommand {
        baby_id,
        timestamp,
        volume: mappers::volume_from_dto(request.volume),
        color: mappers::wet_diaper_color_from_dto(request.color),
    };
    match state.entry_service.add_wet_diaper_entry(command).await {
        Ok(result) => (
            StatusCode::CREATED,
            Json(mappers::wet_diaper_entry_to_dto(result.entry)),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to create wet-diaper entry: {}", e);
            (error_status(&e, StatusCode::BAD_REQUEST), e.to_string()).into_response()
        }
    }
}

pub async fn create_dehydration_check(
    State(state): State<AppState>,
    Path(baby_id): Path<String>,
    Json(request): Json<CreateDehydrationCheckRequest>,
) -> impl IntoResponse {
    info!("POST /api/babies/{}/dehydration-checks", baby_id);

    let timestamp = match mappers::parse_timestamp(request.timestamp) {
        Ok(timestamp) => timestamp,
        Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    };

    let command = AddDehydrationCheckCommand {
        baby_id,
        timestamp,
        poor_skin_elasticity: request.poor_skin_elasticity,
        dry_mucous_membranes: request.dry_mucous_membranes,
    };
    match state.entry_service.add_dehydration_check(command).await {
        Ok(result) => (
            StatusCode::CREATED,
            Json(mappers::dehydration_check_to_dto(result.entry)),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to create dehydration check: {}", e);
            (error_status(&e, StatusCode::BAD_REQUEST), e.to_string()).into_response()
        }
    }
}

pub async fn delete_feed_entry(
    State(state): State<AppState>,
    Path((baby_id, entry_id)): Path<(String, String)>,
) -> impl IntoResponse {
    info!("DELETE /api/babies/{}/feed-entries/{}", baby_id, entry_id);
    let command = DeleteEntryCommand { baby_id, entry_id };
    delete_response(state.entry_service.delete_feed_entry(command).await)
}

pub async fn delete_weight_entry(
    State(state): State<AppState>,
    Path((baby_id, entry_id)): Path<(String, String)>,
) -> impl IntoResponse {
    info!("DELETE /api/babies/{}/weight-entries/{}", baby_id, entry_id);
    let command = DeleteEntryCommand { baby_id, entry_id };
    delete_response(state.entry_service.delete_weight_entry(command).await)
}

pub async fn delete_stool_entry(
    State(state): State<AppState>,
    Path((baby_id, entry_id)): Path<(String, String)>,
) -> impl IntoResponse {
    info!("DELETE /api/babies/{}/stool-entries/{}", baby_id, entry_id);
    let command = DeleteEntryCommand { baby_id, entry_id };
    delete_response(state.entry_service.delete_stool_entry(command).await)
}

pub async fn delete_wet_diaper_entry(
    State(state): State<AppState>,
    Path((baby_id, entry_id)): Path<(String, String)>,
) -> impl IntoResponse {
    info!(
        "DELETE /api/babies/{}/wet-diaper-entries/{}",
        baby_id, entry_id
    );
    let command = DeleteEntryCommand { baby_id, entry_id };
    delete_response(state.entry_service.delete_wet_diaper_entry(command).await)
}

pub async fn delete_dehydration_check(
    State(state): State<AppState>,
    Path((baby_id, entry_id)): Path<(String, String)>,
) -> impl IntoResponse {
    info!(
        "DELETE /api/babies/{}/dehydration-checks/{}",
        baby_id, entry_id
    );
    let command = DeleteEntryCommand { baby_id, entry_id };
    delete_response(state.entry_service.delete_dehydration_check(command).await)
}

fn delete_response(
    result: anyhow::Result<crate::domain::commands::entries::DeleteEntryResult>,
) -> axum::response::Response {
    match result {
        Ok(result) => {
            let response = DeleteEntryResponse {
                success_message: result.success_message,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to delete entry: {}", e);
            (error_status(&e, StatusCode::INTERNAL_SERVER_ERROR), e.to_string()).into_response()
        }
    }
}
