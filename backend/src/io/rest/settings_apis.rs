//! REST API for user preferences.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::{error, info, warn};

use crate::domain::commands::settings::UpdateSettingsCommand;
use crate::io::rest::{error_status, mappers};
use crate::AppState;
use shared::UpdateSettingsRequest;

pub async fn get_settings(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/settings");

    match state.settings_service.get_settings().await {
        Ok(result) => {
            (StatusCode::OK, Json(mappers::settings_to_dto(result.settings))).into_response()
        }
        Err(e) => {
            error!("Failed to load settings: {}", e);
            (error_status(&e, StatusCode::INTERNAL_SERVER_ERROR), e.to_string()).into_response()
        }
    }
}

/// Apply a partial settings update. Selecting a baby also repoints the
/// live snapshot at it.
pub async fn update_settings(
    State(state): State<AppState>,
    Json(request): Json<UpdateSettingsRequest>,
) -> impl IntoResponse {
    info!("PUT /api/settings - request: {:?}", request);

    let command = UpdateSettingsCommand {
        selected_baby_id: request.selected_baby_id,
        weight_unit: request.weight_unit.map(mappers::weight_unit_from_dto),
    };

    match state.settings_service.update_settings(command).await {
        Ok(result) => {
            if let Some(baby_id) = &result.settings.selected_baby_id {
                if state.live_sync.listening_to().as_deref() != Some(baby_id.as_str()) {
                    if let Err(e) = state.live_sync.start_listening(baby_id) {
                        warn!("Could not start live sync for {}: {}", baby_id, e);
                    }
                }
            }
            (StatusCode::OK, Json(mappers::settings_to_dto(result.settings))).into_response()
        }
        Err(e) => {
            error!("Failed to update settings: {}", e);
            (error_status(&e, StatusCode::BAD_REQUEST), e.to_string()).into_response()
        }
    }
}
