//! REST interface layer.
//!
//! Thin axum handlers that map the public DTOs in `shared` onto domain
//! commands and back. No business logic lives here.

pub mod baby_apis;
pub mod chart_apis;
pub mod entry_apis;
pub mod health_apis;
pub mod mappers;
pub mod settings_apis;

use axum::http::StatusCode;

use crate::storage::StoreError;

/// Map a service failure onto an HTTP status, falling back to `fallback`
/// for plain validation errors.
pub fn error_status(error: &anyhow::Error, fallback: StatusCode) -> StatusCode {
    let store_error = error
        .chain()
        .find_map(|cause| cause.downcast_ref::<StoreError>());

    match store_error {
        Some(StoreError::Unauthenticated) => StatusCode::UNAUTHORIZED,
        Some(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
        Some(StoreError::Decode { .. }) | Some(StoreError::Store(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        None => fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_errors_map_to_statuses() {
        let unauthenticated = anyhow::Error::from(StoreError::Unauthenticated);
        assert_eq!(
            error_status(&unauthenticated, StatusCode::BAD_REQUEST),
            StatusCode::UNAUTHORIZED
        );

        let not_found = anyhow::Error::from(StoreError::not_found("baby x"));
        assert_eq!(
            error_status(&not_found, StatusCode::BAD_REQUEST),
            StatusCode::NOT_FOUND
        );

        let validation = anyhow::anyhow!("name cannot be empty");
        assert_eq!(
            error_status(&validation, StatusCode::BAD_REQUEST),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_wrapped_store_error_is_still_recognized() {
        use anyhow::Context;

        let wrapped = anyhow::Error::from(StoreError::Unauthenticated)
            .context("while listing babies");
        assert_eq!(
            error_status(&wrapped, StatusCode::BAD_REQUEST),
            StatusCode::UNAUTHORIZED
        );
    }
}
