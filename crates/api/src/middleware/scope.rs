//! # Establishment Scope
//!
//! Every administrative route acts on behalf of one establishment. Sessions
//! are handled upstream by the authentication layer, which forwards the
//! caller's establishment in the `x-establishment-id` header. This extractor
//! resolves that header to an establishment record.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use salonbook_core::{errors::BookingError, models::establishment::Establishment};
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

pub const ESTABLISHMENT_HEADER: &str = "x-establishment-id";

/// The establishment the current request is scoped to.
#[derive(Debug, Clone)]
pub struct EstablishmentScope {
    pub establishment: Establishment,
}

impl EstablishmentScope {
    pub fn id(&self) -> Uuid {
        self.establishment.id
    }
}

/// Reads and parses the scope header without touching the database.
pub fn establishment_id_from_parts(parts: &Parts) -> Result<Uuid, AppError> {
    let value = parts.headers.get(ESTABLISHMENT_HEADER).ok_or_else(|| {
        AppError(BookingError::Authentication(format!(
            "Missing {} header",
            ESTABLISHMENT_HEADER
        )))
    })?;

    value
        .to_str()
        .ok()
        .and_then(|raw| Uuid::parse_str(raw.trim()).ok())
        .ok_or_else(|| {
            AppError(BookingError::validation(format!(
                "{} must be a UUID",
                ESTABLISHMENT_HEADER
            )))
        })
}

#[async_trait]
impl FromRequestParts<Arc<ApiState>> for EstablishmentScope {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<ApiState>,
    ) -> Result<Self, Self::Rejection> {
        let id = establishment_id_from_parts(parts)?;

        let establishment =
            salonbook_db::repositories::establishment::get_establishment_by_id(&state.db_pool, id)
                .await?
                .ok_or_else(|| {
                    tracing::warn!("Request scoped to unknown establishment {}", id);
                    AppError(BookingError::Authorization(
                        "Caller is not attached to a known establishment".to_string(),
                    ))
                })?;

        Ok(Self {
            establishment: establishment.into(),
        })
    }
}
