use salonbook_core::errors::{BookingError, BookingResult};
use salonbook_db::{
    DbPool,
    repositories::ownership::{Owned, owner_of},
};
use uuid::Uuid;

/// Decides whether a referenced record may be used by `establishment_id`.
///
/// Missing records are not found; records of another establishment are
/// forbidden.
pub fn check_owner(
    kind: Owned,
    id: Uuid,
    owner: Option<Uuid>,
    establishment_id: Uuid,
) -> BookingResult<()> {
    match owner {
        None => Err(BookingError::not_found(kind.label(), id)),
        Some(owner) if owner == establishment_id => Ok(()),
        Some(_) => {
            tracing::warn!(
                "Establishment {} referenced {} {} it does not own",
                establishment_id,
                kind.label(),
                id
            );
            Err(BookingError::Authorization(format!(
                "{} {} belongs to another establishment",
                kind.label(),
                id
            )))
        }
    }
}

pub async fn ensure_owned(
    pool: &DbPool,
    establishment_id: Uuid,
    kind: Owned,
    id: Uuid,
) -> BookingResult<()> {
    let owner = owner_of(pool, kind, id).await?;
    check_owner(kind, id, owner, establishment_id)
}
