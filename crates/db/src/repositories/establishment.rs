use crate::models::DbEstablishment;
use chrono::Utc;
use eyre::{Result, eyre};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_establishment(
    pool: &Pool<Postgres>,
    name: &str,
    phone: Option<&str>,
    address: Option<&str>,
    timezone: &str,
) -> Result<DbEstablishment> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!("Creating establishment: id={}, name={}, timezone={}", id, name, timezone);

    let establishment = sqlx::query_as::<_, DbEstablishment>(
        r#"
        INSERT INTO establishments (id, name, phone, address, timezone, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, name, phone, address, timezone, created_at
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(phone)
    .bind(address)
    .bind(timezone)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(establishment)
}

pub async fn get_establishment_by_id(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<DbEstablishment>> {
    let establishment = sqlx::query_as::<_, DbEstablishment>(
        r#"
        SELECT id, name, phone, address, timezone, created_at
        FROM establishments
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(establishment)
}

pub async fn update_establishment(
    pool: &Pool<Postgres>,
    id: Uuid,
    name: Option<&str>,
    phone: Option<&str>,
    address: Option<&str>,
    timezone: Option<&str>,
) -> Result<DbEstablishment> {
    let current = get_establishment_by_id(pool, id)
        .await?
        .ok_or_else(|| eyre!("Establishment not found"))?;

    let updated = sqlx::query_as::<_, DbEstablishment>(
        r#"
        UPDATE establishments
        SET name = $2, phone = $3, address = $4, timezone = $5
        WHERE id = $1
        RETURNING id, name, phone, address, timezone, created_at
        "#,
    )
    .bind(id)
    .bind(name.unwrap_or(&current.name))
    .bind(phone.or(current.phone.as_deref()))
    .bind(address.or(current.address.as_deref()))
    .bind(timezone.unwrap_or(&current.timezone))
    .fetch_one(pool)
    .await?;

    Ok(updated)
}

/// Returns (has_store_hours, has_services, has_employees).
pub async fn onboarding_status(
    pool: &Pool<Postgres>,
    establishment_id: Uuid,
) -> Result<(bool, bool, bool)> {
    let status = sqlx::query_as::<_, (bool, bool, bool)>(
        r#"
        SELECT
            EXISTS (SELECT 1 FROM opening_hours WHERE establishment_id = $1),
            EXISTS (SELECT 1 FROM services WHERE establishment_id = $1 AND active),
            EXISTS (SELECT 1 FROM employees WHERE establishment_id = $1 AND active)
        "#,
    )
    .bind(establishment_id)
    .fetch_one(pool)
    .await?;

    Ok(status)
}
