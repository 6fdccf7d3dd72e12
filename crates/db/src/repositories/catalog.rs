//! Categories and the services they group.

use crate::models::{DbCategory, DbService};
use chrono::Utc;
use eyre::Result;
use salonbook_core::models::service::{CreateServiceRequest, UpdateServiceRequest};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

// Category Repository

pub async fn create_category(
    pool: &Pool<Postgres>,
    establishment_id: Uuid,
    name: &str,
) -> Result<DbCategory> {
    let category = sqlx::query_as::<_, DbCategory>(
        r#"
        INSERT INTO categories (id, establishment_id, name, created_at)
        VALUES ($1, $2, $3, $4)
        RETURNING id, establishment_id, name, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(establishment_id)
    .bind(name)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(category)
}

pub async fn list_categories(
    pool: &Pool<Postgres>,
    establishment_id: Uuid,
) -> Result<Vec<DbCategory>> {
    let categories = sqlx::query_as::<_, DbCategory>(
        r#"
        SELECT id, establishment_id, name, created_at
        FROM categories
        WHERE establishment_id = $1
        ORDER BY name ASC
        "#,
    )
    .bind(establishment_id)
    .fetch_all(pool)
    .await?;

    Ok(categories)
}

pub async fn update_category(
    pool: &Pool<Postgres>,
    establishment_id: Uuid,
    id: Uuid,
    name: &str,
) -> Result<Option<DbCategory>> {
    let category = sqlx::query_as::<_, DbCategory>(
        r#"
        UPDATE categories
        SET name = $3
        WHERE establishment_id = $1 AND id = $2
        RETURNING id, establishment_id, name, created_at
        "#,
    )
    .bind(establishment_id)
    .bind(id)
    .bind(name)
    .fetch_optional(pool)
    .await?;

    Ok(category)
}

pub async fn delete_category(
    pool: &Pool<Postgres>,
    establishment_id: Uuid,
    id: Uuid,
) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM categories
        WHERE establishment_id = $1 AND id = $2
        "#,
    )
    .bind(establishment_id)
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

// Service Repository

pub async fn create_service(
    pool: &Pool<Postgres>,
    establishment_id: Uuid,
    request: &CreateServiceRequest,
) -> Result<DbService> {
    let service = sqlx::query_as::<_, DbService>(
        r#"
        INSERT INTO services (id, establishment_id, category_id, name, description,
                              duration_minutes, price_cents, active, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, TRUE, $8)
        RETURNING id, establishment_id, category_id, name, description,
                  duration_minutes, price_cents, active, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(establishment_id)
    .bind(request.category_id)
    .bind(&request.name)
    .bind(&request.description)
    .bind(request.duration_minutes)
    .bind(request.price_cents)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(service)
}

pub async fn list_services(
    pool: &Pool<Postgres>,
    establishment_id: Uuid,
    only_active: bool,
) -> Result<Vec<DbService>> {
    let services = sqlx::query_as::<_, DbService>(
        r#"
        SELECT id, establishment_id, category_id, name, description,
               duration_minutes, price_cents, active, created_at
        FROM services
        WHERE establishment_id = $1 AND (active OR NOT $2)
        ORDER BY name ASC
        "#,
    )
    .bind(establishment_id)
    .bind(only_active)
    .fetch_all(pool)
    .await?;

    Ok(services)
}

pub async fn get_service(
    pool: &Pool<Postgres>,
    establishment_id: Uuid,
    id: Uuid,
) -> Result<Option<DbService>> {
    let service = sqlx::query_as::<_, DbService>(
        r#"
        SELECT id, establishment_id, category_id, name, description,
               duration_minutes, price_cents, active, created_at
        FROM services
        WHERE establishment_id = $1 AND id = $2
        "#,
    )
    .bind(establishment_id)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(service)
}

pub async fn update_service(
    pool: &Pool<Postgres>,
    establishment_id: Uuid,
    id: Uuid,
    request: &UpdateServiceRequest,
) -> Result<Option<DbService>> {
    let service = sqlx::query_as::<_, DbService>(
        r#"
        UPDATE services
        SET category_id = COALESCE($3, category_id),
            name = COALESCE($4, name),
            description = COALESCE($5, description),
            duration_minutes = COALESCE($6, duration_minutes),
            price_cents = COALESCE($7, price_cents),
            active = COALESCE($8, active)
        WHERE establishment_id = $1 AND id = $2
        RETURNING id, establishment_id, category_id, name, description,
                  duration_minutes, price_cents, active, created_at
        "#,
    )
    .bind(establishment_id)
    .bind(id)
    .bind(request.category_id)
    .bind(&request.name)
    .bind(&request.description)
    .bind(request.duration_minutes)
    .bind(request.price_cents)
    .bind(request.active)
    .fetch_optional(pool)
    .await?;

    Ok(service)
}

pub async fn delete_service(
    pool: &Pool<Postgres>,
    establishment_id: Uuid,
    id: Uuid,
) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM services
        WHERE establishment_id = $1 AND id = $2
        "#,
    )
    .bind(establishment_id)
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
