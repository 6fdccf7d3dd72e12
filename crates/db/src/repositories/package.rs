use crate::models::{DbCustomerPackage, DbPackage};
use chrono::Utc;
use eyre::Result;
use salonbook_core::models::package::{CreatePackageRequest, UpdatePackageRequest};
use sqlx::{PgConnection, Pool, Postgres};
use uuid::Uuid;

// Package Repository

pub async fn create_package(
    pool: &Pool<Postgres>,
    establishment_id: Uuid,
    request: &CreatePackageRequest,
) -> Result<DbPackage> {
    let package = sqlx::query_as::<_, DbPackage>(
        r#"
        INSERT INTO packages (id, establishment_id, service_id, name, sessions, price_cents, active, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, TRUE, $7)
        RETURNING id, establishment_id, service_id, name, sessions, price_cents, active, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(establishment_id)
    .bind(request.service_id)
    .bind(&request.name)
    .bind(request.sessions)
    .bind(request.price_cents)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(package)
}

pub async fn list_packages(
    pool: &Pool<Postgres>,
    establishment_id: Uuid,
) -> Result<Vec<DbPackage>> {
    let packages = sqlx::query_as::<_, DbPackage>(
        r#"
        SELECT id, establishment_id, service_id, name, sessions, price_cents, active, created_at
        FROM packages
        WHERE establishment_id = $1
        ORDER BY name ASC
        "#,
    )
    .bind(establishment_id)
    .fetch_all(pool)
    .await?;

    Ok(packages)
}

pub async fn get_package(
    pool: &Pool<Postgres>,
    establishment_id: Uuid,
    id: Uuid,
) -> Result<Option<DbPackage>> {
    let package = sqlx::query_as::<_, DbPackage>(
        r#"
        SELECT id, establishment_id, service_id, name, sessions, price_cents, active, created_at
        FROM packages
        WHERE establishment_id = $1 AND id = $2
        "#,
    )
    .bind(establishment_id)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(package)
}

pub async fn update_package(
    pool: &Pool<Postgres>,
    establishment_id: Uuid,
    id: Uuid,
    request: &UpdatePackageRequest,
) -> Result<Option<DbPackage>> {
    let package = sqlx::query_as::<_, DbPackage>(
        r#"
        UPDATE packages
        SET name = COALESCE($3, name),
            sessions = COALESCE($4, sessions),
            price_cents = COALESCE($5, price_cents),
            active = COALESCE($6, active)
        WHERE establishment_id = $1 AND id = $2
        RETURNING id, establishment_id, service_id, name, sessions, price_cents, active, created_at
        "#,
    )
    .bind(establishment_id)
    .bind(id)
    .bind(&request.name)
    .bind(request.sessions)
    .bind(request.price_cents)
    .bind(request.active)
    .fetch_optional(pool)
    .await?;

    Ok(package)
}

pub async fn delete_package(
    pool: &Pool<Postgres>,
    establishment_id: Uuid,
    id: Uuid,
) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM packages
        WHERE establishment_id = $1 AND id = $2
        "#,
    )
    .bind(establishment_id)
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

// Customer Package Repository

/// Starts the customer with the package's full session count.
pub async fn purchase_package(
    pool: &Pool<Postgres>,
    package: &DbPackage,
    customer_id: Uuid,
) -> Result<DbCustomerPackage> {
    let purchase = sqlx::query_as::<_, DbCustomerPackage>(
        r#"
        INSERT INTO customer_packages (id, package_id, customer_id, remaining_sessions, purchased_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, package_id, customer_id, remaining_sessions, purchased_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(package.id)
    .bind(customer_id)
    .bind(package.sessions)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(purchase)
}

pub async fn list_customer_packages(
    pool: &Pool<Postgres>,
    customer_id: Uuid,
) -> Result<Vec<DbCustomerPackage>> {
    let packages = sqlx::query_as::<_, DbCustomerPackage>(
        r#"
        SELECT id, package_id, customer_id, remaining_sessions, purchased_at
        FROM customer_packages
        WHERE customer_id = $1
        ORDER BY purchased_at DESC
        "#,
    )
    .bind(customer_id)
    .fetch_all(pool)
    .await?;

    Ok(packages)
}

pub async fn get_customer_package(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<DbCustomerPackage>> {
    let package = sqlx::query_as::<_, DbCustomerPackage>(
        r#"
        SELECT id, package_id, customer_id, remaining_sessions, purchased_at
        FROM customer_packages
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(package)
}

/// Takes one session. Returns `None` when none are left.
pub async fn consume_session(
    conn: &mut PgConnection,
    customer_package_id: Uuid,
) -> Result<Option<DbCustomerPackage>> {
    let package = sqlx::query_as::<_, DbCustomerPackage>(
        r#"
        UPDATE customer_packages
        SET remaining_sessions = remaining_sessions - 1
        WHERE id = $1 AND remaining_sessions > 0
        RETURNING id, package_id, customer_id, remaining_sessions, purchased_at
        "#,
    )
    .bind(customer_package_id)
    .fetch_optional(conn)
    .await?;

    Ok(package)
}
