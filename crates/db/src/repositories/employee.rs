use crate::models::DbEmployee;
use chrono::Utc;
use eyre::Result;
use salonbook_core::models::employee::{CreateEmployeeRequest, UpdateEmployeeRequest};
use sqlx::{PgConnection, Pool, Postgres};
use uuid::Uuid;

pub async fn create_employee(
    pool: &Pool<Postgres>,
    establishment_id: Uuid,
    request: &CreateEmployeeRequest,
) -> Result<DbEmployee> {
    let employee = sqlx::query_as::<_, DbEmployee>(
        r#"
        INSERT INTO employees (id, establishment_id, name, email, phone, active, created_at)
        VALUES ($1, $2, $3, $4, $5, TRUE, $6)
        RETURNING id, establishment_id, name, email, phone, active, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(establishment_id)
    .bind(&request.name)
    .bind(&request.email)
    .bind(&request.phone)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(employee)
}

pub async fn list_employees(
    pool: &Pool<Postgres>,
    establishment_id: Uuid,
    only_active: bool,
) -> Result<Vec<DbEmployee>> {
    let employees = sqlx::query_as::<_, DbEmployee>(
        r#"
        SELECT id, establishment_id, name, email, phone, active, created_at
        FROM employees
        WHERE establishment_id = $1 AND (active OR NOT $2)
        ORDER BY name ASC
        "#,
    )
    .bind(establishment_id)
    .bind(only_active)
    .fetch_all(pool)
    .await?;

    Ok(employees)
}

pub async fn get_employee(
    pool: &Pool<Postgres>,
    establishment_id: Uuid,
    id: Uuid,
) -> Result<Option<DbEmployee>> {
    let employee = sqlx::query_as::<_, DbEmployee>(
        r#"
        SELECT id, establishment_id, name, email, phone, active, created_at
        FROM employees
        WHERE establishment_id = $1 AND id = $2
        "#,
    )
    .bind(establishment_id)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(employee)
}

/// Locks the employee row for the rest of the transaction so that
/// concurrent bookings for the same employee run one after another.
pub async fn lock_employee(conn: &mut PgConnection, id: Uuid) -> Result<bool> {
    let locked = sqlx::query_scalar::<_, Uuid>(
        r#"
        SELECT id FROM employees WHERE id = $1 FOR UPDATE
        "#,
    )
    .bind(id)
    .fetch_optional(conn)
    .await?;

    Ok(locked.is_some())
}

pub async fn update_employee(
    pool: &Pool<Postgres>,
    establishment_id: Uuid,
    id: Uuid,
    request: &UpdateEmployeeRequest,
) -> Result<Option<DbEmployee>> {
    let employee = sqlx::query_as::<_, DbEmployee>(
        r#"
        UPDATE employees
        SET name = COALESCE($3, name),
            email = COALESCE($4, email),
            phone = COALESCE($5, phone),
            active = COALESCE($6, active)
        WHERE establishment_id = $1 AND id = $2
        RETURNING id, establishment_id, name, email, phone, active, created_at
        "#,
    )
    .bind(establishment_id)
    .bind(id)
    .bind(&request.name)
    .bind(&request.email)
    .bind(&request.phone)
    .bind(request.active)
    .fetch_optional(pool)
    .await?;

    Ok(employee)
}

pub async fn delete_employee(
    pool: &Pool<Postgres>,
    establishment_id: Uuid,
    id: Uuid,
) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM employees
        WHERE establishment_id = $1 AND id = $2
        "#,
    )
    .bind(establishment_id)
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
