use crate::models::DbUnavailability;
use chrono::Utc;
use eyre::Result;
use salonbook_core::models::unavailability::CreateUnavailabilityRequest;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_unavailability(
    pool: &Pool<Postgres>,
    employee_id: Uuid,
    request: &CreateUnavailabilityRequest,
) -> Result<DbUnavailability> {
    let unavailability = sqlx::query_as::<_, DbUnavailability>(
        r#"
        INSERT INTO unavailabilities (id, employee_id, day_of_week, date, start_time, end_time, reason, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id, employee_id, day_of_week, date, start_time, end_time, reason, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(employee_id)
    .bind(request.day_of_week)
    .bind(request.date)
    .bind(request.start_time)
    .bind(request.end_time)
    .bind(&request.reason)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(unavailability)
}

pub async fn list_for_employee(
    pool: &Pool<Postgres>,
    employee_id: Uuid,
) -> Result<Vec<DbUnavailability>> {
    list_for_employees(pool, &[employee_id]).await
}

pub async fn list_for_employees(
    pool: &Pool<Postgres>,
    employee_ids: &[Uuid],
) -> Result<Vec<DbUnavailability>> {
    let rows = sqlx::query_as::<_, DbUnavailability>(
        r#"
        SELECT id, employee_id, day_of_week, date, start_time, end_time, reason, created_at
        FROM unavailabilities
        WHERE employee_id = ANY($1)
        ORDER BY date ASC NULLS FIRST, day_of_week ASC, start_time ASC
        "#,
    )
    .bind(employee_ids)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Deletes only when the employee belongs to the establishment.
pub async fn delete_unavailability(
    pool: &Pool<Postgres>,
    establishment_id: Uuid,
    id: Uuid,
) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM unavailabilities u
        USING employees e
        WHERE u.id = $2 AND u.employee_id = e.id AND e.establishment_id = $1
        "#,
    )
    .bind(establishment_id)
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
