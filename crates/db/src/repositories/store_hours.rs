use crate::models::{DbInterval, DbOpeningHours};
use eyre::Result;
use salonbook_core::models::store_hours::{OpeningHours, UpsertOpeningHoursRequest};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn list_opening_hours(
    pool: &Pool<Postgres>,
    establishment_id: Uuid,
) -> Result<Vec<OpeningHours>> {
    let rows = sqlx::query_as::<_, DbOpeningHours>(
        r#"
        SELECT id, establishment_id, day_of_week, opening_time, closing_time
        FROM opening_hours
        WHERE establishment_id = $1
        ORDER BY day_of_week ASC
        "#,
    )
    .bind(establishment_id)
    .fetch_all(pool)
    .await?;

    let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
    let intervals = list_intervals(pool, &ids).await?;

    Ok(rows
        .into_iter()
        .map(|row| row.with_breaks(&intervals))
        .collect())
}

pub async fn get_opening_hours_for_day(
    pool: &Pool<Postgres>,
    establishment_id: Uuid,
    day_of_week: i16,
) -> Result<Option<DbOpeningHours>> {
    let row = sqlx::query_as::<_, DbOpeningHours>(
        r#"
        SELECT id, establishment_id, day_of_week, opening_time, closing_time
        FROM opening_hours
        WHERE establishment_id = $1 AND day_of_week = $2
        "#,
    )
    .bind(establishment_id)
    .bind(day_of_week)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn list_intervals(
    pool: &Pool<Postgres>,
    opening_hour_ids: &[Uuid],
) -> Result<Vec<DbInterval>> {
    let intervals = sqlx::query_as::<_, DbInterval>(
        r#"
        SELECT id, opening_hour_id, start_time, end_time
        FROM intervals
        WHERE opening_hour_id = ANY($1)
        ORDER BY start_time ASC
        "#,
    )
    .bind(opening_hour_ids)
    .fetch_all(pool)
    .await?;

    Ok(intervals)
}

/// Replaces the hours of one weekday and all of its breaks atomically.
pub async fn upsert_opening_hours(
    pool: &Pool<Postgres>,
    establishment_id: Uuid,
    day_of_week: i16,
    request: &UpsertOpeningHoursRequest,
) -> Result<OpeningHours> {
    let mut tx = pool.begin().await?;

    let row = sqlx::query_as::<_, DbOpeningHours>(
        r#"
        INSERT INTO opening_hours (id, establishment_id, day_of_week, opening_time, closing_time)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (establishment_id, day_of_week)
        DO UPDATE SET opening_time = $4, closing_time = $5
        RETURNING id, establishment_id, day_of_week, opening_time, closing_time
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(establishment_id)
    .bind(day_of_week)
    .bind(request.opening_time)
    .bind(request.closing_time)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query("DELETE FROM intervals WHERE opening_hour_id = $1")
        .bind(row.id)
        .execute(&mut *tx)
        .await?;

    let mut intervals = Vec::with_capacity(request.breaks.len());
    for interval in &request.breaks {
        let inserted = sqlx::query_as::<_, DbInterval>(
            r#"
            INSERT INTO intervals (id, opening_hour_id, start_time, end_time)
            VALUES ($1, $2, $3, $4)
            RETURNING id, opening_hour_id, start_time, end_time
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(row.id)
        .bind(interval.start_time)
        .bind(interval.end_time)
        .fetch_one(&mut *tx)
        .await?;
        intervals.push(inserted);
    }

    tx.commit().await?;

    tracing::debug!(
        "Stored opening hours: establishment_id={}, day={}, breaks={}",
        establishment_id,
        day_of_week,
        intervals.len()
    );

    Ok(row.with_breaks(&intervals))
}

pub async fn delete_opening_hours(
    pool: &Pool<Postgres>,
    establishment_id: Uuid,
    day_of_week: i16,
) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM opening_hours
        WHERE establishment_id = $1 AND day_of_week = $2
        "#,
    )
    .bind(establishment_id)
    .bind(day_of_week)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
