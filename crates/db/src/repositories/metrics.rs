use crate::models::{DbServiceMetric, DbStatusCount};
use chrono::{DateTime, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub const TOP_SERVICES_LIMIT: i64 = 5;

pub async fn count_by_status(
    pool: &Pool<Postgres>,
    establishment_id: Uuid,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Result<Vec<DbStatusCount>> {
    let counts = sqlx::query_as::<_, DbStatusCount>(
        r#"
        SELECT status, COUNT(*) AS count
        FROM appointments
        WHERE establishment_id = $1 AND start_time >= $2 AND start_time < $3
        GROUP BY status
        "#,
    )
    .bind(establishment_id)
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await?;

    Ok(counts)
}

/// Revenue of completed appointments, grouped by service and ranked by
/// appointment count.
pub async fn top_services(
    pool: &Pool<Postgres>,
    establishment_id: Uuid,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Result<Vec<DbServiceMetric>> {
    let services = sqlx::query_as::<_, DbServiceMetric>(
        r#"
        SELECT s.id AS service_id, s.name,
               COUNT(a.id) AS appointments,
               COALESCE(SUM(s.price_cents), 0)::BIGINT AS revenue_cents
        FROM appointments a
        JOIN services s ON s.id = a.service_id
        WHERE a.establishment_id = $1
          AND a.status = 'completed'
          AND a.start_time >= $2 AND a.start_time < $3
        GROUP BY s.id, s.name
        ORDER BY appointments DESC, s.name ASC
        LIMIT $4
        "#,
    )
    .bind(establishment_id)
    .bind(from)
    .bind(to)
    .bind(TOP_SERVICES_LIMIT)
    .fetch_all(pool)
    .await?;

    Ok(services)
}

pub async fn total_revenue(
    pool: &Pool<Postgres>,
    establishment_id: Uuid,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Result<i64> {
    let revenue = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COALESCE(SUM(s.price_cents), 0)::BIGINT
        FROM appointments a
        JOIN services s ON s.id = a.service_id
        WHERE a.establishment_id = $1
          AND a.status = 'completed'
          AND a.start_time >= $2 AND a.start_time < $3
        "#,
    )
    .bind(establishment_id)
    .bind(from)
    .bind(to)
    .fetch_one(pool)
    .await?;

    Ok(revenue)
}
