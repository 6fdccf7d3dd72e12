use crate::models::DbAppointment;
use chrono::{DateTime, Utc};
use eyre::Result;
use salonbook_core::models::appointment::AppointmentStatus;
use sqlx::{PgConnection, Pool, Postgres};
use uuid::Uuid;

const COLUMNS: &str = "id, establishment_id, employee_id, service_id, customer_id, customer_package_id, \
                       start_time, end_time, status, notes, checked_in_at, created_at";

/// Fields of a new appointment once its end time has been derived.
#[derive(Debug, Clone)]
pub struct NewAppointment<'a> {
    pub establishment_id: Uuid,
    pub employee_id: Uuid,
    pub service_id: Uuid,
    pub customer_id: Uuid,
    pub customer_package_id: Option<Uuid>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub notes: Option<&'a str>,
}

/// Whether the employee already has a non-cancelled appointment overlapping
/// `[start, end)`. `exclude` skips the appointment being rescheduled.
pub async fn has_overlap(
    conn: &mut PgConnection,
    employee_id: Uuid,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    exclude: Option<Uuid>,
) -> Result<bool> {
    let overlap = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS (
            SELECT 1
            FROM appointments
            WHERE employee_id = $1
              AND status <> 'cancelled'
              AND start_time < $3
              AND end_time > $2
              AND ($4::uuid IS NULL OR id <> $4)
        )
        "#,
    )
    .bind(employee_id)
    .bind(start)
    .bind(end)
    .bind(exclude)
    .fetch_one(conn)
    .await?;

    Ok(overlap)
}

pub async fn insert_appointment(
    conn: &mut PgConnection,
    appointment: &NewAppointment<'_>,
) -> Result<DbAppointment> {
    let id = Uuid::new_v4();

    tracing::debug!(
        "Creating appointment: id={}, employee_id={}, start={}, end={}",
        id,
        appointment.employee_id,
        appointment.start_time,
        appointment.end_time
    );

    let row = sqlx::query_as::<_, DbAppointment>(&format!(
        r#"
        INSERT INTO appointments (id, establishment_id, employee_id, service_id, customer_id,
                                  customer_package_id, start_time, end_time, status, notes, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(id)
    .bind(appointment.establishment_id)
    .bind(appointment.employee_id)
    .bind(appointment.service_id)
    .bind(appointment.customer_id)
    .bind(appointment.customer_package_id)
    .bind(appointment.start_time)
    .bind(appointment.end_time)
    .bind(AppointmentStatus::Scheduled.as_str())
    .bind(appointment.notes)
    .bind(Utc::now())
    .fetch_one(conn)
    .await?;

    Ok(row)
}

pub async fn get_appointment(
    pool: &Pool<Postgres>,
    establishment_id: Uuid,
    id: Uuid,
) -> Result<Option<DbAppointment>> {
    let row = sqlx::query_as::<_, DbAppointment>(&format!(
        "SELECT {COLUMNS} FROM appointments WHERE establishment_id = $1 AND id = $2"
    ))
    .bind(establishment_id)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Same as [`get_appointment`] but locks the row inside a transaction.
pub async fn get_appointment_for_update(
    conn: &mut PgConnection,
    establishment_id: Uuid,
    id: Uuid,
) -> Result<Option<DbAppointment>> {
    let row = sqlx::query_as::<_, DbAppointment>(&format!(
        "SELECT {COLUMNS} FROM appointments WHERE establishment_id = $1 AND id = $2 FOR UPDATE"
    ))
    .bind(establishment_id)
    .bind(id)
    .fetch_optional(conn)
    .await?;

    Ok(row)
}

pub async fn list_appointments(
    pool: &Pool<Postgres>,
    establishment_id: Uuid,
) -> Result<Vec<DbAppointment>> {
    let rows = sqlx::query_as::<_, DbAppointment>(&format!(
        "SELECT {COLUMNS} FROM appointments WHERE establishment_id = $1 ORDER BY start_time ASC"
    ))
    .bind(establishment_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Appointments starting within `[from, to)`.
pub async fn list_appointments_by_period(
    pool: &Pool<Postgres>,
    establishment_id: Uuid,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Result<Vec<DbAppointment>> {
    let rows = sqlx::query_as::<_, DbAppointment>(&format!(
        r#"
        SELECT {COLUMNS}
        FROM appointments
        WHERE establishment_id = $1 AND start_time >= $2 AND start_time < $3
        ORDER BY start_time ASC
        "#
    ))
    .bind(establishment_id)
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Non-cancelled appointments of the given employees overlapping `[from, to)`.
pub async fn list_busy_for_employees(
    pool: &Pool<Postgres>,
    employee_ids: &[Uuid],
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Result<Vec<DbAppointment>> {
    let rows = sqlx::query_as::<_, DbAppointment>(&format!(
        r#"
        SELECT {COLUMNS}
        FROM appointments
        WHERE employee_id = ANY($1)
          AND status <> 'cancelled'
          AND start_time < $3
          AND end_time > $2
        ORDER BY start_time ASC
        "#
    ))
    .bind(employee_ids)
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn reschedule_appointment(
    conn: &mut PgConnection,
    id: Uuid,
    employee_id: Uuid,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    notes: Option<&str>,
) -> Result<DbAppointment> {
    let row = sqlx::query_as::<_, DbAppointment>(&format!(
        r#"
        UPDATE appointments
        SET employee_id = $2, start_time = $3, end_time = $4, notes = COALESCE($5, notes)
        WHERE id = $1
        RETURNING {COLUMNS}
        "#
    ))
    .bind(id)
    .bind(employee_id)
    .bind(start_time)
    .bind(end_time)
    .bind(notes)
    .fetch_one(conn)
    .await?;

    Ok(row)
}

pub async fn set_status(
    conn: &mut PgConnection,
    id: Uuid,
    status: AppointmentStatus,
) -> Result<DbAppointment> {
    let checked_in_at = (status == AppointmentStatus::CheckedIn).then(Utc::now);

    let row = sqlx::query_as::<_, DbAppointment>(&format!(
        r#"
        UPDATE appointments
        SET status = $2, checked_in_at = COALESCE($3, checked_in_at)
        WHERE id = $1
        RETURNING {COLUMNS}
        "#
    ))
    .bind(id)
    .bind(status.as_str())
    .bind(checked_in_at)
    .fetch_one(conn)
    .await?;

    Ok(row)
}

pub async fn delete_appointment(
    pool: &Pool<Postgres>,
    establishment_id: Uuid,
    id: Uuid,
) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM appointments
        WHERE establishment_id = $1 AND id = $2
        "#,
    )
    .bind(establishment_id)
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
