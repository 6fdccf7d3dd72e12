use crate::models::{DbLoyaltyBalance, DbLoyaltyProgram};
use chrono::Utc;
use eyre::Result;
use salonbook_core::models::loyalty::{CreateLoyaltyProgramRequest, UpdateLoyaltyProgramRequest};
use sqlx::{PgConnection, Pool, Postgres};
use uuid::Uuid;

// Loyalty Program Repository

pub async fn create_program(
    pool: &Pool<Postgres>,
    establishment_id: Uuid,
    request: &CreateLoyaltyProgramRequest,
) -> Result<DbLoyaltyProgram> {
    let program = sqlx::query_as::<_, DbLoyaltyProgram>(
        r#"
        INSERT INTO loyalty_programs (id, establishment_id, name, bonus_service_id,
                                      points_per_appointment, points_required, active, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, TRUE, $7)
        RETURNING id, establishment_id, name, bonus_service_id,
                  points_per_appointment, points_required, active, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(establishment_id)
    .bind(&request.name)
    .bind(request.bonus_service_id)
    .bind(request.points_per_appointment)
    .bind(request.points_required)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(program)
}

pub async fn list_programs(
    pool: &Pool<Postgres>,
    establishment_id: Uuid,
) -> Result<Vec<DbLoyaltyProgram>> {
    let programs = sqlx::query_as::<_, DbLoyaltyProgram>(
        r#"
        SELECT id, establishment_id, name, bonus_service_id,
               points_per_appointment, points_required, active, created_at
        FROM loyalty_programs
        WHERE establishment_id = $1
        ORDER BY name ASC
        "#,
    )
    .bind(establishment_id)
    .fetch_all(pool)
    .await?;

    Ok(programs)
}

pub async fn get_program(
    pool: &Pool<Postgres>,
    establishment_id: Uuid,
    id: Uuid,
) -> Result<Option<DbLoyaltyProgram>> {
    let program = sqlx::query_as::<_, DbLoyaltyProgram>(
        r#"
        SELECT id, establishment_id, name, bonus_service_id,
               points_per_appointment, points_required, active, created_at
        FROM loyalty_programs
        WHERE establishment_id = $1 AND id = $2
        "#,
    )
    .bind(establishment_id)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(program)
}

pub async fn update_program(
    pool: &Pool<Postgres>,
    establishment_id: Uuid,
    id: Uuid,
    request: &UpdateLoyaltyProgramRequest,
) -> Result<Option<DbLoyaltyProgram>> {
    let program = sqlx::query_as::<_, DbLoyaltyProgram>(
        r#"
        UPDATE loyalty_programs
        SET name = COALESCE($3, name),
            bonus_service_id = COALESCE($4, bonus_service_id),
            points_per_appointment = COALESCE($5, points_per_appointment),
            points_required = COALESCE($6, points_required),
            active = COALESCE($7, active)
        WHERE establishment_id = $1 AND id = $2
        RETURNING id, establishment_id, name, bonus_service_id,
                  points_per_appointment, points_required, active, created_at
        "#,
    )
    .bind(establishment_id)
    .bind(id)
    .bind(&request.name)
    .bind(request.bonus_service_id)
    .bind(request.points_per_appointment)
    .bind(request.points_required)
    .bind(request.active)
    .fetch_optional(pool)
    .await?;

    Ok(program)
}

pub async fn delete_program(
    pool: &Pool<Postgres>,
    establishment_id: Uuid,
    id: Uuid,
) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM loyalty_programs
        WHERE establishment_id = $1 AND id = $2
        "#,
    )
    .bind(establishment_id)
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

// Loyalty Balance Repository

/// Credits every active program of the establishment for one completed
/// appointment. Returns the number of programs credited.
pub async fn accrue_points(
    conn: &mut PgConnection,
    establishment_id: Uuid,
    customer_id: Uuid,
) -> Result<u64> {
    let result = sqlx::query(
        r#"
        INSERT INTO loyalty_balances (program_id, customer_id, points)
        SELECT id, $2, points_per_appointment
        FROM loyalty_programs
        WHERE establishment_id = $1 AND active
        ON CONFLICT (program_id, customer_id)
        DO UPDATE SET points = loyalty_balances.points + EXCLUDED.points
        "#,
    )
    .bind(establishment_id)
    .bind(customer_id)
    .execute(conn)
    .await?;

    Ok(result.rows_affected())
}

pub async fn list_balances_for_customer(
    pool: &Pool<Postgres>,
    establishment_id: Uuid,
    customer_id: Uuid,
) -> Result<Vec<DbLoyaltyBalance>> {
    let balances = sqlx::query_as::<_, DbLoyaltyBalance>(
        r#"
        SELECT p.id AS program_id, $2 AS customer_id,
               COALESCE(b.points, 0) AS points, p.points_required
        FROM loyalty_programs p
        LEFT JOIN loyalty_balances b ON b.program_id = p.id AND b.customer_id = $2
        WHERE p.establishment_id = $1
        ORDER BY p.name ASC
        "#,
    )
    .bind(establishment_id)
    .bind(customer_id)
    .fetch_all(pool)
    .await?;

    Ok(balances)
}

/// Deducts `points_required` for one reward. Returns `None` when the customer
/// does not have enough points.
pub async fn redeem_reward(
    pool: &Pool<Postgres>,
    program: &DbLoyaltyProgram,
    customer_id: Uuid,
) -> Result<Option<DbLoyaltyBalance>> {
    let balance = sqlx::query_as::<_, DbLoyaltyBalance>(
        r#"
        UPDATE loyalty_balances
        SET points = points - $3
        WHERE program_id = $1 AND customer_id = $2 AND points >= $3
        RETURNING program_id, customer_id, points, $3 AS points_required
        "#,
    )
    .bind(program.id)
    .bind(customer_id)
    .bind(program.points_required)
    .fetch_optional(pool)
    .await?;

    Ok(balance)
}
