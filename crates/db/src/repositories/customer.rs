use crate::models::DbCustomer;
use chrono::{DateTime, Utc};
use eyre::Result;
use salonbook_core::models::customer::{CreateCustomerRequest, UpdateCustomerRequest};
use sqlx::{PgConnection, Pool, Postgres};
use uuid::Uuid;

pub async fn create_customer(
    pool: &Pool<Postgres>,
    establishment_id: Uuid,
    request: &CreateCustomerRequest,
) -> Result<DbCustomer> {
    let mut conn = pool.acquire().await?;
    insert_customer(
        &mut conn,
        establishment_id,
        &request.name,
        request.phone.as_deref(),
        request.email.as_deref(),
        request.notes.as_deref(),
    )
    .await
}

async fn insert_customer(
    conn: &mut PgConnection,
    establishment_id: Uuid,
    name: &str,
    phone: Option<&str>,
    email: Option<&str>,
    notes: Option<&str>,
) -> Result<DbCustomer> {
    let customer = sqlx::query_as::<_, DbCustomer>(
        r#"
        INSERT INTO customers (id, establishment_id, name, phone, email, notes, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, establishment_id, name, phone, email, notes, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(establishment_id)
    .bind(name)
    .bind(phone)
    .bind(email)
    .bind(notes)
    .bind(Utc::now())
    .fetch_one(conn)
    .await?;

    Ok(customer)
}

/// Public bookings identify returning customers by phone number.
pub async fn find_or_create_by_phone(
    conn: &mut PgConnection,
    establishment_id: Uuid,
    name: &str,
    phone: &str,
    email: Option<&str>,
) -> Result<DbCustomer> {
    let existing = sqlx::query_as::<_, DbCustomer>(
        r#"
        SELECT id, establishment_id, name, phone, email, notes, created_at
        FROM customers
        WHERE establishment_id = $1 AND phone = $2
        ORDER BY created_at ASC
        LIMIT 1
        "#,
    )
    .bind(establishment_id)
    .bind(phone)
    .fetch_optional(&mut *conn)
    .await?;

    match existing {
        Some(customer) => Ok(customer),
        None => {
            tracing::debug!("Creating customer from public booking: phone={}", phone);
            insert_customer(conn, establishment_id, name, Some(phone), email, None).await
        }
    }
}

pub async fn list_customers(
    pool: &Pool<Postgres>,
    establishment_id: Uuid,
) -> Result<Vec<DbCustomer>> {
    let customers = sqlx::query_as::<_, DbCustomer>(
        r#"
        SELECT id, establishment_id, name, phone, email, notes, created_at
        FROM customers
        WHERE establishment_id = $1
        ORDER BY name ASC
        "#,
    )
    .bind(establishment_id)
    .fetch_all(pool)
    .await?;

    Ok(customers)
}

pub async fn get_customer(
    pool: &Pool<Postgres>,
    establishment_id: Uuid,
    id: Uuid,
) -> Result<Option<DbCustomer>> {
    let customer = sqlx::query_as::<_, DbCustomer>(
        r#"
        SELECT id, establishment_id, name, phone, email, notes, created_at
        FROM customers
        WHERE establishment_id = $1 AND id = $2
        "#,
    )
    .bind(establishment_id)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(customer)
}

pub async fn update_customer(
    pool: &Pool<Postgres>,
    establishment_id: Uuid,
    id: Uuid,
    request: &UpdateCustomerRequest,
) -> Result<Option<DbCustomer>> {
    let customer = sqlx::query_as::<_, DbCustomer>(
        r#"
        UPDATE customers
        SET name = COALESCE($3, name),
            phone = COALESCE($4, phone),
            email = COALESCE($5, email),
            notes = COALESCE($6, notes)
        WHERE establishment_id = $1 AND id = $2
        RETURNING id, establishment_id, name, phone, email, notes, created_at
        "#,
    )
    .bind(establishment_id)
    .bind(id)
    .bind(&request.name)
    .bind(&request.phone)
    .bind(&request.email)
    .bind(&request.notes)
    .fetch_optional(pool)
    .await?;

    Ok(customer)
}

pub async fn delete_customer(
    pool: &Pool<Postgres>,
    establishment_id: Uuid,
    id: Uuid,
) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM customers
        WHERE establishment_id = $1 AND id = $2
        "#,
    )
    .bind(establishment_id)
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn count_new_customers(
    pool: &Pool<Postgres>,
    establishment_id: Uuid,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM customers
        WHERE establishment_id = $1 AND created_at >= $2 AND created_at < $3
        "#,
    )
    .bind(establishment_id)
    .bind(from)
    .bind(to)
    .fetch_one(pool)
    .await?;

    Ok(count)
}
