use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

/// Statements run in order by [`initialize_database`]. Each one is idempotent.
const STATEMENTS: &[(&str, &str)] = &[
    (
        "establishments",
        r#"
        CREATE TABLE IF NOT EXISTS establishments (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            phone VARCHAR(64) NULL,
            address TEXT NULL,
            timezone VARCHAR(64) NOT NULL DEFAULT 'UTC',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    ),
    (
        "categories",
        r#"
        CREATE TABLE IF NOT EXISTS categories (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            establishment_id UUID NOT NULL REFERENCES establishments(id) ON DELETE CASCADE,
            name VARCHAR(255) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    ),
    (
        "services",
        r#"
        CREATE TABLE IF NOT EXISTS services (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            establishment_id UUID NOT NULL REFERENCES establishments(id) ON DELETE CASCADE,
            category_id UUID NULL REFERENCES categories(id) ON DELETE SET NULL,
            name VARCHAR(255) NOT NULL,
            description TEXT NULL,
            duration_minutes INTEGER NOT NULL,
            price_cents BIGINT NOT NULL DEFAULT 0,
            active BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT positive_duration CHECK (duration_minutes > 0),
            CONSTRAINT non_negative_price CHECK (price_cents >= 0)
        );
        "#,
    ),
    (
        "employees",
        r#"
        CREATE TABLE IF NOT EXISTS employees (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            establishment_id UUID NOT NULL REFERENCES establishments(id) ON DELETE CASCADE,
            name VARCHAR(255) NOT NULL,
            email VARCHAR(255) NULL,
            phone VARCHAR(64) NULL,
            active BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    ),
    (
        "customers",
        r#"
        CREATE TABLE IF NOT EXISTS customers (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            establishment_id UUID NOT NULL REFERENCES establishments(id) ON DELETE CASCADE,
            name VARCHAR(255) NOT NULL,
            phone VARCHAR(64) NULL,
            email VARCHAR(255) NULL,
            notes TEXT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    ),
    (
        "opening_hours",
        r#"
        CREATE TABLE IF NOT EXISTS opening_hours (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            establishment_id UUID NOT NULL REFERENCES establishments(id) ON DELETE CASCADE,
            day_of_week SMALLINT NOT NULL,
            opening_time TIME NOT NULL,
            closing_time TIME NOT NULL,
            CONSTRAINT valid_day_of_week CHECK (day_of_week BETWEEN 0 AND 6),
            CONSTRAINT valid_opening_range CHECK (closing_time > opening_time),
            CONSTRAINT one_row_per_weekday UNIQUE (establishment_id, day_of_week)
        );
        "#,
    ),
    (
        "intervals",
        r#"
        CREATE TABLE IF NOT EXISTS intervals (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            opening_hour_id UUID NOT NULL REFERENCES opening_hours(id) ON DELETE CASCADE,
            start_time TIME NOT NULL,
            end_time TIME NOT NULL,
            CONSTRAINT valid_interval_range CHECK (end_time > start_time)
        );
        "#,
    ),
    (
        "unavailabilities",
        r#"
        CREATE TABLE IF NOT EXISTS unavailabilities (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            employee_id UUID NOT NULL REFERENCES employees(id) ON DELETE CASCADE,
            day_of_week SMALLINT NULL,
            date DATE NULL,
            start_time TIME NOT NULL,
            end_time TIME NOT NULL,
            reason TEXT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_unavailability_range CHECK (end_time > start_time),
            CONSTRAINT one_anchor CHECK ((day_of_week IS NULL) <> (date IS NULL))
        );
        "#,
    ),
    (
        "packages",
        r#"
        CREATE TABLE IF NOT EXISTS packages (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            establishment_id UUID NOT NULL REFERENCES establishments(id) ON DELETE CASCADE,
            service_id UUID NOT NULL REFERENCES services(id) ON DELETE CASCADE,
            name VARCHAR(255) NOT NULL,
            sessions INTEGER NOT NULL,
            price_cents BIGINT NOT NULL DEFAULT 0,
            active BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT positive_sessions CHECK (sessions > 0)
        );
        "#,
    ),
    (
        "customer_packages",
        r#"
        CREATE TABLE IF NOT EXISTS customer_packages (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            package_id UUID NOT NULL REFERENCES packages(id) ON DELETE CASCADE,
            customer_id UUID NOT NULL REFERENCES customers(id) ON DELETE CASCADE,
            remaining_sessions INTEGER NOT NULL,
            purchased_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT non_negative_sessions CHECK (remaining_sessions >= 0)
        );
        "#,
    ),
    (
        "appointments",
        r#"
        CREATE TABLE IF NOT EXISTS appointments (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            establishment_id UUID NOT NULL REFERENCES establishments(id) ON DELETE CASCADE,
            employee_id UUID NOT NULL REFERENCES employees(id) ON DELETE CASCADE,
            service_id UUID NOT NULL REFERENCES services(id) ON DELETE CASCADE,
            customer_id UUID NOT NULL REFERENCES customers(id) ON DELETE CASCADE,
            customer_package_id UUID NULL REFERENCES customer_packages(id) ON DELETE SET NULL,
            start_time TIMESTAMP WITH TIME ZONE NOT NULL,
            end_time TIMESTAMP WITH TIME ZONE NOT NULL,
            status VARCHAR(32) NOT NULL DEFAULT 'scheduled',
            notes TEXT NULL,
            checked_in_at TIMESTAMP WITH TIME ZONE NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_time_range CHECK (end_time > start_time)
        );
        "#,
    ),
    (
        "loyalty_programs",
        r#"
        CREATE TABLE IF NOT EXISTS loyalty_programs (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            establishment_id UUID NOT NULL REFERENCES establishments(id) ON DELETE CASCADE,
            name VARCHAR(255) NOT NULL,
            bonus_service_id UUID NOT NULL REFERENCES services(id) ON DELETE CASCADE,
            points_per_appointment INTEGER NOT NULL,
            points_required INTEGER NOT NULL,
            active BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT positive_points CHECK (points_per_appointment > 0 AND points_required > 0)
        );
        "#,
    ),
    (
        "loyalty_balances",
        r#"
        CREATE TABLE IF NOT EXISTS loyalty_balances (
            program_id UUID NOT NULL REFERENCES loyalty_programs(id) ON DELETE CASCADE,
            customer_id UUID NOT NULL REFERENCES customers(id) ON DELETE CASCADE,
            points INTEGER NOT NULL DEFAULT 0,
            PRIMARY KEY (program_id, customer_id),
            CONSTRAINT non_negative_points CHECK (points >= 0)
        );
        "#,
    ),
];

const INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_services_establishment_id ON services(establishment_id)",
    "CREATE INDEX IF NOT EXISTS idx_employees_establishment_id ON employees(establishment_id)",
    "CREATE INDEX IF NOT EXISTS idx_customers_establishment_id ON customers(establishment_id)",
    "CREATE INDEX IF NOT EXISTS idx_customers_phone ON customers(establishment_id, phone)",
    "CREATE INDEX IF NOT EXISTS idx_unavailabilities_employee_id ON unavailabilities(employee_id)",
    "CREATE INDEX IF NOT EXISTS idx_appointments_establishment_start ON appointments(establishment_id, start_time)",
    "CREATE INDEX IF NOT EXISTS idx_appointments_employee_start ON appointments(employee_id, start_time)",
    "CREATE INDEX IF NOT EXISTS idx_customer_packages_customer_id ON customer_packages(customer_id)",
];

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    for (table, statement) in STATEMENTS {
        tracing::debug!("Ensuring table {}", table);
        sqlx::query(statement).execute(pool).await?;
    }

    // Prepared statements cannot hold several commands, so indexes go one by one.
    for statement in INDEXES {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
