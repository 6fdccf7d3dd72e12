//! Looks up which establishment a referenced record belongs to, so callers
//! can tell "does not exist" apart from "belongs to someone else".

use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owned {
    Category,
    Service,
    Employee,
    Customer,
    Package,
    CustomerPackage,
    LoyaltyProgram,
}

impl Owned {
    pub fn label(&self) -> &'static str {
        match self {
            Owned::Category => "Category",
            Owned::Service => "Service",
            Owned::Employee => "Employee",
            Owned::Customer => "Customer",
            Owned::Package => "Package",
            Owned::CustomerPackage => "Customer package",
            Owned::LoyaltyProgram => "Loyalty program",
        }
    }

    fn query(&self) -> &'static str {
        match self {
            Owned::Category => "SELECT establishment_id FROM categories WHERE id = $1",
            Owned::Service => "SELECT establishment_id FROM services WHERE id = $1",
            Owned::Employee => "SELECT establishment_id FROM employees WHERE id = $1",
            Owned::Customer => "SELECT establishment_id FROM customers WHERE id = $1",
            Owned::Package => "SELECT establishment_id FROM packages WHERE id = $1",
            Owned::CustomerPackage => {
                "SELECT p.establishment_id FROM customer_packages cp JOIN packages p ON p.id = cp.package_id WHERE cp.id = $1"
            }
            Owned::LoyaltyProgram => "SELECT establishment_id FROM loyalty_programs WHERE id = $1",
        }
    }
}

pub async fn owner_of(pool: &Pool<Postgres>, kind: Owned, id: Uuid) -> Result<Option<Uuid>> {
    let owner = sqlx::query_scalar::<_, Uuid>(kind.query())
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(owner)
}
