use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use crate::domain::invoice::{Organization, errors::InvoiceError, ports::OrganizationRepository};

#[derive(Debug, FromRow)]
struct OrganizationRow {
  id: i64,
  name: String,
  representative: String,
  phone_number: String,
  postal_code: String,
  address: String,
}

impl From<OrganizationRow> for Organization {
  fn from(row: OrganizationRow) -> Self {
    Organization {
      id: row.id,
      name: row.name,
      representative: row.representative,
      phone_number: row.phone_number,
      postal_code: row.postal_code,
      address: row.address,
    }
  }
}

pub struct PostgresOrganizationRepository {
  pool: PgPool,
}

impl PostgresOrganizationRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl OrganizationRepository for PostgresOrganizationRepository {
  async fn find_by_id(&self, id: i64) -> Result<Option<Organization>, InvoiceError> {
    let row = sqlx::query_as::<_, OrganizationRow>(
      r#"
            SELECT id, name, representative, phone_number, postal_code, address
            FROM organization
            WHERE id = $1
            "#,
    )
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;

    Ok(row.map(Organization::from))
  }
}
