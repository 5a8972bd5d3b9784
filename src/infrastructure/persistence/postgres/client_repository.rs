use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use crate::domain::invoice::{Client, errors::InvoiceError, ports::ClientRepository};

#[derive(Debug, FromRow)]
struct ClientRow {
  id: i64,
  organization_id: i64,
  name: String,
  representative: String,
  phone_number: String,
  postal_code: String,
  address: String,
}

impl From<ClientRow> for Client {
  fn from(row: ClientRow) -> Self {
    Client {
      id: row.id,
      organization_id: row.organization_id,
      name: row.name,
      representative: row.representative,
      phone_number: row.phone_number,
      postal_code: row.postal_code,
      address: row.address,
    }
  }
}

pub struct PostgresClientRepository {
  pool: PgPool,
}

impl PostgresClientRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl ClientRepository for PostgresClientRepository {
  async fn find_by_id(&self, id: i64) -> Result<Option<Client>, InvoiceError> {
    let row = sqlx::query_as::<_, ClientRow>(
      r#"
            SELECT id, organization_id, name, representative, phone_number, postal_code, address
            FROM client
            WHERE id = $1
            "#,
    )
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;

    Ok(row.map(Client::from))
  }
}
