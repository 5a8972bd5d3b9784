use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::domain::invoice::{Rate, errors::InvoiceError, ports::TaxRateRepository};

pub struct PostgresTaxRateRepository {
  pool: PgPool,
}

impl PostgresTaxRateRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl TaxRateRepository for PostgresTaxRateRepository {
  async fn rate_for_date(&self, date: NaiveDate) -> Result<Option<Rate>, InvoiceError> {
    // An open-ended range has end_date NULL; the most recent start wins.
    let rate = sqlx::query_scalar::<_, Decimal>(
      r#"
            SELECT rate
            FROM tax_rate
            WHERE start_date <= $1 AND (end_date IS NULL OR end_date >= $1)
            ORDER BY start_date DESC
            LIMIT 1
            "#,
    )
    .bind(date)
    .fetch_optional(&self.pool)
    .await?;

    rate
      .map(|value| {
        Rate::new(value).map_err(|e| {
          InvoiceError::DataIntegrity(format!("stored tax rate for {} is invalid: {}", date, e))
        })
      })
      .transpose()
  }
}
