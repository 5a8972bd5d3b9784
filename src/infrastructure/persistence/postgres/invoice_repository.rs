use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use std::str::FromStr;

use crate::domain::invoice::{
  Client, Invoice, InvoiceStatus, Money, Organization, Rate, errors::InvoiceError,
  ports::InvoiceRepository,
};

#[derive(Debug, FromRow)]
struct InvoiceRow {
  id: i64,
  issue_date: NaiveDate,
  payment_amount: Decimal,
  fee: Decimal,
  fee_rate: Decimal,
  tax: Decimal,
  tax_rate: Decimal,
  total_amount: Decimal,
  due_date: NaiveDate,
  status: String,
}

/// Invoice row joined with its organization and client reference data.
#[derive(Debug, FromRow)]
struct InvoiceWithPartiesRow {
  id: i64,
  issue_date: NaiveDate,
  payment_amount: Decimal,
  fee: Decimal,
  fee_rate: Decimal,
  tax: Decimal,
  tax_rate: Decimal,
  total_amount: Decimal,
  due_date: NaiveDate,
  status: String,
  organization_id: i64,
  organization_name: String,
  organization_representative: String,
  organization_phone_number: String,
  organization_postal_code: String,
  organization_address: String,
  client_id: i64,
  client_organization_id: i64,
  client_name: String,
  client_representative: String,
  client_phone_number: String,
  client_postal_code: String,
  client_address: String,
}

/// Rebuilds a stored rate. Rows that violate the [0.0, 1.0] invariant are
/// surfaced as data integrity failures, not validation errors.
fn stored_rate(value: Decimal, column: &str, invoice_id: i64) -> Result<Rate, InvoiceError> {
  Rate::new(value).map_err(|e| {
    InvoiceError::DataIntegrity(format!("invoice {}: stored {} is invalid: {}", invoice_id, column, e))
  })
}

fn stored_status(value: &str, invoice_id: i64) -> Result<InvoiceStatus, InvoiceError> {
  InvoiceStatus::from_str(value).map_err(|e| {
    InvoiceError::DataIntegrity(format!("invoice {}: stored status is invalid: {}", invoice_id, e))
  })
}

impl InvoiceRow {
  fn into_invoice(self, organization: Organization, client: Client) -> Result<Invoice, InvoiceError> {
    let fee_rate = stored_rate(self.fee_rate, "fee_rate", self.id)?;
    let tax_rate = stored_rate(self.tax_rate, "tax_rate", self.id)?;
    let status = stored_status(&self.status, self.id)?;

    Ok(Invoice {
      id: Some(self.id),
      organization,
      client,
      issue_date: self.issue_date,
      due_date: self.due_date,
      amount: Money::from_decimal(self.payment_amount),
      fee: Money::from_decimal(self.fee),
      fee_rate,
      tax: Money::from_decimal(self.tax),
      tax_rate,
      total_amount: Money::from_decimal(self.total_amount),
      status,
    })
  }
}

impl TryFrom<InvoiceWithPartiesRow> for Invoice {
  type Error = InvoiceError;

  fn try_from(row: InvoiceWithPartiesRow) -> Result<Self, Self::Error> {
    let organization = Organization {
      id: row.organization_id,
      name: row.organization_name,
      representative: row.organization_representative,
      phone_number: row.organization_phone_number,
      postal_code: row.organization_postal_code,
      address: row.organization_address,
    };
    let client = Client {
      id: row.client_id,
      organization_id: row.client_organization_id,
      name: row.client_name,
      representative: row.client_representative,
      phone_number: row.client_phone_number,
      postal_code: row.client_postal_code,
      address: row.client_address,
    };

    let invoice_row = InvoiceRow {
      id: row.id,
      issue_date: row.issue_date,
      payment_amount: row.payment_amount,
      fee: row.fee,
      fee_rate: row.fee_rate,
      tax: row.tax,
      tax_rate: row.tax_rate,
      total_amount: row.total_amount,
      due_date: row.due_date,
      status: row.status,
    };
    invoice_row.into_invoice(organization, client)
  }
}

pub struct PostgresInvoiceRepository {
  pool: PgPool,
}

impl PostgresInvoiceRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl InvoiceRepository for PostgresInvoiceRepository {
  async fn create(&self, invoice: Invoice) -> Result<Invoice, InvoiceError> {
    let row = sqlx::query_as::<_, InvoiceRow>(
      r#"
            INSERT INTO invoice (
                organization_id, client_id, issue_date, payment_amount,
                fee, fee_rate, tax, tax_rate, total_amount, due_date, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id, issue_date, payment_amount, fee, fee_rate,
                      tax, tax_rate, total_amount, due_date, status
            "#,
    )
    .bind(invoice.organization.id)
    .bind(invoice.client.id)
    .bind(invoice.issue_date)
    .bind(invoice.amount.amount())
    .bind(invoice.fee.amount())
    .bind(invoice.fee_rate.value())
    .bind(invoice.tax.amount())
    .bind(invoice.tax_rate.value())
    .bind(invoice.total_amount.amount())
    .bind(invoice.due_date)
    .bind(invoice.status.as_str())
    .fetch_one(&self.pool)
    .await?;

    row.into_invoice(invoice.organization, invoice.client)
  }

  async fn find_by_due_date_range(
    &self,
    start_date: NaiveDate,
    end_date: NaiveDate,
  ) -> Result<Vec<Invoice>, InvoiceError> {
    let rows = sqlx::query_as::<_, InvoiceWithPartiesRow>(
      r#"
            SELECT i.id, i.issue_date, i.payment_amount, i.fee, i.fee_rate,
                   i.tax, i.tax_rate, i.total_amount, i.due_date, i.status,
                   o.id AS organization_id,
                   o.name AS organization_name,
                   o.representative AS organization_representative,
                   o.phone_number AS organization_phone_number,
                   o.postal_code AS organization_postal_code,
                   o.address AS organization_address,
                   c.id AS client_id,
                   c.organization_id AS client_organization_id,
                   c.name AS client_name,
                   c.representative AS client_representative,
                   c.phone_number AS client_phone_number,
                   c.postal_code AS client_postal_code,
                   c.address AS client_address
            FROM invoice i
            JOIN organization o ON o.id = i.organization_id
            JOIN client c ON c.id = i.client_id
            WHERE i.due_date >= $1 AND i.due_date <= $2
            ORDER BY i.due_date ASC
            "#,
    )
    .bind(start_date)
    .bind(end_date)
    .fetch_all(&self.pool)
    .await?;

    rows.into_iter().map(Invoice::try_from).collect()
  }
}
