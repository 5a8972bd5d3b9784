use async_trait::async_trait;
use chrono::NaiveDate;

use super::entities::{Client, Invoice, Organization};
use super::errors::InvoiceError;
use super::value_objects::Rate;

#[async_trait]
pub trait OrganizationRepository: Send + Sync {
  async fn find_by_id(&self, id: i64) -> Result<Option<Organization>, InvoiceError>;
}

#[async_trait]
pub trait ClientRepository: Send + Sync {
  async fn find_by_id(&self, id: i64) -> Result<Option<Client>, InvoiceError>;
}

#[async_trait]
pub trait TaxRateRepository: Send + Sync {
  /// Returns the tax rate applicable on the given date, looked up from the
  /// time-ranged tax rate table. None if no range covers the date.
  async fn rate_for_date(&self, date: NaiveDate) -> Result<Option<Rate>, InvoiceError>;
}

#[async_trait]
pub trait InvoiceRepository: Send + Sync {
  /// Persists a calculated invoice and returns it with its id assigned.
  async fn create(&self, invoice: Invoice) -> Result<Invoice, InvoiceError>;

  /// Invoices with a due date inside the inclusive range, ordered
  /// ascending by due date.
  async fn find_by_due_date_range(
    &self,
    start_date: NaiveDate,
    end_date: NaiveDate,
  ) -> Result<Vec<Invoice>, InvoiceError>;
}
