use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::sync::Arc;

use super::entities::Invoice;
use super::errors::InvoiceError;
use super::ports::{ClientRepository, InvoiceRepository, OrganizationRepository, TaxRateRepository};
use super::value_objects::{Money, Rate};

/// Invoice creation data
pub struct NewInvoiceData {
  pub organization_id: i64,
  pub client_id: i64,
  pub issue_date: NaiveDate,
  /// Base billed amount in the smallest currency unit.
  pub amount: i64,
  pub due_date: NaiveDate,
}

pub struct InvoiceService {
  invoice_repo: Arc<dyn InvoiceRepository>,
  client_repo: Arc<dyn ClientRepository>,
  organization_repo: Arc<dyn OrganizationRepository>,
  tax_rate_repo: Arc<dyn TaxRateRepository>,
  /// Configured fee rate, injected at construction. Never read from the
  /// environment inside the calculation path.
  fee_rate: Decimal,
}

impl InvoiceService {
  pub fn new(
    invoice_repo: Arc<dyn InvoiceRepository>,
    client_repo: Arc<dyn ClientRepository>,
    organization_repo: Arc<dyn OrganizationRepository>,
    tax_rate_repo: Arc<dyn TaxRateRepository>,
    fee_rate: Decimal,
  ) -> Self {
    Self {
      invoice_repo,
      client_repo,
      organization_repo,
      tax_rate_repo,
      fee_rate,
    }
  }

  /// Creates and persists an invoice.
  ///
  /// Lookups and all rate validation happen before the write, so no
  /// invalid or partially calculated invoice is ever durably stored.
  pub async fn create_invoice(&self, data: NewInvoiceData) -> Result<Invoice, InvoiceError> {
    let organization = self
      .organization_repo
      .find_by_id(data.organization_id)
      .await?
      .ok_or(InvoiceError::OrganizationNotFound(data.organization_id))?;

    let client = self
      .client_repo
      .find_by_id(data.client_id)
      .await?
      .ok_or(InvoiceError::ClientNotFound(data.client_id))?;

    let fee_rate = Rate::new(self.fee_rate).map_err(|e| {
      tracing::error!("Configured fee rate is invalid: {}", e);
      InvoiceError::Configuration(format!("fee rate: {}", e))
    })?;

    let mut invoice = Invoice::new(
      organization,
      client,
      Money::from_units(data.amount),
      data.issue_date,
      data.due_date,
      fee_rate,
    )?;

    let tax_rate = self
      .tax_rate_repo
      .rate_for_date(data.issue_date)
      .await?
      .ok_or(InvoiceError::TaxRateNotFound(data.issue_date))?;

    invoice.calculate(tax_rate);

    self.invoice_repo.create(invoice).await
  }

  /// Invoices due inside the inclusive date range, ascending by due date.
  /// An empty result is not an error.
  pub async fn list_invoices(
    &self,
    start_date: NaiveDate,
    end_date: NaiveDate,
  ) -> Result<Vec<Invoice>, InvoiceError> {
    self
      .invoice_repo
      .find_by_due_date_range(start_date, end_date)
      .await
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::invoice::entities::{Client, Organization};
  use crate::domain::invoice::value_objects::InvoiceStatus;
  use async_trait::async_trait;
  use rust_decimal_macros::dec;
  use std::sync::Mutex;
  use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

  struct FakeOrganizationRepository {
    organizations: Vec<Organization>,
  }

  #[async_trait]
  impl OrganizationRepository for FakeOrganizationRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Organization>, InvoiceError> {
      Ok(self.organizations.iter().find(|o| o.id == id).cloned())
    }
  }

  struct FakeClientRepository {
    clients: Vec<Client>,
  }

  #[async_trait]
  impl ClientRepository for FakeClientRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Client>, InvoiceError> {
      Ok(self.clients.iter().find(|c| c.id == id).cloned())
    }
  }

  struct FakeTaxRateRepository {
    rates: Vec<(NaiveDate, Option<NaiveDate>, Rate)>,
  }

  #[async_trait]
  impl TaxRateRepository for FakeTaxRateRepository {
    async fn rate_for_date(&self, date: NaiveDate) -> Result<Option<Rate>, InvoiceError> {
      Ok(
        self
          .rates
          .iter()
          .filter(|(start, end, _)| *start <= date && end.is_none_or(|e| e >= date))
          .max_by_key(|(start, _, _)| *start)
          .map(|(_, _, rate)| *rate),
      )
    }
  }

  #[derive(Default)]
  struct FakeInvoiceRepository {
    invoices: Mutex<Vec<Invoice>>,
    next_id: AtomicI64,
    create_calls: AtomicUsize,
  }

  #[async_trait]
  impl InvoiceRepository for FakeInvoiceRepository {
    async fn create(&self, mut invoice: Invoice) -> Result<Invoice, InvoiceError> {
      self.create_calls.fetch_add(1, Ordering::SeqCst);
      invoice.id = Some(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
      self.invoices.lock().unwrap().push(invoice.clone());
      Ok(invoice)
    }

    async fn find_by_due_date_range(
      &self,
      start_date: NaiveDate,
      end_date: NaiveDate,
    ) -> Result<Vec<Invoice>, InvoiceError> {
      let mut matches: Vec<Invoice> = self
        .invoices
        .lock()
        .unwrap()
        .iter()
        .filter(|i| i.due_date >= start_date && i.due_date <= end_date)
        .cloned()
        .collect();
      matches.sort_by_key(|i| i.due_date);
      Ok(matches)
    }
  }

  fn organization() -> Organization {
    Organization {
      id: 1,
      name: "Acme Corp".to_string(),
      representative: "Taro Yamada".to_string(),
      phone_number: "03-1234-5678".to_string(),
      postal_code: "100-0001".to_string(),
      address: "Tokyo, Chiyoda".to_string(),
    }
  }

  fn client() -> Client {
    Client {
      id: 2,
      organization_id: 1,
      name: "Beta LLC".to_string(),
      representative: "Hanako Suzuki".to_string(),
      phone_number: "06-8765-4321".to_string(),
      postal_code: "530-0001".to_string(),
      address: "Osaka, Kita".to_string(),
    }
  }

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  struct Fixture {
    service: InvoiceService,
    invoice_repo: Arc<FakeInvoiceRepository>,
  }

  fn fixture(fee_rate: Decimal) -> Fixture {
    let invoice_repo = Arc::new(FakeInvoiceRepository::default());
    let service = InvoiceService::new(
      invoice_repo.clone(),
      Arc::new(FakeClientRepository {
        clients: vec![client()],
      }),
      Arc::new(FakeOrganizationRepository {
        organizations: vec![organization()],
      }),
      Arc::new(FakeTaxRateRepository {
        rates: vec![
          (date(2019, 10, 1), None, Rate::new(dec!(0.1)).unwrap()),
          (
            date(2014, 4, 1),
            Some(date(2019, 9, 30)),
            Rate::new(dec!(0.08)).unwrap(),
          ),
        ],
      }),
      fee_rate,
    );
    Fixture {
      service,
      invoice_repo,
    }
  }

  fn new_invoice_data(amount: i64) -> NewInvoiceData {
    NewInvoiceData {
      organization_id: 1,
      client_id: 2,
      issue_date: date(2024, 10, 1),
      amount,
      due_date: date(2024, 10, 31),
    }
  }

  #[tokio::test]
  async fn test_create_invoice_calculates_and_persists() {
    let f = fixture(dec!(0.04));

    let invoice = f.service.create_invoice(new_invoice_data(10000)).await.unwrap();

    assert_eq!(invoice.id, Some(1));
    assert_eq!(invoice.status, InvoiceStatus::Pending);
    assert_eq!(invoice.fee.amount(), dec!(400));
    assert_eq!(invoice.tax.amount(), dec!(40));
    assert_eq!(invoice.total_amount.amount(), dec!(10440));
    assert_eq!(invoice.tax_rate.value(), dec!(0.1));
    assert_eq!(invoice.fee_rate.value(), dec!(0.04));
    assert_eq!(f.invoice_repo.create_calls.load(Ordering::SeqCst), 1);
  }

  #[tokio::test]
  async fn test_create_invoice_picks_rate_for_issue_date() {
    let f = fixture(dec!(0.04));
    let mut data = new_invoice_data(10000);
    data.issue_date = date(2018, 6, 1);

    let invoice = f.service.create_invoice(data).await.unwrap();

    assert_eq!(invoice.tax_rate.value(), dec!(0.08));
  }

  #[tokio::test]
  async fn test_create_invoice_unknown_organization() {
    let f = fixture(dec!(0.04));
    let mut data = new_invoice_data(10000);
    data.organization_id = 99;

    let err = f.service.create_invoice(data).await.unwrap_err();

    assert!(matches!(err, InvoiceError::OrganizationNotFound(99)));
    // Nothing may be written when a lookup fails.
    assert_eq!(f.invoice_repo.create_calls.load(Ordering::SeqCst), 0);
  }

  #[tokio::test]
  async fn test_create_invoice_unknown_client() {
    let f = fixture(dec!(0.04));
    let mut data = new_invoice_data(10000);
    data.client_id = 99;

    let err = f.service.create_invoice(data).await.unwrap_err();

    assert!(matches!(err, InvoiceError::ClientNotFound(99)));
    assert_eq!(f.invoice_repo.create_calls.load(Ordering::SeqCst), 0);
  }

  #[tokio::test]
  async fn test_create_invoice_no_tax_rate_for_date() {
    let f = fixture(dec!(0.04));
    let mut data = new_invoice_data(10000);
    data.issue_date = date(2000, 1, 1);

    let err = f.service.create_invoice(data).await.unwrap_err();

    assert!(matches!(err, InvoiceError::TaxRateNotFound(_)));
    assert_eq!(f.invoice_repo.create_calls.load(Ordering::SeqCst), 0);
  }

  #[tokio::test]
  async fn test_create_invoice_misconfigured_fee_rate() {
    let f = fixture(dec!(1.5));

    let err = f.service.create_invoice(new_invoice_data(10000)).await.unwrap_err();

    assert!(matches!(err, InvoiceError::Configuration(_)));
    assert_eq!(f.invoice_repo.create_calls.load(Ordering::SeqCst), 0);
  }

  #[tokio::test]
  async fn test_create_invoice_rejects_zero_amount() {
    let f = fixture(dec!(0.04));

    let err = f.service.create_invoice(new_invoice_data(0)).await.unwrap_err();

    assert!(matches!(err, InvoiceError::Validation(_)));
    assert_eq!(f.invoice_repo.create_calls.load(Ordering::SeqCst), 0);
  }

  #[tokio::test]
  async fn test_list_invoices_filters_and_orders_by_due_date() {
    let f = fixture(dec!(0.04));

    for (amount, due) in [
      (10000, date(2024, 11, 30)),
      (5000, date(2024, 10, 15)),
      (7000, date(2025, 1, 10)),
    ] {
      let mut data = new_invoice_data(amount);
      data.due_date = due;
      f.service.create_invoice(data).await.unwrap();
    }

    let invoices = f
      .service
      .list_invoices(date(2024, 10, 1), date(2024, 12, 31))
      .await
      .unwrap();

    assert_eq!(invoices.len(), 2);
    assert_eq!(invoices[0].due_date, date(2024, 10, 15));
    assert_eq!(invoices[1].due_date, date(2024, 11, 30));
  }

  #[tokio::test]
  async fn test_list_invoices_empty_range_is_ok() {
    let f = fixture(dec!(0.04));

    let invoices = f
      .service
      .list_invoices(date(2030, 1, 1), date(2030, 12, 31))
      .await
      .unwrap();

    assert!(invoices.is_empty());
  }
}
