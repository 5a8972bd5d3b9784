use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;

use crate::domain::invoice::{InvoiceError, InvoiceService};

use super::dto::InvoiceDto;

#[derive(Debug, Deserialize)]
pub struct ListInvoicesCommand {
  pub start_date: NaiveDate,
  pub end_date: NaiveDate,
}

pub struct ListInvoicesUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl ListInvoicesUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(&self, command: ListInvoicesCommand) -> Result<Vec<InvoiceDto>, InvoiceError> {
    let invoices = self
      .invoice_service
      .list_invoices(command.start_date, command.end_date)
      .await?;

    invoices.iter().map(InvoiceDto::from_entity).collect()
  }
}
