use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;

use crate::domain::invoice::{InvoiceError, InvoiceService, NewInvoiceData};

use super::dto::InvoiceDto;

#[derive(Debug, Deserialize)]
pub struct CreateInvoiceCommand {
  pub organization_id: i64,
  pub client_id: i64,
  pub issue_date: NaiveDate,
  /// Base billed amount in the smallest currency unit.
  pub amount: i64,
  pub due_date: NaiveDate,
}

pub struct CreateInvoiceUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl CreateInvoiceUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(&self, command: CreateInvoiceCommand) -> Result<InvoiceDto, InvoiceError> {
    let invoice = self
      .invoice_service
      .create_invoice(NewInvoiceData {
        organization_id: command.organization_id,
        client_id: command.client_id,
        issue_date: command.issue_date,
        amount: command.amount,
        due_date: command.due_date,
      })
      .await?;

    InvoiceDto::from_entity(&invoice)
  }
}
