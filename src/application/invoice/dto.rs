use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::invoice::{Invoice, InvoiceError};

/// Read model for a persisted invoice.
///
/// Monetary fields are truncated toward zero to integers in the smallest
/// currency unit; rates stay floating ratios.
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceDto {
  pub id: i64,
  pub organization_id: i64,
  pub organization_name: String,
  pub client_id: i64,
  pub client_name: String,
  pub issue_date: NaiveDate,
  pub amount: i64,
  pub fee: i64,
  pub fee_rate: f64,
  pub tax: i64,
  pub tax_rate: f64,
  pub total_amount: i64,
  pub due_date: NaiveDate,
  pub status: String,
}

impl InvoiceDto {
  pub fn from_entity(invoice: &Invoice) -> Result<Self, InvoiceError> {
    let id = invoice
      .id
      .ok_or_else(|| InvoiceError::Internal("invoice id missing after persistence".to_string()))?;

    Ok(Self {
      id,
      organization_id: invoice.organization.id,
      organization_name: invoice.organization.name.clone(),
      client_id: invoice.client.id,
      client_name: invoice.client.name.clone(),
      issue_date: invoice.issue_date,
      amount: invoice.amount.truncate_to_units(),
      fee: invoice.fee.truncate_to_units(),
      fee_rate: invoice.fee_rate.as_f64(),
      tax: invoice.tax.truncate_to_units(),
      tax_rate: invoice.tax_rate.as_f64(),
      total_amount: invoice.total_amount.truncate_to_units(),
      due_date: invoice.due_date,
      status: invoice.status.as_str().to_string(),
    })
  }
}
