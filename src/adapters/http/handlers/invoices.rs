use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::{
  adapters::http::errors::ApiError,
  application::invoice::{
    CreateInvoiceCommand, CreateInvoiceUseCase, InvoiceDto, ListInvoicesCommand,
    ListInvoicesUseCase,
  },
};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvoiceRequest {
  #[validate(range(min = 1, message = "organizationId must be positive"))]
  pub organization_id: i64,
  #[validate(range(min = 1, message = "clientId must be positive"))]
  pub client_id: i64,
  pub issue_date: NaiveDate,
  /// Amount in the smallest currency unit
  #[validate(range(min = 1, message = "amount must be positive"))]
  pub amount: i64,
  pub due_date: NaiveDate,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListInvoicesQuery {
  pub start_date: NaiveDate,
  pub end_date: NaiveDate,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItem {
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

impl From<InvoiceDto> for InvoiceItem {
  fn from(dto: InvoiceDto) -> Self {
    Self {
      id: dto.id,
      organization_id: dto.organization_id,
      organization_name: dto.organization_name,
      client_id: dto.client_id,
      client_name: dto.client_name,
      issue_date: dto.issue_date,
      amount: dto.amount,
      fee: dto.fee,
      fee_rate: dto.fee_rate,
      tax: dto.tax,
      tax_rate: dto.tax_rate,
      total_amount: dto.total_amount,
      due_date: dto.due_date,
      status: dto.status,
    }
  }
}

#[derive(Debug, Serialize)]
pub struct ListInvoicesResponse {
  pub invoices: Vec<InvoiceItem>,
}

/// Create invoice
/// POST /api/v1/invoices
pub async fn create_invoice_handler(
  request: web::Json<CreateInvoiceRequest>,
  use_case: web::Data<Arc<CreateInvoiceUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let command = CreateInvoiceCommand {
    organization_id: request.organization_id,
    client_id: request.client_id,
    issue_date: request.issue_date,
    amount: request.amount,
    due_date: request.due_date,
  };

  let invoice = use_case.execute(command).await?;

  Ok(HttpResponse::Created().json(InvoiceItem::from(invoice)))
}

/// List invoices by due date range
/// GET /api/v1/invoices?startDate=2024-10-01&endDate=2024-12-31
pub async fn list_invoices_handler(
  query: web::Query<ListInvoicesQuery>,
  use_case: web::Data<Arc<ListInvoicesUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let command = ListInvoicesCommand {
    start_date: query.start_date,
    end_date: query.end_date,
  };

  let invoices = use_case.execute(command).await?;

  Ok(HttpResponse::Ok().json(ListInvoicesResponse {
    invoices: invoices.into_iter().map(InvoiceItem::from).collect(),
  }))
}
