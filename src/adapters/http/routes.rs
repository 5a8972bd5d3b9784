use actix_web::web;
use std::sync::Arc;

use crate::application::invoice::{CreateInvoiceUseCase, ListInvoicesUseCase};

use super::handlers::invoices::{create_invoice_handler, list_invoices_handler};

/// Configure invoice routes
///
/// Mounts the invoice endpoints under the provided scope
/// (e.g. /api/v1/invoices):
///
/// - POST "" - Create an invoice
/// - GET "" - List invoices by due date range
pub fn configure_invoice_routes(
  cfg: &mut web::ServiceConfig,
  create_use_case: Arc<CreateInvoiceUseCase>,
  list_use_case: Arc<ListInvoicesUseCase>,
) {
  cfg
    .app_data(web::Data::new(create_use_case))
    .app_data(web::Data::new(list_use_case))
    .route("", web::post().to(create_invoice_handler))
    .route("", web::get().to(list_invoices_handler));
}
