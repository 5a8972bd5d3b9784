pub mod create_invoice;
pub mod dto;
pub mod list_invoices;

pub use create_invoice::{CreateInvoiceCommand, CreateInvoiceUseCase};
pub use dto::InvoiceDto;
pub use list_invoices::{ListInvoicesCommand, ListInvoicesUseCase};
