pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use entities::{Client, Invoice, Organization};
pub use errors::InvoiceError;
pub use ports::{ClientRepository, InvoiceRepository, OrganizationRepository, TaxRateRepository};
pub use services::{InvoiceService, NewInvoiceData};
pub use value_objects::{InvoiceStatus, Money, Rate, ValueObjectError};
