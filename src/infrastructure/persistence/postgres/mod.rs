pub mod client_repository;
pub mod invoice_repository;
pub mod organization_repository;
pub mod tax_rate_repository;

pub use client_repository::PostgresClientRepository;
pub use invoice_repository::PostgresInvoiceRepository;
pub use organization_repository::PostgresOrganizationRepository;
pub use tax_rate_repository::PostgresTaxRateRepository;
