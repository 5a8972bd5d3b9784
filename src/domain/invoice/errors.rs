use chrono::NaiveDate;
use thiserror::Error;

use super::value_objects::ValueObjectError;

#[derive(Debug, Error)]
pub enum InvoiceError {
  #[error("Validation error: {0}")]
  Validation(#[from] ValueObjectError),

  #[error("Organization not found: {0}")]
  OrganizationNotFound(i64),

  #[error("Client not found: {0}")]
  ClientNotFound(i64),

  #[error("No tax rate found for date {0}")]
  TaxRateNotFound(NaiveDate),

  /// Server-side misconfiguration (e.g. fee rate outside [0.0, 1.0]),
  /// distinct from client input errors.
  #[error("Invalid configuration: {0}")]
  Configuration(String),

  /// Durably stored data violates a domain invariant.
  #[error("Data integrity error: {0}")]
  DataIntegrity(String),

  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),

  #[error("Internal error: {0}")]
  Internal(String),
}
