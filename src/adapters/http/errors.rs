use actix_web::{
  HttpResponse,
  error::ResponseError,
  http::{StatusCode, header::ContentType},
};
use serde::Serialize;
use std::fmt;

use crate::domain::invoice::InvoiceError;

/// JSON body for error responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
  pub error: String,
}

/// API error type that maps domain errors to HTTP responses
#[derive(Debug)]
pub enum ApiError {
  /// Malformed or out-of-domain request values (400 Bad Request)
  Validation(String),

  /// Referenced organization, client or tax rate does not exist (404)
  NotFound(String),

  /// Server-side failure: misconfiguration, data integrity, persistence (500)
  Internal(String),
}

impl fmt::Display for ApiError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ApiError::Validation(msg) => write!(f, "Validation error: {}", msg),
      ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
      ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
    }
  }
}

impl ResponseError for ApiError {
  fn status_code(&self) -> StatusCode {
    match self {
      ApiError::Validation(_) => StatusCode::BAD_REQUEST,
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let body = match self {
      ApiError::Validation(msg) => {
        tracing::debug!("Request validation failed: {}", msg);
        ErrorResponse { error: msg.clone() }
      }
      ApiError::NotFound(msg) => {
        tracing::debug!("Resource not found: {}", msg);
        ErrorResponse { error: msg.clone() }
      }
      ApiError::Internal(msg) => {
        tracing::error!("Internal error: {}", msg);
        // Do not leak internals to the caller.
        ErrorResponse {
          error: "internal server error".to_string(),
        }
      }
    };

    HttpResponse::build(self.status_code())
      .insert_header(ContentType::json())
      .json(body)
  }
}

impl From<InvoiceError> for ApiError {
  fn from(err: InvoiceError) -> Self {
    match err {
      InvoiceError::Validation(e) => ApiError::Validation(e.to_string()),
      InvoiceError::OrganizationNotFound(_)
      | InvoiceError::ClientNotFound(_)
      | InvoiceError::TaxRateNotFound(_) => ApiError::NotFound(err.to_string()),
      InvoiceError::Configuration(_)
      | InvoiceError::DataIntegrity(_)
      | InvoiceError::Database(_)
      | InvoiceError::Internal(_) => ApiError::Internal(err.to_string()),
    }
  }
}

impl From<validator::ValidationErrors> for ApiError {
  fn from(err: validator::ValidationErrors) -> Self {
    ApiError::Validation(err.to_string())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::NaiveDate;
  use crate::domain::invoice::ValueObjectError;

  #[test]
  fn test_status_codes() {
    assert_eq!(
      ApiError::Validation("bad".to_string()).status_code(),
      StatusCode::BAD_REQUEST
    );
    assert_eq!(
      ApiError::NotFound("missing".to_string()).status_code(),
      StatusCode::NOT_FOUND
    );
    assert_eq!(
      ApiError::Internal("boom".to_string()).status_code(),
      StatusCode::INTERNAL_SERVER_ERROR
    );
  }

  #[test]
  fn test_domain_error_mapping() {
    assert!(matches!(
      ApiError::from(InvoiceError::OrganizationNotFound(1)),
      ApiError::NotFound(_)
    ));
    assert!(matches!(
      ApiError::from(InvoiceError::ClientNotFound(1)),
      ApiError::NotFound(_)
    ));
    assert!(matches!(
      ApiError::from(InvoiceError::TaxRateNotFound(
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
      )),
      ApiError::NotFound(_)
    ));
    assert!(matches!(
      ApiError::from(InvoiceError::Validation(ValueObjectError::InvalidAmount(
        "zero".to_string()
      ))),
      ApiError::Validation(_)
    ));
    assert!(matches!(
      ApiError::from(InvoiceError::Configuration("fee rate".to_string())),
      ApiError::Internal(_)
    ));
    assert!(matches!(
      ApiError::from(InvoiceError::DataIntegrity("rate".to_string())),
      ApiError::Internal(_)
    ));
  }
}
