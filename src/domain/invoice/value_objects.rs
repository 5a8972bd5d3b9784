use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueObjectError {
  #[error("Invalid amount: {0}")]
  InvalidAmount(String),
  #[error("Invalid rate: {0}")]
  InvalidRate(String),
  #[error("Invalid invoice status: {0}")]
  InvalidStatus(String),
}

// Money - exact decimal amount in the smallest currency unit (yen)
//
// All fee/tax/total arithmetic stays on this type; binary floats never
// enter the calculation chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money(Decimal);

impl Money {
  pub fn from_units(units: i64) -> Self {
    Self(Decimal::from(units))
  }

  pub fn from_decimal(amount: Decimal) -> Self {
    Self(amount)
  }

  pub fn zero() -> Self {
    Self(Decimal::ZERO)
  }

  pub fn amount(&self) -> Decimal {
    self.0
  }

  pub fn is_positive(&self) -> bool {
    self.0 > Decimal::ZERO
  }

  pub fn apply_rate(&self, rate: Rate) -> Money {
    Money(self.0 * rate.value())
  }

  pub fn add(&self, other: Money) -> Money {
    Money(self.0 + other.0)
  }

  /// Drops the fractional part toward zero: 10.99 -> 10, -10.99 -> -10.
  /// This is the display/wire rule, not banker's rounding.
  /// Saturates at the i64 bounds.
  pub fn truncate_to_units(&self) -> i64 {
    let truncated = self.0.trunc();
    truncated.to_i64().unwrap_or(if truncated.is_sign_negative() {
      i64::MIN
    } else {
      i64::MAX
    })
  }
}

impl fmt::Display for Money {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// Rate - ratio in the closed interval [0.0, 1.0]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rate(Decimal);

impl Rate {
  pub fn new(value: Decimal) -> Result<Self, ValueObjectError> {
    if value < Decimal::ZERO || value > Decimal::ONE {
      return Err(ValueObjectError::InvalidRate(format!(
        "rate must be between 0.0 and 1.0, got {}",
        value
      )));
    }
    Ok(Self(value))
  }

  pub fn zero() -> Self {
    Self(Decimal::ZERO)
  }

  pub fn value(&self) -> Decimal {
    self.0
  }

  pub fn as_f64(&self) -> f64 {
    self.0.to_f64().unwrap_or_default()
  }
}

impl fmt::Display for Rate {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// Invoice Status
//
// Always Pending on creation. Transitions to Processing/Paid/Error are
// driven by external payment processes, not by this service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
  Pending,
  Processing,
  Paid,
  Error,
}

impl InvoiceStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      InvoiceStatus::Pending => "pending",
      InvoiceStatus::Processing => "processing",
      InvoiceStatus::Paid => "paid",
      InvoiceStatus::Error => "error",
    }
  }
}

impl FromStr for InvoiceStatus {
  type Err = ValueObjectError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "pending" => Ok(InvoiceStatus::Pending),
      "processing" => Ok(InvoiceStatus::Processing),
      "paid" => Ok(InvoiceStatus::Paid),
      "error" => Ok(InvoiceStatus::Error),
      _ => Err(ValueObjectError::InvalidStatus(format!(
        "Unknown status: {}",
        s
      ))),
    }
  }
}
