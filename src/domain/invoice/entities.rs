use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::value_objects::{InvoiceStatus, Money, Rate, ValueObjectError};

// Organization - the billing party, read-only reference data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
  pub id: i64,
  pub name: String,
  pub representative: String,
  pub phone_number: String,
  pub postal_code: String,
  pub address: String,
}

// Client - the billed party, read-only reference data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
  pub id: i64,
  pub organization_id: i64,
  pub name: String,
  pub representative: String,
  pub phone_number: String,
  pub postal_code: String,
  pub address: String,
}

// Invoice - the central entity
//
// Fee, Tax and TotalAmount are derived fields, only ever written by
// `calculate`. FeeRate and TaxRate are fixed once set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
  /// Assigned by the persistence layer; None before creation.
  pub id: Option<i64>,
  pub organization: Organization,
  pub client: Client,
  pub issue_date: NaiveDate,
  pub due_date: NaiveDate,
  pub amount: Money,
  pub fee: Money,
  pub fee_rate: Rate,
  pub tax: Money,
  pub tax_rate: Rate,
  pub total_amount: Money,
  pub status: InvoiceStatus,
}

impl Invoice {
  /// Builds an uncalculated invoice: status Pending, derived fields zero.
  ///
  /// The amount must be strictly positive; a zero-amount invoice has no
  /// business meaning.
  pub fn new(
    organization: Organization,
    client: Client,
    amount: Money,
    issue_date: NaiveDate,
    due_date: NaiveDate,
    fee_rate: Rate,
  ) -> Result<Self, ValueObjectError> {
    if !amount.is_positive() {
      return Err(ValueObjectError::InvalidAmount(format!(
        "amount must be positive, got {}",
        amount
      )));
    }

    Ok(Self {
      id: None,
      organization,
      client,
      issue_date,
      due_date,
      amount,
      fee: Money::zero(),
      fee_rate,
      tax: Money::zero(),
      tax_rate: Rate::zero(),
      total_amount: Money::zero(),
      status: InvoiceStatus::Pending,
    })
  }

  /// Computes the derived monetary fields:
  ///
  ///   fee   = amount * fee_rate
  ///   tax   = fee * tax_rate     (tax is levied on the fee, not the amount)
  ///   total = amount + fee + tax
  ///
  /// Pure function of (amount, fee_rate, tax_rate); calling it again with
  /// the same tax rate yields identical results.
  pub fn calculate(&mut self, tax_rate: Rate) {
    self.fee = self.amount.apply_rate(self.fee_rate);
    self.tax = self.fee.apply_rate(tax_rate);
    self.total_amount = self.amount.add(self.fee).add(self.tax);
    self.tax_rate = tax_rate;
  }
}
