//! Debt and payment records, stored as a single JSON document.
//!
//! The ledger is the only place that mutates records. Simulations receive
//! [`DebtSnapshot`] values cloned out of it.

use std::fs;
use std::io;
use std::path::Path;

use chrono::NaiveDate;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{DebtSnapshot, PaymentRecord};

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("no debt with id {0}")]
    DebtNotFound(u64),
    #[error("invalid debt: {0}")]
    InvalidDebt(String),
    #[error("invalid payment: {0}")]
    InvalidPayment(String),
    #[error("ledger I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("ledger file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Fields a caller supplies when creating or editing a debt.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDebt {
    pub name: String,
    pub principal: f64,
    pub annual_interest_rate: f64,
    pub minimum_payment: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ledger {
    next_debt_id: u64,
    next_payment_id: u64,
    debts: Vec<DebtSnapshot>,
    payments: Vec<PaymentRecord>,
}

impl Ledger {
    pub fn new() -> Self {
        Self {
            next_debt_id: 1,
            next_payment_id: 1,
            debts: Vec::new(),
            payments: Vec::new(),
        }
    }

    /// Loads the ledger at `path`, or starts an empty one if the file does
    /// not exist yet.
    pub fn load(path: &Path) -> Result<Self, LedgerError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("no ledger at {}, starting empty", path.display());
                return Ok(Self::new());
            }
            Err(e) => return Err(e.into()),
        };
        let ledger: Self = serde_json::from_str(&text)?;
        debug!(
            "loaded {} debts and {} payments from {}",
            ledger.debts.len(),
            ledger.payments.len(),
            path.display()
        );
        Ok(ledger)
    }

    pub fn save(&self, path: &Path) -> Result<(), LedgerError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        debug!("saved ledger to {}", path.display());
        Ok(())
    }

    pub fn add_debt(&mut self, debt: NewDebt, created: NaiveDate) -> Result<u64, LedgerError> {
        validate_new_debt(&debt)?;
        let id = self.next_debt_id.max(1);
        self.next_debt_id = id + 1;
        self.debts.push(DebtSnapshot {
            id,
            name: debt.name,
            principal: debt.principal,
            annual_interest_rate: debt.annual_interest_rate,
            minimum_payment: debt.minimum_payment,
            total_paid: 0.0,
            creation_date: created,
        });
        info!("added debt {id}");
        Ok(id)
    }

    /// Replaces the editable fields; `total_paid` and the creation date stay.
    pub fn update_debt(&mut self, id: u64, debt: NewDebt) -> Result<(), LedgerError> {
        validate_new_debt(&debt)?;
        let record = self
            .debts
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or(LedgerError::DebtNotFound(id))?;
        record.name = debt.name;
        record.principal = debt.principal;
        record.annual_interest_rate = debt.annual_interest_rate;
        record.minimum_payment = debt.minimum_payment;
        Ok(())
    }

    pub fn debt(&self, id: u64) -> Result<&DebtSnapshot, LedgerError> {
        self.debts
            .iter()
            .find(|d| d.id == id)
            .ok_or(LedgerError::DebtNotFound(id))
    }

    pub fn debts(&self) -> &[DebtSnapshot] {
        &self.debts
    }

    /// Owned copies for a simulation run.
    pub fn snapshots(&self) -> Vec<DebtSnapshot> {
        self.debts.clone()
    }

    /// Removes the debt and every payment recorded against it.
    pub fn delete_debt(&mut self, id: u64) -> Result<DebtSnapshot, LedgerError> {
        let index = self
            .debts
            .iter()
            .position(|d| d.id == id)
            .ok_or(LedgerError::DebtNotFound(id))?;
        self.payments.retain(|p| p.debt_id != id);
        info!("deleted debt {id}");
        Ok(self.debts.remove(index))
    }

    pub fn add_payment(
        &mut self,
        debt_id: u64,
        amount: f64,
        date: NaiveDate,
    ) -> Result<u64, LedgerError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(LedgerError::InvalidPayment(
                "amount must be greater than zero".to_string(),
            ));
        }
        let debt = self
            .debts
            .iter_mut()
            .find(|d| d.id == debt_id)
            .ok_or(LedgerError::DebtNotFound(debt_id))?;
        debt.total_paid += amount;

        let id = self.next_payment_id.max(1);
        self.next_payment_id = id + 1;
        self.payments.push(PaymentRecord {
            id,
            debt_id,
            amount,
            date,
        });
        info!("recorded payment {id} of {amount:.2} against debt {debt_id}");
        Ok(id)
    }

    /// Payments for one debt in ascending date order.
    pub fn payments_for_debt(&self, debt_id: u64) -> Vec<PaymentRecord> {
        let mut payments: Vec<PaymentRecord> = self
            .payments
            .iter()
            .filter(|p| p.debt_id == debt_id)
            .cloned()
            .collect();
        payments.sort_by_key(|p| p.date);
        payments
    }
}

fn validate_new_debt(debt: &NewDebt) -> Result<(), LedgerError> {
    if debt.name.trim().is_empty() {
        return Err(LedgerError::InvalidDebt("name must not be empty".to_string()));
    }
    if !debt.principal.is_finite() || debt.principal <= 0.0 {
        return Err(LedgerError::InvalidDebt(
            "principal must be greater than zero".to_string(),
        ));
    }
    if !debt.annual_interest_rate.is_finite() || debt.annual_interest_rate < 0.0 {
        return Err(LedgerError::InvalidDebt(
            "interest rate cannot be negative".to_string(),
        ));
    }
    if !debt.minimum_payment.is_finite() || debt.minimum_payment <= 0.0 {
        return Err(LedgerError::InvalidDebt(
            "minimum payment must be greater than zero".to_string(),
        ));
    }
    Ok(())
}
