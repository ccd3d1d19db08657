use super::employee::EmployeeInput;
use super::money::Money;
use super::settlement::SettlementResult;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

pub const FEDERAL_TAX_RATE: Decimal = dec!(0.15);
pub const STATE_TAX_RATE: Decimal = dec!(0.05);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayrollStatus {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "ER")]
    Error,
}

impl fmt::Display for PayrollStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayrollStatus::Ok => f.write_str("OK"),
            PayrollStatus::Error => f.write_str("ER"),
        }
    }
}

/// Computed pay breakdown for one employee. Never mutated once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollResult {
    pub employee_id: String,
    pub gross_pay: Money,
    pub federal_tax: Money,
    pub state_tax: Money,
    pub net_pay: Money,
    pub status: PayrollStatus,
    #[serde(default)]
    pub wallet_address: String,
}

impl PayrollResult {
    pub fn is_ok(&self) -> bool {
        self.status == PayrollStatus::Ok
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PayrollSummary {
    pub processed: u32,
    pub errors: u32,
}

impl PayrollSummary {
    pub fn tally(results: &[PayrollResult]) -> Self {
        let errors = results.iter().filter(|r| !r.is_ok()).count() as u32;
        Self {
            processed: results.len() as u32 - errors,
            errors,
        }
    }
}

/// Response of a payroll computation over a batch of employees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollBatch {
    pub results: Vec<PayrollResult>,
    #[serde(default)]
    pub summary: PayrollSummary,
}

impl PayrollBatch {
    pub fn from_results(results: Vec<PayrollResult>) -> Self {
        let summary = PayrollSummary::tally(&results);
        Self { results, summary }
    }
}

/// Latest known outcome for an employee: payroll plus optional settlement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub payroll: PayrollResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settlement: Option<SettlementResult>,
}

/// Flat-rate payroll used by the demo collaborator.
///
/// Each figure is rounded to cents on its own: taxes are taken from the
/// rounded gross, and net pay is the rounded gross minus the rounded taxes.
/// Negative hours or rate, or amounts too large to hold in cents, yield an
/// `ER` row with zero amounts.
pub fn compute_demo_payroll(input: &EmployeeInput) -> PayrollResult {
    let amounts = if input.hours_worked.is_sign_negative() || input.hourly_rate.is_sign_negative()
    {
        None
    } else {
        demo_amounts(input.hours_worked, input.hourly_rate)
    };

    let (status, [gross_pay, federal_tax, state_tax, net_pay]) = match amounts {
        Some(amounts) => (PayrollStatus::Ok, amounts),
        None => {
            warn!(employee_id = %input.employee_id, "payroll input out of range");
            (PayrollStatus::Error, [Money::ZERO; 4])
        }
    };

    PayrollResult {
        employee_id: input.employee_id.clone(),
        gross_pay,
        federal_tax,
        state_tax,
        net_pay,
        status,
        wallet_address: input.wallet_address.clone(),
    }
}

/// Gross, federal, state and net, or `None` on overflow.
fn demo_amounts(hours: Decimal, rate: Decimal) -> Option<[Money; 4]> {
    let gross = Money::try_new(hours.checked_mul(rate)?)?;
    let federal = gross.checked_mul(FEDERAL_TAX_RATE)?;
    let state = gross.checked_mul(STATE_TAX_RATE)?;
    let net = gross.checked_sub(federal)?.checked_sub(state)?;
    Some([gross, federal, state, net])
}
