use super::money::Money;
use super::payroll::PayrollBatch;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettlementStatus {
    Success,
    #[serde(alias = "failure")]
    Failed,
}

impl fmt::Display for SettlementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettlementStatus::Success => f.write_str("success"),
            SettlementStatus::Failed => f.write_str("failed"),
        }
    }
}

/// Outcome of a single transfer to an employee wallet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementResult {
    pub status: SettlementStatus,
    pub amount: Money,
    pub to_address: String,
    pub transaction_hash: Option<String>,
    pub transaction_link: Option<String>,
    pub employee_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SettlementResult {
    pub fn is_success(&self) -> bool {
        self.status == SettlementStatus::Success
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementBatch {
    pub results: Vec<SettlementResult>,
    #[serde(default)]
    pub total_processed: u32,
    pub total_succeeded: u32,
    pub total_failed: u32,
}

impl SettlementBatch {
    pub fn from_results(results: Vec<SettlementResult>) -> Self {
        let total_succeeded = results.iter().filter(|r| r.is_success()).count() as u32;
        let total_processed = results.len() as u32;
        Self {
            results,
            total_processed,
            total_succeeded,
            total_failed: total_processed - total_succeeded,
        }
    }

    /// Finds the settlement row paying the given employee.
    pub fn for_employee(&self, employee_id: &str) -> Option<&SettlementResult> {
        self.results.iter().find(|r| r.employee_id == employee_id)
    }
}

/// Combined response of a payroll-and-settle call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettleOutcome {
    pub payroll: PayrollBatch,
    pub settlement: SettlementBatch,
}
