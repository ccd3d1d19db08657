use super::employee::EmployeeInput;
use super::payroll::PayrollBatch;
use super::settlement::SettleOutcome;
use crate::error::Result;
use async_trait::async_trait;

/// The external payroll and settlement collaborator.
///
/// The session engine performs no retries; an implementation that wants
/// retry or backoff owns it entirely.
#[async_trait]
pub trait PayrollClient: Send + Sync {
    async fn compute_payroll(&self, employees: &[EmployeeInput]) -> Result<PayrollBatch>;
    async fn compute_and_settle(&self, employees: &[EmployeeInput]) -> Result<SettleOutcome>;
}

pub type PayrollClientBox = Box<dyn PayrollClient>;
