#![allow(dead_code)]

use async_trait::async_trait;
use ledgermain::domain::employee::EmployeeInput;
use ledgermain::domain::payroll::PayrollBatch;
use ledgermain::domain::ports::PayrollClient;
use ledgermain::domain::settlement::SettleOutcome;
use ledgermain::error::{LedgerError, Result};
use ledgermain::infrastructure::stub::StubPayrollClient;
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

pub const WALLET: &str = "0x742d35Cc6634C0532925a3b844Bc9e7595f0bEb2";

/// Counts collaborator calls; answers like the stub or fails on demand.
#[derive(Clone, Default)]
pub struct SpyClient {
    pub calls: Arc<AtomicUsize>,
    failure: Arc<Mutex<Option<String>>>,
    inner: StubPayrollClient,
}

impl SpyClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(message: &str) -> Self {
        let client = Self::default();
        client.fail_with(Some(message));
        client
    }

    /// Makes every later call fail with `message`, or succeed again on `None`.
    pub fn fail_with(&self, message: Option<&str>) {
        *self.failure.lock().unwrap() = message.map(str::to_string);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.failure.lock().unwrap().as_ref() {
            Some(message) => Err(LedgerError::ComputationError(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl PayrollClient for SpyClient {
    async fn compute_payroll(&self, employees: &[EmployeeInput]) -> Result<PayrollBatch> {
        self.record()?;
        self.inner.compute_payroll(employees).await
    }

    async fn compute_and_settle(&self, employees: &[EmployeeInput]) -> Result<SettleOutcome> {
        self.record()?;
        self.inner.compute_and_settle(employees).await
    }
}

/// Parks every call until `release` is notified.
#[derive(Clone, Default)]
pub struct BlockingClient {
    pub calls: Arc<AtomicUsize>,
    pub entered: Arc<Notify>,
    pub release: Arc<Notify>,
    inner: StubPayrollClient,
}

impl BlockingClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn park(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.entered.notify_one();
        self.release.notified().await;
    }
}

#[async_trait]
impl PayrollClient for BlockingClient {
    async fn compute_payroll(&self, employees: &[EmployeeInput]) -> Result<PayrollBatch> {
        self.park().await;
        self.inner.compute_payroll(employees).await
    }

    async fn compute_and_settle(&self, employees: &[EmployeeInput]) -> Result<SettleOutcome> {
        self.park().await;
        self.inner.compute_and_settle(employees).await
    }
}

/// Answers like the stub after rewriting selected employees' inputs, so a
/// batch comes back with a mix of outcomes.
#[derive(Clone, Default)]
pub struct MixedOutcomeClient {
    negative_hours: Vec<String>,
    bad_wallet: Vec<String>,
    inner: StubPayrollClient,
}

impl MixedOutcomeClient {
    /// `negative_hours` rows compute as `ER`; `bad_wallet` rows fail to settle.
    pub fn new(negative_hours: &[&str], bad_wallet: &[&str]) -> Self {
        Self {
            negative_hours: negative_hours.iter().map(|s| s.to_string()).collect(),
            bad_wallet: bad_wallet.iter().map(|s| s.to_string()).collect(),
            inner: StubPayrollClient::new(),
        }
    }

    fn rewrite(&self, employees: &[EmployeeInput]) -> Vec<EmployeeInput> {
        employees
            .iter()
            .cloned()
            .map(|mut employee| {
                if self.negative_hours.contains(&employee.employee_id) {
                    employee.hours_worked = -employee.hours_worked.abs() - Decimal::ONE;
                }
                if self.bad_wallet.contains(&employee.employee_id) {
                    employee.wallet_address = "NOTAWALLET".to_string();
                }
                employee
            })
            .collect()
    }
}

#[async_trait]
impl PayrollClient for MixedOutcomeClient {
    async fn compute_payroll(&self, employees: &[EmployeeInput]) -> Result<PayrollBatch> {
        self.inner.compute_payroll(&self.rewrite(employees)).await
    }

    async fn compute_and_settle(&self, employees: &[EmployeeInput]) -> Result<SettleOutcome> {
        self.inner.compute_and_settle(&self.rewrite(employees)).await
    }
}
