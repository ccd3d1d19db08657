use crate::domain::employee::EmployeeInput;
use crate::domain::payroll::{PayrollBatch, PayrollResult, compute_demo_payroll};
use crate::domain::ports::PayrollClient;
use crate::domain::settlement::{SettleOutcome, SettlementBatch, SettlementResult, SettlementStatus};
use crate::error::Result;
use async_trait::async_trait;
use clap::ValueEnum;
use rand::Rng;
use std::time::Duration;
use tracing::{info, warn};

/// Chain whose block explorer the stub links transactions to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Network {
    #[default]
    BaseSepolia,
    BaseMainnet,
}

impl Network {
    pub fn explorer_link(&self, transaction_hash: &str) -> String {
        match self {
            Network::BaseSepolia => format!("https://sepolia.basescan.org/tx/{transaction_hash}"),
            Network::BaseMainnet => format!("https://basescan.org/tx/{transaction_hash}"),
        }
    }
}

/// In-process collaborator for demos and tests.
///
/// Payroll comes from [`compute_demo_payroll`]; settlement fabricates a
/// random transaction hash instead of touching a chain. Transfers to
/// malformed addresses, or of non-positive amounts, come back as `failed`
/// rows rather than errors, and `ER` payroll rows are never settled.
#[derive(Debug, Clone, Default)]
pub struct StubPayrollClient {
    network: Network,
    latency: Duration,
}

impl StubPayrollClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_network(mut self, network: Network) -> Self {
        self.network = network;
        self
    }

    /// Sleeps this long before answering each call.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    fn transfer(&self, payroll: &PayrollResult) -> SettlementResult {
        let failure = if !is_valid_address(&payroll.wallet_address) {
            Some(format!(
                "Invalid wallet address format: {}",
                payroll.wallet_address
            ))
        } else if !payroll.net_pay.is_positive() {
            Some(format!(
                "Transfer amount must be positive, got: {}",
                payroll.net_pay
            ))
        } else {
            None
        };

        if let Some(error) = failure {
            warn!(employee_id = %payroll.employee_id, %error, "transfer failed");
            return SettlementResult {
                status: SettlementStatus::Failed,
                amount: payroll.net_pay,
                to_address: payroll.wallet_address.clone(),
                transaction_hash: None,
                transaction_link: None,
                employee_id: payroll.employee_id.clone(),
                error: Some(error),
            };
        }

        let transaction_hash = random_transaction_hash();
        info!(
            employee_id = %payroll.employee_id,
            amount = %payroll.net_pay,
            to = %payroll.wallet_address,
            %transaction_hash,
            "transfer confirmed"
        );
        SettlementResult {
            status: SettlementStatus::Success,
            amount: payroll.net_pay,
            to_address: payroll.wallet_address.clone(),
            transaction_link: Some(self.network.explorer_link(&transaction_hash)),
            transaction_hash: Some(transaction_hash),
            employee_id: payroll.employee_id.clone(),
            error: None,
        }
    }
}

#[async_trait]
impl PayrollClient for StubPayrollClient {
    async fn compute_payroll(&self, employees: &[EmployeeInput]) -> Result<PayrollBatch> {
        self.simulate_latency().await;
        Ok(PayrollBatch::from_results(
            employees.iter().map(compute_demo_payroll).collect(),
        ))
    }

    async fn compute_and_settle(&self, employees: &[EmployeeInput]) -> Result<SettleOutcome> {
        let payroll = self.compute_payroll(employees).await?;
        self.simulate_latency().await;
        let settlement = SettlementBatch::from_results(
            payroll
                .results
                .iter()
                .filter(|r| r.is_ok())
                .map(|r| self.transfer(r))
                .collect(),
        );
        Ok(SettleOutcome {
            payroll,
            settlement,
        })
    }
}

/// `0x` (either case) followed by exactly 40 hex digits.
pub fn is_valid_address(address: &str) -> bool {
    let Some(hex) = address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
    else {
        return false;
    };
    hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit())
}

fn random_transaction_hash() -> String {
    let mut rng = rand::thread_rng();
    let digits: String = (0..64)
        .map(|_| char::from_digit(rng.gen_range(0..16), 16).unwrap_or('0'))
        .collect();
    format!("0x{digits}")
}
