use crate::domain::employee::EmployeeInput;
use crate::domain::payroll::PayrollBatch;
use crate::domain::ports::PayrollClient;
use crate::domain::settlement::SettleOutcome;
use crate::error::{LedgerError, Result};
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

const PROCESS_PATH: &str = "/api/payroll/process";
const PROCESS_AND_SETTLE_PATH: &str = "/api/payroll/process-and-settle";
const HEALTH_PATH: &str = "/health";

#[derive(Serialize)]
struct PayrollRequest<'a> {
    employees: &'a [EmployeeInput],
}

/// Collaborator backed by the payroll REST API.
///
/// Non-success responses become [`LedgerError::ComputationError`] carrying the
/// body's `detail` (a string, or an object with an `error` string), or a
/// per-endpoint default message when neither is present.
#[derive(Debug, Clone)]
pub struct HttpPayrollClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpPayrollClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self::with_client(http, base_url))
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Liveness probe. Not used by the session engine.
    pub async fn health(&self) -> Result<Value> {
        let url = self.url(HEALTH_PATH);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| request_failed(&url, e))?;
        Ok(response.error_for_status()?.json().await?)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        employees: &[EmployeeInput],
        default_message: &str,
    ) -> Result<T> {
        let url = self.url(path);
        debug!(%url, count = employees.len(), "posting payroll request");

        let response = self
            .http
            .post(&url)
            .json(&PayrollRequest { employees })
            .send()
            .await
            .map_err(|e| request_failed(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            let body: Option<Value> = response.json().await.ok();
            let message = error_detail(body.as_ref()).unwrap_or_else(|| default_message.to_string());
            warn!(%url, %status, %message, "payroll backend returned an error");
            return Err(LedgerError::ComputationError(message));
        }

        response.json().await.map_err(|e| {
            LedgerError::ComputationError(format!("malformed response from {url}: {e}"))
        })
    }
}

#[async_trait]
impl PayrollClient for HttpPayrollClient {
    async fn compute_payroll(&self, employees: &[EmployeeInput]) -> Result<PayrollBatch> {
        self.post(PROCESS_PATH, employees, "Payroll processing failed")
            .await
    }

    async fn compute_and_settle(&self, employees: &[EmployeeInput]) -> Result<SettleOutcome> {
        self.post(PROCESS_AND_SETTLE_PATH, employees, "Process and settle failed")
            .await
    }
}

fn request_failed(url: &str, error: reqwest::Error) -> LedgerError {
    LedgerError::ComputationError(format!("request to {url} failed: {error}"))
}

/// Pulls a human-readable message out of an error body's `detail` field.
fn error_detail(body: Option<&Value>) -> Option<String> {
    match body?.get("detail")? {
        Value::String(message) => Some(message.clone()),
        Value::Object(fields) => fields
            .get("error")
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}
