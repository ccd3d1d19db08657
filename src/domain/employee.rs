use crate::error::{LedgerError, Result};
use regex::Regex;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::LazyLock;

/// Hours used when the typed value is unparseable or zero.
pub const DEFAULT_HOURS: Decimal = dec!(40);
/// Hourly rate used when the typed value is unparseable or zero.
pub const DEFAULT_RATE: Decimal = dec!(25.50);

/// One employee's pay-period input, as sent to the payroll collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeInput {
    pub employee_id: String,
    pub hours_worked: Decimal,
    pub hourly_rate: Decimal,
    pub tax_code: String,
    pub wallet_address: String,
}

impl EmployeeInput {
    pub fn new(
        employee_id: impl Into<String>,
        hours_worked: Decimal,
        hourly_rate: Decimal,
        tax_code: impl Into<String>,
        wallet_address: impl Into<String>,
    ) -> Self {
        Self {
            employee_id: employee_id.into(),
            hours_worked,
            hourly_rate,
            tax_code: tax_code.into(),
            wallet_address: wallet_address.into(),
        }
    }

    /// Builds an input from the five positional arguments of RUN/SETTLE.
    ///
    /// Fails unless exactly five arguments are given. Numeric arguments are
    /// lenient: anything that does not parse, or parses to zero, is replaced
    /// by [`DEFAULT_HOURS`] / [`DEFAULT_RATE`].
    pub fn from_args(args: &[String]) -> Result<Self> {
        let [employee_id, hours, rate, tax_code, wallet] = args else {
            return Err(LedgerError::ValidationError(format!(
                "expected 5 arguments, got {}",
                args.len()
            )));
        };
        Ok(Self::new(
            employee_id.clone(),
            lenient_decimal(hours, DEFAULT_HOURS),
            lenient_decimal(rate, DEFAULT_RATE),
            tax_code.clone(),
            wallet.clone(),
        ))
    }
}

/// Longest leading run that reads as a number, with an optional exponent.
static NUMERIC_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([+-]?(?:\d+\.?\d*|\.\d+))(?:[eE]([+-]?\d+))?").expect("valid pattern")
});

/// Reads the numeric prefix of `raw` (`10HRS` is 10, `1E2` is 100), falling
/// back when there is none, it is zero, or it does not fit a `Decimal`.
fn lenient_decimal(raw: &str, fallback: Decimal) -> Decimal {
    let Some(caps) = NUMERIC_PREFIX.captures(raw) else {
        return fallback;
    };
    let mantissa = caps[1].trim_start_matches('+').trim_end_matches('.');
    let mantissa = match mantissa.strip_prefix('-') {
        Some(rest) if rest.starts_with('.') => format!("-0{rest}"),
        Some(_) => mantissa.to_string(),
        None if mantissa.starts_with('.') => format!("0{mantissa}"),
        None => mantissa.to_string(),
    };
    let parsed = match caps.get(2) {
        Some(exponent) => Decimal::from_scientific(&format!("{mantissa}e{}", exponent.as_str())),
        None => Decimal::from_str(&mantissa),
    };
    match parsed {
        Ok(value) if !value.is_zero() => value,
        _ => fallback,
    }
}

/// The fixed employee set processed by BATCH.
pub fn demo_batch() -> Vec<EmployeeInput> {
    vec![
        EmployeeInput::new(
            "EMP001",
            dec!(40.00),
            dec!(25.50),
            "US",
            "0x742d35Cc6634C0532925a3b844Bc9e7595f0bEb2",
        ),
        EmployeeInput::new(
            "EMP002",
            dec!(35.00),
            dec!(30.00),
            "US",
            "0x1234567890123456789012345678901234567890",
        ),
        EmployeeInput::new(
            "EMP003",
            dec!(45.00),
            dec!(28.75),
            "US",
            "0x9876543210987654321098765432109876543210",
        ),
    ]
}
