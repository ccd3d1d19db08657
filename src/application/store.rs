use crate::domain::payroll::{EmployeeRecord, PayrollResult};
use crate::domain::settlement::SettlementResult;
use indexmap::IndexMap;

/// Latest known result per employee.
///
/// Last write wins: a new record replaces the old one outright, keeping the
/// employee's original position in iteration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionStore {
    records: IndexMap<String, EmployeeRecord>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, payroll: PayrollResult, settlement: Option<SettlementResult>) {
        self.records.insert(
            payroll.employee_id.clone(),
            EmployeeRecord {
                payroll,
                settlement,
            },
        );
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &EmployeeRecord)> {
        self.records.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn to_vec(&self) -> Vec<(String, EmployeeRecord)> {
        self.records
            .iter()
            .map(|(id, record)| (id.clone(), record.clone()))
            .collect()
    }
}
