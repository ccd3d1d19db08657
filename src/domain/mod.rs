//! Domain types for payroll computation and wallet settlement, plus the
//! port through which the session engine reaches the collaborator.

pub mod employee;
pub mod money;
pub mod payroll;
pub mod ports;
pub mod settlement;
