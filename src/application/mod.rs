//! Application layer: the command-driven session engine.
//!
//! Raw lines flow through the parser into the dispatcher held by
//! [`session::Session`], which is guarded by a single-flight gate, calls the
//! payroll collaborator, records results and appends to the transcript.
//! Rendering is a pure projection over the transcript.

pub mod command;
pub mod gate;
pub mod parser;
pub mod render;
pub mod session;
pub mod store;
pub mod transcript;
