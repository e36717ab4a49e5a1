//! Base types and error handling.
//!
//! - [`StoreError`](storeerror::StoreError): failures of the cookie store, persistence and config layers
//! - [`ClearPhase`](clearstate::ClearPhase): steps of a Fire Button clear cycle

pub mod clearstate;
pub mod context;
pub mod storeerror;
