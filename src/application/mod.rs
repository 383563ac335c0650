//! Application layer orchestrating the operator workflow.
//!
//! `SessionStore` owns the login state, `SubmissionEngine` turns the payment form
//! into gateway requests, and `StatusReconciler` refreshes recorded payments. All
//! three share the gateway and ledger through `Arc` handles so actions can run
//! concurrently.

pub mod engine;
pub mod reconciler;
pub mod session;
