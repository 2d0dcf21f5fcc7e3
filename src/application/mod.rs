//! Application layer: the payout engine and the batch summary it publishes.
//!
//! `PayoutEngine` is the entry point. It classifies each extracted record,
//! resolves a rule against the injected table and keeps failures per record,
//! so one bad line never aborts a batch.

pub mod engine;
pub mod summary;
