//! Adapters between the engine and its textual inputs and outputs.

pub mod csv;
pub mod json;
pub mod row;
